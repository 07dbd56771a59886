//! SQLite PRAGMA parameter handling with typed enums.

use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum JournalMode {
    Delete,
    Wal,
    Memory,
    Truncate,
    Persist,
    Off,
}

impl JournalMode {
    pub(crate) fn as_sql(self) -> &'static str {
        match self {
            JournalMode::Delete => "DELETE",
            JournalMode::Wal => "WAL",
            JournalMode::Memory => "MEMORY",
            JournalMode::Truncate => "TRUNCATE",
            JournalMode::Persist => "PERSIST",
            JournalMode::Off => "OFF",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "DELETE" => Some(JournalMode::Delete),
            "WAL" => Some(JournalMode::Wal),
            "MEMORY" => Some(JournalMode::Memory),
            "TRUNCATE" => Some(JournalMode::Truncate),
            "PERSIST" => Some(JournalMode::Persist),
            "OFF" => Some(JournalMode::Off),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SyncMode {
    Off,
    Normal,
    Full,
    Extra,
}

impl SyncMode {
    pub(crate) fn as_sql(self) -> &'static str {
        match self {
            SyncMode::Off => "OFF",
            SyncMode::Normal => "NORMAL",
            SyncMode::Full => "FULL",
            SyncMode::Extra => "EXTRA",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "OFF" => Some(SyncMode::Off),
            "NORMAL" => Some(SyncMode::Normal),
            "FULL" => Some(SyncMode::Full),
            "EXTRA" => Some(SyncMode::Extra),
            _ => None,
        }
    }
}

/// Parsed SQLite PRAGMA parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Pragmas {
    pub journal_mode: Option<JournalMode>,
    pub synchronous: Option<SyncMode>,
    pub busy_timeout_ms: Option<i64>,
    /// Legacy `wal=true|false|1|0`
    pub wal_toggle: Option<bool>,
}

impl Pragmas {
    /// Parse PRAGMA parameters; invalid values are logged and ignored.
    pub(crate) fn from_pairs(pairs: &HashMap<String, String>) -> Self {
        let mut pragmas = Pragmas::default();

        for (key, value) in pairs {
            match key.to_lowercase().as_str() {
                "journal_mode" => match JournalMode::parse(value) {
                    Some(mode) => pragmas.journal_mode = Some(mode),
                    None => tracing::warn!(value = %value, "invalid 'journal_mode' PRAGMA, ignoring"),
                },
                "synchronous" => match SyncMode::parse(value) {
                    Some(mode) => pragmas.synchronous = Some(mode),
                    None => tracing::warn!(value = %value, "invalid 'synchronous' PRAGMA, ignoring"),
                },
                "busy_timeout" => match value.parse::<i64>() {
                    Ok(timeout) if timeout >= 0 => pragmas.busy_timeout_ms = Some(timeout),
                    _ => tracing::warn!(value = %value, "invalid 'busy_timeout' PRAGMA, ignoring"),
                },
                "wal" => match value.to_lowercase().as_str() {
                    "true" | "1" => pragmas.wal_toggle = Some(true),
                    "false" | "0" => pragmas.wal_toggle = Some(false),
                    _ => tracing::warn!(value = %value, "invalid 'wal' PRAGMA, ignoring"),
                },
                other => tracing::debug!(key = other, "unknown SQLite PRAGMA parameter"),
            }
        }

        pragmas
    }

    /// Effective journal mode: explicit mode, then the legacy toggle, then WAL.
    /// In-memory databases always use DELETE.
    pub(crate) fn effective_journal_mode(&self, memory: bool) -> JournalMode {
        if memory {
            return JournalMode::Delete;
        }
        match (self.journal_mode, self.wal_toggle) {
            (Some(mode), _) => mode,
            (None, Some(false)) => JournalMode::Delete,
            _ => JournalMode::Wal,
        }
    }

    /// Statements executed on every new connection.
    pub(crate) fn statements(&self, memory: bool) -> Vec<String> {
        let mut out = vec![
            format!(
                "PRAGMA journal_mode = {}",
                self.effective_journal_mode(memory).as_sql()
            ),
            format!(
                "PRAGMA synchronous = {}",
                self.synchronous.unwrap_or(SyncMode::Normal).as_sql()
            ),
        ];
        if !memory {
            if let Some(ms) = self.busy_timeout_ms {
                out.push(format!("PRAGMA busy_timeout = {ms}"));
            }
        }
        out.push("PRAGMA foreign_keys = ON".to_string());
        out
    }
}
