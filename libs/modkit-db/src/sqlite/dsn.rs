//! SQLite DSN parsing, cleaning and path preparation.

use std::collections::HashMap;
use std::path::PathBuf;

/// Query parameters that are SQLite PRAGMAs rather than sqlx connection options.
const SQLITE_PRAGMA_PARAMS: &[&str] = &["wal", "synchronous", "busy_timeout", "journal_mode"];

/// Extract SQLite PRAGMA parameters from the DSN and return the cleaned DSN.
///
/// Keys are matched case-insensitively and returned lowercased. Non-PRAGMA
/// parameters stay in the DSN. A DSN that is not a URL is returned unchanged.
pub(crate) fn extract_sqlite_pragmas(dsn: &str) -> (String, HashMap<String, String>) {
    let Ok(mut url) = url::Url::parse(dsn) else {
        return (dsn.to_string(), HashMap::new());
    };

    let (pragmas, rest): (Vec<_>, Vec<_>) = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .partition(|(k, _)| SQLITE_PRAGMA_PARAMS.contains(&k.to_lowercase().as_str()));

    url.set_query(None);
    if !rest.is_empty() {
        let query = rest
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        url.set_query(Some(&query));
    }

    let pairs = pragmas
        .into_iter()
        .map(|(k, v)| (k.to_lowercase(), v))
        .collect();
    (url.to_string(), pairs)
}

/// True for `sqlite::memory:`, `sqlite://memory:` and DSNs with `mode=memory`.
pub(crate) fn is_memory_dsn(dsn: &str) -> bool {
    if dsn.starts_with("sqlite::memory:") || dsn.starts_with("sqlite://memory:") {
        return true;
    }

    url::Url::parse(dsn)
        .map(|url| {
            url.query_pairs().any(|(k, v)| {
                k.eq_ignore_ascii_case("mode") && v.eq_ignore_ascii_case("memory")
            })
        })
        .unwrap_or(false)
}

/// Filesystem path of a file-backed SQLite DSN, `None` for in-memory or `file:` URIs.
pub(crate) fn sqlite_file_path(dsn: &str) -> Option<PathBuf> {
    if is_memory_dsn(dsn) {
        return None;
    }

    let raw = dsn
        .strip_prefix("sqlite://")
        .or_else(|| dsn.strip_prefix("sqlite:"))?;
    let raw = raw.split('?').next().unwrap_or_default();
    if raw.is_empty() || raw.starts_with("file:") {
        return None;
    }
    Some(PathBuf::from(raw))
}

/// Ensure the parent directory of a file database exists.
pub(crate) fn prepare_sqlite_path(dsn: &str, create_dirs: bool) -> std::io::Result<()> {
    if !create_dirs {
        return Ok(());
    }
    if let Some(parent) = sqlite_file_path(dsn).as_deref().and_then(|p| p.parent()) {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
