//! Database handle for Dayplan modules.
//!
//! Wraps a `sqlx` SQLite pool and exposes it to SeaORM.
//!
//! - SQLite DSN preparation (parent directories are created for file databases)
//! - PRAGMA query parameters (`journal_mode`, `synchronous`, `busy_timeout`, legacy `wal`)
//!   are stripped from the DSN and applied on every new connection
//! - `foreign_keys` is always enabled
//!
//! ```rust,ignore
//! let db = DbHandle::connect("sqlite://database/dayplan.db?journal_mode=WAL", ConnectOpts::default()).await?;
//! let conn = db.sea();
//! ```

mod sqlite;

use std::time::Duration;

use sea_orm::{DatabaseConnection, SqlxSqliteConnector};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use thiserror::Error;

use crate::sqlite::{extract_sqlite_pragmas, is_memory_dsn, prepare_sqlite_path, Pragmas};

/// Library-local result type.
pub type Result<T> = std::result::Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Unknown DSN: {0}")]
    UnknownDsn(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Sea(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Default `PRAGMA busy_timeout` for file databases, in milliseconds.
pub const DEFAULT_SQLITE_BUSY_TIMEOUT: i64 = 5000;

/// Connection options.
#[derive(Clone, Debug)]
pub struct ConnectOpts {
    /// Maximum number of connections in the pool. In-memory databases always use one.
    pub max_conns: Option<u32>,
    /// Timeout to acquire a connection from the pool.
    pub acquire_timeout: Option<Duration>,
    /// Busy timeout used when the DSN does not carry one.
    pub busy_timeout_ms: Option<u32>,
    /// For SQLite file DSNs, create parent directories if missing.
    pub create_sqlite_dirs: bool,
}

impl Default for ConnectOpts {
    fn default() -> Self {
        Self {
            max_conns: Some(10),
            acquire_timeout: Some(Duration::from_secs(30)),
            busy_timeout_ms: None,
            create_sqlite_dirs: true,
        }
    }
}

/// Main handle.
#[derive(Clone, Debug)]
pub struct DbHandle {
    pool: SqlitePool,
    dsn: String,
    sea: DatabaseConnection,
}

impl DbHandle {
    /// Connect to a `sqlite:` DSN and build a pool.
    pub async fn connect(dsn: &str, opts: ConnectOpts) -> Result<Self> {
        if !dsn.trim_start().to_ascii_lowercase().starts_with("sqlite:") {
            return Err(DbError::UnknownDsn(dsn.to_string()));
        }

        prepare_sqlite_path(dsn, opts.create_sqlite_dirs)?;

        let (clean_dsn, pairs) = extract_sqlite_pragmas(dsn);
        let memory = is_memory_dsn(&clean_dsn);
        let mut pragmas = Pragmas::from_pairs(&pairs);
        if pragmas.busy_timeout_ms.is_none() {
            pragmas.busy_timeout_ms = Some(
                opts.busy_timeout_ms
                    .map(i64::from)
                    .unwrap_or(DEFAULT_SQLITE_BUSY_TIMEOUT),
            );
        }
        let statements = pragmas.statements(memory);

        let mut o = SqlitePoolOptions::new();
        if memory {
            // Each connection to `:memory:` opens its own database.
            o = o
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        } else if let Some(n) = opts.max_conns {
            o = o.max_connections(n);
        }
        if let Some(t) = opts.acquire_timeout {
            o = o.acquire_timeout(t);
        }

        o = o.after_connect(move |conn, _meta| {
            let statements = statements.clone();
            Box::pin(async move {
                for stmt in &statements {
                    sqlx::query(stmt).execute(&mut *conn).await?;
                }
                Ok(())
            })
        });

        let pool = o.connect(&clean_dsn).await?;
        tracing::debug!(dsn = %clean_dsn, memory, "sqlite pool connected");

        let sea = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool.clone());
        Ok(Self {
            pool,
            dsn: clean_dsn,
            sea,
        })
    }

    /// DSN with PRAGMA parameters removed.
    pub fn dsn(&self) -> &str {
        &self.dsn
    }

    pub fn sqlx_sqlite(&self) -> &SqlitePool {
        &self.pool
    }

    /// SeaORM connection (clone; cheap handle).
    pub fn sea(&self) -> DatabaseConnection {
        self.sea.clone()
    }

    /// Graceful pool close.
    pub async fn close(self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn memory_connection_applies_pragmas() -> anyhow::Result<()> {
        let db = DbHandle::connect(
            "sqlite::memory:?synchronous=FULL&journal_mode=WAL",
            ConnectOpts::default(),
        )
        .await?;
        assert_eq!(db.dsn(), "sqlite::memory:");

        let fk: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
            .fetch_one(db.sqlx_sqlite())
            .await?;
        assert_eq!(fk, 1);

        // FULL == 2
        let sync: i64 = sqlx::query_scalar("PRAGMA synchronous")
            .fetch_one(db.sqlx_sqlite())
            .await?;
        assert_eq!(sync, 2);

        // in-memory databases always report MEMORY
        let mode: String = sqlx::query_scalar("PRAGMA journal_mode")
            .fetch_one(db.sqlx_sqlite())
            .await?;
        assert_eq!(mode.to_lowercase(), "memory");
        Ok(())
    }

    #[tokio::test]
    async fn memory_database_is_shared_across_queries() -> anyhow::Result<()> {
        let db = DbHandle::connect("sqlite::memory:", ConnectOpts::default()).await?;
        sqlx::query("CREATE TABLE t (id INTEGER PRIMARY KEY)")
            .execute(db.sqlx_sqlite())
            .await?;
        sqlx::query("INSERT INTO t (id) VALUES (1)")
            .execute(db.sqlx_sqlite())
            .await?;
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM t")
            .fetch_one(db.sqlx_sqlite())
            .await?;
        assert_eq!(n, 1);
        Ok(())
    }

    #[tokio::test]
    async fn file_database_creates_parent_dirs() -> anyhow::Result<()> {
        let tmp = tempdir()?;
        let path = tmp.path().join("nested/dir/app.db");
        let dsn = format!(
            "sqlite://{}?mode=rwc&busy_timeout=1234",
            path.to_string_lossy().replace('\\', "/")
        );

        let db = DbHandle::connect(&dsn, ConnectOpts::default()).await?;
        assert!(path.parent().map(|p| p.is_dir()).unwrap_or(false));
        assert!(!db.dsn().contains("busy_timeout"));

        let timeout: i64 = sqlx::query_scalar("PRAGMA busy_timeout")
            .fetch_one(db.sqlx_sqlite())
            .await?;
        assert_eq!(timeout, 1234);

        let mode: String = sqlx::query_scalar("PRAGMA journal_mode")
            .fetch_one(db.sqlx_sqlite())
            .await?;
        assert_eq!(mode.to_lowercase(), "wal");
        db.close().await;
        Ok(())
    }

    #[tokio::test]
    async fn non_sqlite_dsn_is_rejected() {
        let res = DbHandle::connect("postgres://localhost/db", ConnectOpts::default()).await;
        assert!(matches!(res, Err(DbError::UnknownDsn(_))));
    }
}
