//! Database connection management
//!
//! Provides SQLite connection pooling via r2d2.

use std::path::Path;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::DatabaseConfig;

/// Database errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Cannot create database directory {path}: {source}")]
    Directory {
        path: String,
        source: std::io::Error,
    },
}

/// SQLite connection pool type alias
pub type ConnectionPool = Pool<SqliteConnectionManager>;

const MEMORY_PATH: &str = ":memory:";

/// Create a connection pool for the weather store
///
/// Every pooled connection runs the same pragmas when opened. An in-memory
/// database is capped at one connection since each `:memory:` connection
/// would otherwise see its own empty database.
pub fn create_pool(config: &DatabaseConfig) -> Result<ConnectionPool, DatabaseError> {
    info!(
        path = %config.path,
        max_connections = config.max_connections,
        "Creating database connection pool"
    );

    let in_memory = config.path == MEMORY_PATH;
    let manager = if in_memory {
        SqliteConnectionManager::memory()
    } else {
        ensure_parent_dir(Path::new(&config.path))?;
        SqliteConnectionManager::file(&config.path)
    }
    .with_init(apply_pragmas);

    let max_size = if in_memory { 1 } else { config.max_connections };
    let pool = Pool::builder().max_size(max_size).build(manager)?;

    if config.run_migrations {
        let conn = pool.get()?;
        crate::persistence::migrations::run_migrations(&conn)?;
    }

    debug!(max_size, "Database connection pool ready");
    Ok(pool)
}

fn ensure_parent_dir(path: &Path) -> Result<(), DatabaseError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|source| DatabaseError::Directory {
                path: parent.display().to_string(),
                source,
            })
        },
        _ => Ok(()),
    }
}

fn apply_pragmas(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        ",
    )
}
