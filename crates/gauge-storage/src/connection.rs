//! Connection opening with an explicit pragma allow-list.
//!
//! Each `DatabaseConfig` field maps to exactly one setting below. The
//! busy timeout is the deadline contract for the flush path: execute,
//! rollback, and commit each wait at most that long on a locked database.
//! The coordinator owns the returned connection for its whole lifetime;
//! any pooling beyond this single handle belongs to the caller.

use gauge_core::config::DatabaseConfig;
use gauge_core::errors::StorageError;
use rusqlite::Connection;
use tracing::debug;

const SYNCHRONOUS_LEVELS: [&str; 4] = ["OFF", "NORMAL", "FULL", "EXTRA"];

/// Open the connection described by `config`. No path means in-memory.
pub fn open(config: &DatabaseConfig) -> Result<Connection, StorageError> {
    let conn = match &config.path {
        Some(path) => Connection::open(path).map_err(sqe)?,
        None => Connection::open_in_memory().map_err(sqe)?,
    };
    apply_pragmas(&conn, config)?;
    Ok(conn)
}

/// In-memory connection with default pragmas (tests, benches).
pub fn open_in_memory() -> Result<Connection, StorageError> {
    open(&DatabaseConfig::default())
}

fn apply_pragmas(conn: &Connection, config: &DatabaseConfig) -> Result<(), StorageError> {
    conn.busy_timeout(config.effective_busy_timeout())
        .map_err(sqe)?;
    if config.effective_wal() {
        conn.pragma_update(None, "journal_mode", "WAL").map_err(sqe)?;
    }
    let synchronous = config.effective_synchronous().to_ascii_uppercase();
    if !SYNCHRONOUS_LEVELS.contains(&synchronous.as_str()) {
        return Err(StorageError::Sqlite {
            message: format!("unknown synchronous level {synchronous:?}"),
        });
    }
    conn.pragma_update(None, "synchronous", &synchronous)
        .map_err(sqe)?;
    debug!(
        wal = config.effective_wal(),
        synchronous = %synchronous,
        busy_timeout_ms = config.effective_busy_timeout().as_millis() as u64,
        "connection pragmas applied"
    );
    Ok(())
}

fn sqe(e: rusqlite::Error) -> StorageError {
    StorageError::Sqlite {
        message: e.to_string(),
    }
}
