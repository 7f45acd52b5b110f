//! PRAGMA configuration applied to every SQLite connection.
//!
//! WAL mode, NORMAL sync, foreign_keys ON, configurable busy_timeout,
//! temp_store MEMORY.

use admiral_core::errors::StorageError;
use rusqlite::Connection;

/// Apply performance and integrity pragmas to the write connection.
pub fn apply_pragmas(conn: &Connection, busy_timeout_ms: u32) -> Result<(), StorageError> {
    conn.execute_batch(&format!(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        PRAGMA cache_size = -16000;
        PRAGMA busy_timeout = {busy_timeout_ms};
        PRAGMA temp_store = MEMORY;
        "
    ))
    .map_err(|e| StorageError::SqliteError {
        message: format!("failed to apply pragmas: {e}"),
    })
}

/// Apply read-only pragmas to a read connection.
pub fn apply_read_pragmas(conn: &Connection, busy_timeout_ms: u32) -> Result<(), StorageError> {
    conn.execute_batch(&format!(
        "
        PRAGMA query_only = ON;
        PRAGMA foreign_keys = ON;
        PRAGMA cache_size = -16000;
        PRAGMA busy_timeout = {busy_timeout_ms};
        PRAGMA temp_store = MEMORY;
        "
    ))
    .map_err(|e| StorageError::SqliteError {
        message: format!("failed to apply read pragmas: {e}"),
    })
}

/// Whether foreign-key enforcement is on for this connection.
pub fn foreign_keys_enabled(conn: &Connection) -> Result<bool, StorageError> {
    let on: i64 = conn
        .pragma_query_value(None, "foreign_keys", |row| row.get(0))
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
    Ok(on == 1)
}

/// Verify that WAL mode is active.
pub fn verify_wal_mode(conn: &Connection) -> Result<bool, StorageError> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
