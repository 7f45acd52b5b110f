//! Write connection utilities: BEGIN IMMEDIATE transactions.

use admiral_core::errors::StorageError;
use rusqlite::{Connection, Transaction, TransactionBehavior};

/// Start a BEGIN IMMEDIATE transaction on a shared connection reference.
/// The write lock is taken at transaction start, so a concurrent writer
/// waits here instead of failing later with SQLITE_BUSY. Dropping the
/// returned transaction without committing rolls it back.
pub fn begin_immediate(conn: &Connection) -> Result<Transaction<'_>, StorageError> {
    Transaction::new_unchecked(conn, TransactionBehavior::Immediate).map_err(|e| {
        StorageError::SqliteError {
            message: format!("failed to begin immediate transaction: {e}"),
        }
    })
}

/// Execute a write operation inside a BEGIN IMMEDIATE transaction.
/// Commits when `f` succeeds, rolls back when it fails.
pub fn with_immediate_transaction<F, T, E>(conn: &Connection, f: F) -> Result<T, E>
where
    F: FnOnce(&Connection) -> Result<T, E>,
    E: From<StorageError>,
{
    let tx = begin_immediate(conn)?;
    let result = f(&tx)?;
    tx.commit().map_err(|e| StorageError::SqliteError {
        message: format!("failed to commit: {e}"),
    })?;
    Ok(result)
}
