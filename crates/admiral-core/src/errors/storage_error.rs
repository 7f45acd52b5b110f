//! Storage errors raised by the relationship store.

use super::error_code::{self, AdmiralErrorCode};

/// Errors from the persistence layer. Propagated verbatim by the hierarchy
/// engine; a lookup that matches no rows is `Ok(None)`, never an error.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("Database busy")]
    DbBusy,

    #[error("Migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    #[error("Lock poisoned: {message}")]
    LockPoisoned { message: String },
}

impl AdmiralErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DbBusy => error_code::DB_BUSY,
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::ForeignKeyViolation { .. } => error_code::FOREIGN_KEY_VIOLATION,
            Self::SqliteError { .. } | Self::LockPoisoned { .. } => error_code::STORAGE_ERROR,
        }
    }
}
