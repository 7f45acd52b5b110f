//! Classification of rusqlite errors into `StorageError` variants.

use admiral_core::errors::StorageError;
use rusqlite::ffi;
use rusqlite::ErrorCode;

/// Map a rusqlite error, keeping foreign-key and busy failures distinct.
pub(crate) fn to_storage_error(e: rusqlite::Error) -> StorageError {
    if let rusqlite::Error::SqliteFailure(ref failure, _) = e {
        match failure.code {
            ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked => return StorageError::DbBusy,
            ErrorCode::ConstraintViolation
                if failure.extended_code == ffi::SQLITE_CONSTRAINT_FOREIGNKEY =>
            {
                return StorageError::ForeignKeyViolation {
                    message: e.to_string(),
                };
            }
            _ => {}
        }
    }
    StorageError::SqliteError {
        message: e.to_string(),
    }
}
