//! Bulk import errors.

use super::error_code::{self, AdmiralErrorCode};
use super::{HierarchyError, StorageError};

/// Errors raised while importing JSON records. Import stops at the first
/// failing record.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Cannot read import file {path}: {message}")]
    Unreadable { path: String, message: String },

    #[error("Invalid import JSON: {message}")]
    InvalidJson { message: String },

    #[error("Record {index} ({name}) rejected: {message}")]
    InvalidRecord {
        index: usize,
        name: String,
        message: String,
    },

    #[error("Record {index} failed: {source}")]
    Hierarchy {
        index: usize,
        #[source]
        source: HierarchyError,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AdmiralErrorCode for ImportError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Unreadable { .. } | Self::InvalidJson { .. } | Self::InvalidRecord { .. } => {
                error_code::IMPORT_ERROR
            }
            Self::Hierarchy { source, .. } => source.error_code(),
            Self::Storage(e) => e.error_code(),
        }
    }
}
