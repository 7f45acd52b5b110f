//! Top-level error aggregating every subsystem via `From` conversions.

use super::error_code::AdmiralErrorCode;
use super::{ConfigError, HierarchyError, ImportError, ProjectionError, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum AdmiralError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Hierarchy error: {0}")]
    Hierarchy(#[from] HierarchyError),

    #[error("Projection error: {0}")]
    Projection(#[from] ProjectionError),

    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AdmiralErrorCode for AdmiralError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Storage(e) => e.error_code(),
            Self::Hierarchy(e) => e.error_code(),
            Self::Projection(e) => e.error_code(),
            Self::Import(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
