//! Inventory and Prometheus projection errors.

use std::fmt;

use super::error_code::{self, AdmiralErrorCode};
use super::{HierarchyError, StorageError};

/// Which kind of entity owned an unparsable variables blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariablesOwner {
    Host,
    Group,
}

impl fmt::Display for VariablesOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host => f.write_str("host"),
            Self::Group => f.write_str("group"),
        }
    }
}

/// Errors that abort a projection run. No partial output is produced.
#[derive(Debug, thiserror::Error)]
pub enum ProjectionError {
    #[error("Malformed variables on {owner} {name}: {message}")]
    MalformedVariables {
        owner: VariablesOwner,
        name: String,
        message: String,
    },

    #[error("Group name {name} collides with a reserved inventory key")]
    ReservedGroupName { name: String },

    #[error("Serialization failed: {message}")]
    Serialization { message: String },

    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AdmiralErrorCode for ProjectionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedVariables { .. } => error_code::MALFORMED_VARIABLES,
            Self::ReservedGroupName { .. } | Self::Serialization { .. } => {
                error_code::PROJECTION_ERROR
            }
            Self::Hierarchy(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
        }
    }
}
