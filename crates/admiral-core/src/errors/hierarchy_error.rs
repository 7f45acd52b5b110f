//! Group hierarchy errors.

use super::error_code::{self, AdmiralErrorCode};
use super::StorageError;

/// Errors raised while mutating or traversing the group hierarchy.
#[derive(Debug, thiserror::Error)]
pub enum HierarchyError {
    #[error("Group {group} cannot be its own parent")]
    SelfReference { group: String },

    #[error("Relationship loop: {parent} is already nested under {child}")]
    RelationshipLoop { child: String, parent: String },

    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },

    #[error("Relationship already exists: {child} in {parent}")]
    Duplicate { child: String, parent: String },

    #[error("{kind} already exists: {name}")]
    AlreadyExists { kind: &'static str, name: String },

    #[error("Traversal depth exceeded from group {origin}: max {max_depth}")]
    DepthExceeded { origin: String, max_depth: usize },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl HierarchyError {
    pub fn group_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "group",
            name: name.into(),
        }
    }

    pub fn host_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "host",
            name: name.into(),
        }
    }
}

impl AdmiralErrorCode for HierarchyError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SelfReference { .. } => error_code::SELF_REFERENCE,
            Self::RelationshipLoop { .. } => error_code::RELATIONSHIP_LOOP,
            Self::NotFound { .. } => error_code::NOT_FOUND,
            Self::Duplicate { .. } => error_code::DUPLICATE,
            Self::AlreadyExists { .. } => error_code::ALREADY_EXISTS,
            Self::DepthExceeded { .. } => error_code::DEPTH_EXCEEDED,
            Self::Storage(e) => e.error_code(),
        }
    }
}
