//! Hierarchy engine configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MAX_DEPTH;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HierarchyConfig {
    /// Deepest ancestor/descendant chain a traversal will follow. Default: 64.
    pub max_depth: Option<usize>,
    /// Surface an existing child-group edge as an error instead of a no-op.
    /// Default: false.
    pub reject_duplicate_edges: Option<bool>,
}

impl HierarchyConfig {
    pub fn effective_max_depth(&self) -> usize {
        self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH)
    }

    pub fn effective_reject_duplicate_edges(&self) -> bool {
        self.reject_duplicate_edges.unwrap_or(false)
    }
}
