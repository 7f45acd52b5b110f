//! Cycle guard run before every child-group edge insertion.
//! Rejects any edge that would make a group its own ancestor, or that would
//! stretch a chain past the configured depth.

use admiral_core::errors::HierarchyError;
use admiral_core::traits::InventoryStorage;
use admiral_core::types::{Group, GroupId};

use crate::traversal::{self, Direction, TraversalConfig};

/// Check whether nesting `child` inside `parent` would create a cycle.
///
/// Returns `true` if a cycle would be created (edge should be rejected).
/// A self-loop is answered without touching the store.
pub fn would_create_cycle(
    store: &dyn InventoryStorage,
    child: GroupId,
    parent: GroupId,
    config: &TraversalConfig,
) -> Result<bool, HierarchyError> {
    if child == parent {
        return Ok(true);
    }
    // The edge closes a loop exactly when parent is already below child.
    traversal::reaches(store, child, parent, Direction::Descendants, config)
}

/// Validate a proposed edge, naming the offending groups on rejection.
/// Pure read: callers insert only after this returns `Ok`.
pub fn check_relationship(
    store: &dyn InventoryStorage,
    child: &Group,
    parent: &Group,
    config: &TraversalConfig,
) -> Result<(), HierarchyError> {
    if child.id == parent.id {
        return Err(HierarchyError::SelfReference {
            group: child.name.clone(),
        });
    }
    if would_create_cycle(store, child.id, parent.id, config)? {
        return Err(HierarchyError::RelationshipLoop {
            child: child.name.clone(),
            parent: parent.name.clone(),
        });
    }
    check_depth(store, child, parent, config)
}

/// Reject an edge whose longest resulting chain would exceed `max_depth`.
/// Every chain through the new edge runs from below `child`, across the
/// edge, and on above `parent`.
pub fn check_depth(
    store: &dyn InventoryStorage,
    child: &Group,
    parent: &Group,
    config: &TraversalConfig,
) -> Result<(), HierarchyError> {
    let above = traversal::longest_chain(store, parent.id, Direction::Ancestors, config)?;
    let below = traversal::longest_chain(store, child.id, Direction::Descendants, config)?;
    if above + below + 1 > config.max_depth {
        tracing::warn!(
            child = %child.name,
            parent = %parent.name,
            chain = above + below + 1,
            max_depth = config.max_depth,
            "relationship would exceed hierarchy depth"
        );
        return Err(HierarchyError::DepthExceeded {
            origin: child.name.clone(),
            max_depth: config.max_depth,
        });
    }
    Ok(())
}
