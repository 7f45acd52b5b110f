//! Host membership: a host's direct group followed by every ancestor of
//! that group, nearest first. This is the input to both projections.

use admiral_core::constants::GROUP_LABEL_SEPARATOR;
use admiral_core::errors::HierarchyError;
use admiral_core::traits::InventoryStorage;
use admiral_core::types::{GroupRef, Host};

use crate::traversal::{self, TraversalConfig};

/// A host's resolved groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub direct: GroupRef,
    /// Ancestor names of the direct group, nearest first.
    pub inherited: Vec<String>,
}

impl Membership {
    /// Direct group name first, then every inherited name.
    pub fn effective_groups(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.inherited.len() + 1);
        names.push(self.direct.name.clone());
        names.extend(self.inherited.iter().cloned());
        names
    }

    /// Inherited names joined for a single label value.
    pub fn inherited_label(&self) -> String {
        self.inherited.join(GROUP_LABEL_SEPARATOR)
    }
}

/// Resolve a host's membership. `None` when the host has no direct group.
pub fn resolve(
    store: &dyn InventoryStorage,
    host: &Host,
    config: &TraversalConfig,
) -> Result<Option<Membership>, HierarchyError> {
    let Some(direct) = store.host_direct_group(host.id)? else {
        return Ok(None);
    };
    let ancestors = traversal::ancestors_of(store, direct.id, config)?;
    let inherited = traversal::names_of(store, &ancestors)?;
    Ok(Some(Membership { direct, inherited }))
}

/// The host's effective group names. Empty when it has no direct group.
pub fn effective_groups(
    store: &dyn InventoryStorage,
    host: &Host,
    config: &TraversalConfig,
) -> Result<Vec<String>, HierarchyError> {
    Ok(resolve(store, host, config)?
        .map(|membership| membership.effective_groups())
        .unwrap_or_default())
}
