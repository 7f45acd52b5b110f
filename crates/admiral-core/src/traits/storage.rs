//! The relationship store the hierarchy engine reads from and writes to.
//!
//! Edges are stored as id pairs. Any name-bearing view is derived on read.

use std::sync::Arc;

use crate::errors::{HierarchyError, StorageError};
use crate::types::{
    ChildGroupEdge, Group, GroupId, GroupRef, Host, HostGroupEdge, HostId, NewGroup, NewHost,
};

/// Store handle shared between engines and call sites.
pub type SharedStorage = Arc<dyn InventoryStorage + Send + Sync>;

/// Key-indexed relational store for groups, hosts, and their edges.
///
/// Lookups that match no rows return `Ok(None)` or an empty `Vec`.
/// Listing methods return rows in insertion (row id) order.
pub trait InventoryStorage {
    // --- Groups ---
    fn get_group(&self, id: GroupId) -> Result<Option<Group>, StorageError>;
    fn get_group_by_name(&self, name: &str) -> Result<Option<Group>, StorageError>;
    fn list_groups(&self) -> Result<Vec<Group>, StorageError>;
    /// Groups whose name contains `pattern`.
    fn search_groups(&self, pattern: &str) -> Result<Vec<Group>, StorageError>;
    /// Insert, or replace variables and flags of the group with the same name.
    fn upsert_group(&self, group: &NewGroup) -> Result<GroupId, StorageError>;
    /// Delete a group; every edge referencing it goes with it.
    fn delete_group(&self, id: GroupId) -> Result<usize, StorageError>;

    // --- Hosts ---
    fn get_host(&self, id: HostId) -> Result<Option<Host>, StorageError>;
    fn get_host_by_hostname(&self, hostname: &str) -> Result<Option<Host>, StorageError>;
    fn list_hosts(&self) -> Result<Vec<Host>, StorageError>;
    /// Hosts whose hostname or address contains `pattern`.
    fn search_hosts(&self, pattern: &str) -> Result<Vec<Host>, StorageError>;
    /// Insert, or replace every field of the host with the same hostname.
    fn upsert_host(&self, host: &NewHost) -> Result<HostId, StorageError>;
    fn delete_host(&self, id: HostId) -> Result<usize, StorageError>;

    // --- Child group edges ---
    /// Edges where `child` is the child, i.e. its direct parents.
    fn child_edges_by_child(&self, child: GroupId) -> Result<Vec<ChildGroupEdge>, StorageError>;
    /// Edges where `parent` is the parent, i.e. its direct children.
    fn child_edges_by_parent(&self, parent: GroupId)
        -> Result<Vec<ChildGroupEdge>, StorageError>;
    fn list_child_edges(&self) -> Result<Vec<ChildGroupEdge>, StorageError>;
    /// Returns rows affected: 0 when the edge already exists.
    /// Fails with `ForeignKeyViolation` if either endpoint is absent.
    fn insert_child_edge(&self, edge: ChildGroupEdge) -> Result<usize, StorageError>;
    fn delete_child_edge(&self, edge: ChildGroupEdge) -> Result<usize, StorageError>;

    // --- Host group edges ---
    fn host_direct_group(&self, host: HostId) -> Result<Option<GroupRef>, StorageError>;
    fn list_host_edges(&self) -> Result<Vec<HostGroupEdge>, StorageError>;
    /// Assign the host's direct group, replacing any previous assignment.
    fn set_host_group(&self, edge: HostGroupEdge) -> Result<usize, StorageError>;
    fn delete_host_group(&self, edge: HostGroupEdge) -> Result<usize, StorageError>;

    // --- Atomicity ---
    /// Run `work` against a transactional view of the store. Everything
    /// `work` reads and writes through the view commits together, or not at
    /// all when it returns an error. Concurrent transactions are serialized.
    fn in_transaction(
        &self,
        work: &mut dyn FnMut(&dyn InventoryStorage) -> Result<(), HierarchyError>,
    ) -> Result<(), HierarchyError>;
}

/// Typed wrapper over [`InventoryStorage::in_transaction`] that hands back
/// the closure's result.
pub fn atomically<T, F>(store: &dyn InventoryStorage, mut f: F) -> Result<T, HierarchyError>
where
    F: FnMut(&dyn InventoryStorage) -> Result<T, HierarchyError>,
{
    let mut output = None;
    store.in_transaction(&mut |tx: &dyn InventoryStorage| {
        output = Some(f(tx)?);
        Ok(())
    })?;
    output.ok_or_else(|| {
        HierarchyError::Storage(StorageError::SqliteError {
            message: "transaction committed without producing a result".to_string(),
        })
    })
}
