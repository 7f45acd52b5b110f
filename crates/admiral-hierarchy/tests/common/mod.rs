//! Shared test support: a counting in-memory store and the five-group,
//! three-host fixture.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use admiral_core::errors::{HierarchyError, StorageError};
use admiral_core::traits::{InventoryStorage, SharedStorage};
use admiral_core::types::{
    ChildGroupEdge, Group, GroupId, GroupRef, Host, HostGroupEdge, HostId, NewGroup, NewHost,
};
use admiral_hierarchy::HierarchyEngine;
use admiral_storage::StorageEngine;

#[derive(Debug, Clone, Default)]
struct State {
    next_id: i64,
    groups: Vec<Group>,
    hosts: Vec<Host>,
    child_edges: Vec<ChildGroupEdge>,
    host_edges: Vec<HostGroupEdge>,
}

/// Per-method call counters.
#[derive(Debug, Default)]
pub struct CallCounts {
    pub child_edges_by_child: AtomicUsize,
    pub child_edges_by_parent: AtomicUsize,
    pub insert_child_edge: AtomicUsize,
}

impl CallCounts {
    pub fn traversal_calls(&self) -> usize {
        self.child_edges_by_child.load(Ordering::SeqCst)
            + self.child_edges_by_parent.load(Ordering::SeqCst)
    }

    pub fn inserts(&self) -> usize {
        self.insert_child_edge.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.child_edges_by_child.store(0, Ordering::SeqCst);
        self.child_edges_by_parent.store(0, Ordering::SeqCst);
        self.insert_child_edge.store(0, Ordering::SeqCst);
    }
}

/// In-memory store that counts traversal calls. Unlike the SQLite store it
/// accepts self-loops, so tests can plant a corrupted hierarchy.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    tx_lock: Mutex<()>,
    pub calls: CallCounts,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut State) -> T) -> T {
        f(&mut self.state.lock().unwrap())
    }

    /// Insert an edge with no cycle check.
    pub fn plant_edge(&self, child: &str, parent: &str) {
        let child = self.get_group_by_name(child).unwrap().unwrap().id;
        let parent = self.get_group_by_name(parent).unwrap().unwrap().id;
        self.with_state(|s| s.child_edges.push(ChildGroupEdge::new(child, parent)));
    }

    pub fn edge_count(&self) -> usize {
        self.with_state(|s| s.child_edges.len())
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl InventoryStorage for MemoryStore {
    fn get_group(&self, id: GroupId) -> Result<Option<Group>, StorageError> {
        Ok(self.with_state(|s| s.groups.iter().find(|g| g.id == id).cloned()))
    }

    fn get_group_by_name(&self, name: &str) -> Result<Option<Group>, StorageError> {
        Ok(self.with_state(|s| s.groups.iter().find(|g| g.name == name).cloned()))
    }

    fn list_groups(&self) -> Result<Vec<Group>, StorageError> {
        Ok(self.with_state(|s| s.groups.clone()))
    }

    fn search_groups(&self, pattern: &str) -> Result<Vec<Group>, StorageError> {
        Ok(self.with_state(|s| {
            s.groups
                .iter()
                .filter(|g| contains(&g.name, pattern))
                .cloned()
                .collect()
        }))
    }

    fn upsert_group(&self, group: &NewGroup) -> Result<GroupId, StorageError> {
        Ok(self.with_state(|s| {
            if let Some(existing) = s.groups.iter_mut().find(|g| g.name == group.name) {
                existing.variables = group.variables.clone();
                existing.enabled = group.enabled;
                existing.monitored = group.monitored;
                return existing.id;
            }
            s.next_id += 1;
            let id = GroupId::new(s.next_id);
            s.groups.push(Group {
                id,
                name: group.name.clone(),
                variables: group.variables.clone(),
                enabled: group.enabled,
                monitored: group.monitored,
            });
            id
        }))
    }

    fn delete_group(&self, id: GroupId) -> Result<usize, StorageError> {
        Ok(self.with_state(|s| {
            let before = s.groups.len();
            s.groups.retain(|g| g.id != id);
            s.child_edges.retain(|e| e.child != id && e.parent != id);
            s.host_edges.retain(|e| e.group != id);
            before - s.groups.len()
        }))
    }

    fn get_host(&self, id: HostId) -> Result<Option<Host>, StorageError> {
        Ok(self.with_state(|s| s.hosts.iter().find(|h| h.id == id).cloned()))
    }

    fn get_host_by_hostname(&self, hostname: &str) -> Result<Option<Host>, StorageError> {
        Ok(self.with_state(|s| s.hosts.iter().find(|h| h.hostname == hostname).cloned()))
    }

    fn list_hosts(&self) -> Result<Vec<Host>, StorageError> {
        Ok(self.with_state(|s| s.hosts.clone()))
    }

    fn search_hosts(&self, pattern: &str) -> Result<Vec<Host>, StorageError> {
        Ok(self.with_state(|s| {
            s.hosts
                .iter()
                .filter(|h| contains(&h.hostname, pattern) || contains(&h.address, pattern))
                .cloned()
                .collect()
        }))
    }

    fn upsert_host(&self, host: &NewHost) -> Result<HostId, StorageError> {
        Ok(self.with_state(|s| {
            let id = match s.hosts.iter().find(|h| h.hostname == host.hostname) {
                Some(existing) => existing.id,
                None => {
                    s.next_id += 1;
                    HostId::new(s.next_id)
                }
            };
            s.hosts.retain(|h| h.id != id);
            s.hosts.push(Host {
                id,
                address: host.address.clone(),
                hostname: host.hostname.clone(),
                domain: host.domain.clone(),
                variables: host.variables.clone(),
                enabled: host.enabled,
                monitored: host.monitored,
            });
            s.hosts.sort_by_key(|h| h.id);
            id
        }))
    }

    fn delete_host(&self, id: HostId) -> Result<usize, StorageError> {
        Ok(self.with_state(|s| {
            let before = s.hosts.len();
            s.hosts.retain(|h| h.id != id);
            s.host_edges.retain(|e| e.host != id);
            before - s.hosts.len()
        }))
    }

    fn child_edges_by_child(&self, child: GroupId) -> Result<Vec<ChildGroupEdge>, StorageError> {
        self.calls.child_edges_by_child.fetch_add(1, Ordering::SeqCst);
        Ok(self.with_state(|s| {
            s.child_edges
                .iter()
                .filter(|e| e.child == child)
                .copied()
                .collect()
        }))
    }

    fn child_edges_by_parent(
        &self,
        parent: GroupId,
    ) -> Result<Vec<ChildGroupEdge>, StorageError> {
        self.calls.child_edges_by_parent.fetch_add(1, Ordering::SeqCst);
        Ok(self.with_state(|s| {
            s.child_edges
                .iter()
                .filter(|e| e.parent == parent)
                .copied()
                .collect()
        }))
    }

    fn list_child_edges(&self) -> Result<Vec<ChildGroupEdge>, StorageError> {
        Ok(self.with_state(|s| s.child_edges.clone()))
    }

    fn insert_child_edge(&self, edge: ChildGroupEdge) -> Result<usize, StorageError> {
        self.calls.insert_child_edge.fetch_add(1, Ordering::SeqCst);
        self.with_state(|s| {
            let exists = |id| s.groups.iter().any(|g: &Group| g.id == id);
            if !exists(edge.child) || !exists(edge.parent) {
                return Err(StorageError::ForeignKeyViolation {
                    message: format!("{} -> {}", edge.child, edge.parent),
                });
            }
            if s.child_edges.contains(&edge) {
                return Ok(0);
            }
            s.child_edges.push(edge);
            Ok(1)
        })
    }

    fn delete_child_edge(&self, edge: ChildGroupEdge) -> Result<usize, StorageError> {
        Ok(self.with_state(|s| {
            let before = s.child_edges.len();
            s.child_edges.retain(|e| *e != edge);
            before - s.child_edges.len()
        }))
    }

    fn host_direct_group(&self, host: HostId) -> Result<Option<GroupRef>, StorageError> {
        Ok(self.with_state(|s| {
            let edge = s.host_edges.iter().find(|e| e.host == host)?;
            let group = s.groups.iter().find(|g| g.id == edge.group)?;
            Some(GroupRef {
                id: group.id,
                name: group.name.clone(),
                enabled: group.enabled,
                monitored: group.monitored,
            })
        }))
    }

    fn list_host_edges(&self) -> Result<Vec<HostGroupEdge>, StorageError> {
        Ok(self.with_state(|s| s.host_edges.clone()))
    }

    fn set_host_group(&self, edge: HostGroupEdge) -> Result<usize, StorageError> {
        Ok(self.with_state(|s| {
            match s.host_edges.iter_mut().find(|e| e.host == edge.host) {
                Some(existing) => existing.group = edge.group,
                None => s.host_edges.push(edge),
            }
            1
        }))
    }

    fn delete_host_group(&self, edge: HostGroupEdge) -> Result<usize, StorageError> {
        Ok(self.with_state(|s| {
            let before = s.host_edges.len();
            s.host_edges.retain(|e| *e != edge);
            before - s.host_edges.len()
        }))
    }

    fn in_transaction(
        &self,
        work: &mut dyn FnMut(&dyn InventoryStorage) -> Result<(), HierarchyError>,
    ) -> Result<(), HierarchyError> {
        let _serialized = self.tx_lock.lock().unwrap();
        let snapshot = self.with_state(|s| s.clone());
        let result = work(self);
        if result.is_err() {
            self.with_state(|s| *s = snapshot);
        }
        result
    }
}

/// An engine over a fresh counting store.
pub fn memory_engine() -> (Arc<MemoryStore>, HierarchyEngine) {
    let store = MemoryStore::new();
    let shared: SharedStorage = store.clone();
    (store, HierarchyEngine::with_defaults(shared))
}

/// An engine over a fresh in-memory SQLite store.
pub fn sqlite_engine() -> HierarchyEngine {
    let store: SharedStorage = Arc::new(StorageEngine::open_in_memory().unwrap());
    HierarchyEngine::with_defaults(store)
}

/// Create plain groups with empty variables.
pub fn add_groups(engine: &HierarchyEngine, names: &[&str]) {
    for name in names {
        engine.create_group(&NewGroup::new(*name, true, true)).unwrap();
    }
}

pub const FIXTURE_DOMAIN: &str = "domain.local";

/// group1..group5 with group3 inside group4 inside group5; host1 in
/// group1, host2 in group2, host3 in group3.
pub fn load_fixture(engine: &HierarchyEngine) {
    engine
        .create_group(
            &NewGroup::new("group1", true, true)
                .with_variables(r#"{"group_var1":{"group_sub_var1":"group_sub_val1"}}"#),
        )
        .unwrap();
    for n in 2..=5 {
        engine
            .create_group(
                &NewGroup::new(format!("group{n}"), true, true)
                    .with_variables(format!(r#"{{"group_var{n}":"group_val{n}"}}"#)),
            )
            .unwrap();
    }

    engine
        .create_host(
            &NewHost::new("host1", FIXTURE_DOMAIN, "1.1.1.1")
                .with_variables(r#"{"host_var1":{"host_sub_var1":"host_sub_val1"}}"#),
            Some("group1"),
        )
        .unwrap();
    for n in 2..=3 {
        engine
            .create_host(
                &NewHost::new(format!("host{n}"), FIXTURE_DOMAIN, format!("{n}.{n}.{n}.{n}"))
                    .with_variables(format!(r#"{{"host_var{n}":"host_val{n}"}}"#)),
                Some(format!("group{n}").as_str()),
            )
            .unwrap();
    }

    engine.create_child_relationship("group3", "group4").unwrap();
    engine.create_child_relationship("group4", "group5").unwrap();
}
