//! Ansible dynamic-inventory projection.
//!
//! One top-level key per enabled group holding its immediate children,
//! variables, and direct hosts (each omitted when empty), plus
//! `_meta.hostvars` keyed by `hostname.domain`.

use std::collections::BTreeMap;

use admiral_core::constants::{ANSIBLE_HOST_KEY, INVENTORY_HOSTVARS_KEY, INVENTORY_META_KEY};
use admiral_core::errors::{ProjectionError, VariablesOwner};
use admiral_core::traits::InventoryStorage;
use admiral_core::types::{FxHashMap, GroupId};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use super::parse_variables;

/// One group's entry in the inventory.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InventoryGroup {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub vars: Map<String, Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hosts: Vec<String>,
}

/// The whole inventory tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    pub groups: BTreeMap<String, InventoryGroup>,
    pub hostvars: BTreeMap<String, Map<String, Value>>,
}

impl Serialize for Inventory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut meta = BTreeMap::new();
        meta.insert(INVENTORY_HOSTVARS_KEY, &self.hostvars);

        let mut map = serializer.serialize_map(Some(self.groups.len() + 1))?;
        let mut meta_written = false;
        for (name, group) in &self.groups {
            // Keep keys in sorted order with `_meta` in its place.
            if !meta_written && name.as_str() > INVENTORY_META_KEY {
                map.serialize_entry(INVENTORY_META_KEY, &meta)?;
                meta_written = true;
            }
            map.serialize_entry(name, group)?;
        }
        if !meta_written {
            map.serialize_entry(INVENTORY_META_KEY, &meta)?;
        }
        map.end()
    }
}

/// Build the inventory from the store.
///
/// Only enabled hosts and groups appear, and a group lists only enabled
/// children and hosts so every reference resolves inside the output.
pub fn build_inventory(store: &dyn InventoryStorage) -> Result<Inventory, ProjectionError> {
    let groups = store.list_groups()?;
    let hosts = store.list_hosts()?;
    let child_edges = store.list_child_edges()?;
    let host_edges = store.list_host_edges()?;

    let mut inventory = Inventory::default();

    let mut host_keys = FxHashMap::default();
    for host in hosts.iter().filter(|h| h.enabled) {
        let mut vars = parse_variables(VariablesOwner::Host, &host.hostname, &host.variables)?;
        vars.insert(
            ANSIBLE_HOST_KEY.to_string(),
            Value::String(host.address.clone()),
        );
        let key = host.fqdn();
        inventory.hostvars.insert(key.clone(), vars);
        host_keys.insert(host.id, key);
    }

    let enabled_groups: FxHashMap<GroupId, &str> = groups
        .iter()
        .filter(|g| g.enabled)
        .map(|g| (g.id, g.name.as_str()))
        .collect();

    for group in groups.iter().filter(|g| g.enabled) {
        if group.name == INVENTORY_META_KEY {
            return Err(ProjectionError::ReservedGroupName {
                name: group.name.clone(),
            });
        }
        let vars = parse_variables(VariablesOwner::Group, &group.name, &group.variables)?;
        let children = child_edges
            .iter()
            .filter(|edge| edge.parent == group.id)
            .filter_map(|edge| enabled_groups.get(&edge.child))
            .map(|name| name.to_string())
            .collect();
        let hosts = host_edges
            .iter()
            .filter(|edge| edge.group == group.id)
            .filter_map(|edge| host_keys.get(&edge.host))
            .cloned()
            .collect();
        inventory.groups.insert(
            group.name.clone(),
            InventoryGroup {
                children,
                vars,
                hosts,
            },
        );
    }

    tracing::debug!(
        groups = inventory.groups.len(),
        hosts = inventory.hostvars.len(),
        "built inventory"
    );
    Ok(inventory)
}
