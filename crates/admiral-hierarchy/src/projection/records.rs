//! Per-record JSON views of hosts and groups.
//!
//! Field names match the bulk-import record shapes, so a list of host or
//! group documents can be fed straight back into an import.

use admiral_core::errors::{ProjectionError, VariablesOwner};
use admiral_core::traits::InventoryStorage;
use admiral_core::types::{FxHashMap, Group, GroupId, Host, HostId};
use serde::Serialize;
use serde_json::{Map, Value};

use super::parse_variables;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupDocument {
    pub id: GroupId,
    pub name: String,
    pub variables: Map<String, Value>,
    pub enable: bool,
    pub monitor: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostDocument {
    pub id: HostId,
    pub ip: String,
    pub hostname: String,
    pub domain: String,
    pub variables: Map<String, Value>,
    pub enable: bool,
    pub monitor: bool,
    /// The direct group, when assigned.
    pub groups: Vec<String>,
}

pub fn group_documents(groups: Vec<Group>) -> Result<Vec<GroupDocument>, ProjectionError> {
    groups
        .into_iter()
        .map(|group| {
            let variables = parse_variables(VariablesOwner::Group, &group.name, &group.variables)?;
            Ok(GroupDocument {
                id: group.id,
                name: group.name,
                variables,
                enable: group.enabled,
                monitor: group.monitored,
            })
        })
        .collect()
}

pub fn host_documents(
    store: &dyn InventoryStorage,
    hosts: Vec<Host>,
) -> Result<Vec<HostDocument>, ProjectionError> {
    let group_names: FxHashMap<GroupId, String> = store
        .list_groups()?
        .into_iter()
        .map(|g| (g.id, g.name))
        .collect();
    let direct: FxHashMap<HostId, GroupId> = store
        .list_host_edges()?
        .into_iter()
        .map(|edge| (edge.host, edge.group))
        .collect();

    hosts
        .into_iter()
        .map(|host| {
            let variables = parse_variables(VariablesOwner::Host, &host.hostname, &host.variables)?;
            let groups = direct
                .get(&host.id)
                .and_then(|id| group_names.get(id))
                .cloned()
                .into_iter()
                .collect();
            Ok(HostDocument {
                id: host.id,
                ip: host.address,
                hostname: host.hostname,
                domain: host.domain,
                variables,
                enable: host.enabled,
                monitor: host.monitored,
                groups,
            })
        })
        .collect()
}
