use serde::{Deserialize, Serialize};

use super::{GroupId, HostId};

/// "child is nested inside parent". Unique per (child, parent) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChildGroupEdge {
    pub child: GroupId,
    pub parent: GroupId,
}

impl ChildGroupEdge {
    pub fn new(child: GroupId, parent: GroupId) -> Self {
        Self { child, parent }
    }
}

/// A host's direct group assignment. At most one per host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostGroupEdge {
    pub host: HostId,
    pub group: GroupId,
}

/// Id and name of a host's direct group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRef {
    pub id: GroupId,
    pub name: String,
    pub enabled: bool,
    pub monitored: bool,
}

/// One host and the group it is directly assigned to, names resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostAssignment {
    pub group: String,
    pub group_id: GroupId,
    pub hostname: String,
    pub host_id: HostId,
}
