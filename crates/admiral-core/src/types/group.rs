use serde::{Deserialize, Serialize};

use super::GroupId;
use crate::constants::EMPTY_VARIABLES;

/// A stored inventory group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    /// Opaque variables blob (JSON object text).
    pub variables: String,
    pub enabled: bool,
    pub monitored: bool,
}

/// Group fields supplied on create/upsert. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGroup {
    pub name: String,
    pub variables: String,
    pub enabled: bool,
    pub monitored: bool,
}

impl NewGroup {
    /// A group with empty variables and the given flags.
    pub fn new(name: impl Into<String>, enabled: bool, monitored: bool) -> Self {
        Self {
            name: name.into(),
            variables: EMPTY_VARIABLES.to_string(),
            enabled,
            monitored,
        }
    }

    pub fn with_variables(mut self, variables: impl Into<String>) -> Self {
        self.variables = variables.into();
        self
    }

    /// Replace whichever flags are given; `None` keeps the current value.
    pub fn with_flag_overrides(mut self, enabled: Option<bool>, monitored: Option<bool>) -> Self {
        self.enabled = enabled.unwrap_or(self.enabled);
        self.monitored = monitored.unwrap_or(self.monitored);
        self
    }
}

impl From<&Group> for NewGroup {
    fn from(group: &Group) -> Self {
        Self {
            name: group.name.clone(),
            variables: group.variables.clone(),
            enabled: group.enabled,
            monitored: group.monitored,
        }
    }
}

/// Read-only listing view of a group with its direct relationships counted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub group: Group,
    pub num_children: usize,
    pub num_hosts: usize,
    pub child_names: Vec<String>,
}
