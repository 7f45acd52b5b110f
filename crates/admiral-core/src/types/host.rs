use serde::{Deserialize, Serialize};

use super::HostId;
use crate::constants::EMPTY_VARIABLES;

/// A stored inventory host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    pub id: HostId,
    /// Primary network address used to connect to the host.
    pub address: String,
    pub hostname: String,
    pub domain: String,
    /// Opaque variables blob (JSON object text).
    pub variables: String,
    pub enabled: bool,
    pub monitored: bool,
}

impl Host {
    /// `hostname.domain`, the key used by both projections.
    pub fn fqdn(&self) -> String {
        fqdn(&self.hostname, &self.domain)
    }
}

/// Host fields supplied on create/upsert. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHost {
    pub address: String,
    pub hostname: String,
    pub domain: String,
    pub variables: String,
    pub enabled: bool,
    pub monitored: bool,
}

impl NewHost {
    pub fn new(
        hostname: impl Into<String>,
        domain: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            hostname: hostname.into(),
            domain: domain.into(),
            variables: EMPTY_VARIABLES.to_string(),
            enabled: true,
            monitored: true,
        }
    }

    pub fn with_variables(mut self, variables: impl Into<String>) -> Self {
        self.variables = variables.into();
        self
    }

    pub fn with_flags(mut self, enabled: bool, monitored: bool) -> Self {
        self.enabled = enabled;
        self.monitored = monitored;
        self
    }

    /// Replace whichever flags are given; `None` keeps the current value.
    pub fn with_flag_overrides(mut self, enabled: Option<bool>, monitored: Option<bool>) -> Self {
        self.enabled = enabled.unwrap_or(self.enabled);
        self.monitored = monitored.unwrap_or(self.monitored);
        self
    }
}

/// Read-only listing view of a host with its resolved membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostView {
    pub host: Host,
    pub direct_group: Option<String>,
    /// Comma-joined ancestor names of the direct group, nearest first.
    pub inherited_groups: String,
}

fn fqdn(hostname: &str, domain: &str) -> String {
    if domain.is_empty() {
        hostname.to_string()
    } else {
        format!("{hostname}.{domain}")
    }
}
