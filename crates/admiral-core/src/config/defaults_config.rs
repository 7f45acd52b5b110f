//! Defaults applied to newly created hosts and groups.

use serde::{Deserialize, Serialize};

use crate::types::{NewGroup, NewHost};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Domain for hosts created without one. Default: empty.
    pub domain: Option<String>,
    /// Whether new records start enabled. Default: true.
    pub enabled: Option<bool>,
    /// Whether new records start monitored. Default: true.
    pub monitored: Option<bool>,
}

impl DefaultsConfig {
    pub fn effective_domain(&self) -> &str {
        self.domain.as_deref().unwrap_or("")
    }

    pub fn effective_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn effective_monitored(&self) -> bool {
        self.monitored.unwrap_or(true)
    }

    /// A new group carrying the configured flags and empty variables.
    pub fn new_group(&self, name: impl Into<String>) -> NewGroup {
        NewGroup::new(name, self.effective_enabled(), self.effective_monitored())
    }

    /// A new host carrying the configured domain, flags, and empty variables.
    pub fn new_host(&self, hostname: impl Into<String>, address: impl Into<String>) -> NewHost {
        NewHost::new(hostname, self.effective_domain(), address)
            .with_flags(self.effective_enabled(), self.effective_monitored())
    }
}
