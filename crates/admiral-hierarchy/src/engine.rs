//! HierarchyEngine: owns the injected store and hierarchy configuration,
//! and exposes relationship management, membership resolution, the
//! projections and record views, the integrity audit, copying, and bulk
//! import.

use admiral_core::config::{AdmiralConfig, DefaultsConfig, HierarchyConfig};
use admiral_core::constants::GROUP_LABEL_SEPARATOR;
use admiral_core::errors::{HierarchyError, ImportError, ProjectionError};
use admiral_core::traits::{atomically, InventoryStorage, SharedStorage};
use admiral_core::types::{
    ChildGroupEdge, FxHashMap, Group, GroupId, GroupSummary, Host, HostAssignment, HostGroupEdge,
    HostId, HostView, NewGroup, NewHost,
};

use crate::graph::dag_enforcement;
use crate::graph::snapshot::{HierarchyAudit, HierarchySnapshot};
use crate::import::{self, ImportSummary};
use crate::membership::{self, Membership};
use crate::projection::inventory::{self, Inventory};
use crate::projection::prometheus::{self, ScrapeTarget};
use crate::projection::records::{self, GroupDocument, HostDocument};
use crate::projection::to_pretty_json;
use crate::traversal::{self, TraversalConfig};

/// Result of a successful `create_child_relationship`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeInsert {
    Created,
    /// The edge existed already; nothing was written.
    AlreadyPresent,
}

/// The group-hierarchy engine.
#[derive(Clone)]
pub struct HierarchyEngine {
    store: SharedStorage,
    hierarchy: HierarchyConfig,
    defaults: DefaultsConfig,
}

impl HierarchyEngine {
    /// Create an engine over `store` with the given configuration.
    pub fn new(store: SharedStorage, config: &AdmiralConfig) -> Self {
        Self {
            store,
            hierarchy: config.hierarchy.clone(),
            defaults: config.defaults.clone(),
        }
    }

    /// Create an engine with compiled-default configuration.
    pub fn with_defaults(store: SharedStorage) -> Self {
        Self::new(store, &AdmiralConfig::default())
    }

    /// The injected store.
    pub fn store(&self) -> &dyn InventoryStorage {
        self.store.as_ref()
    }

    /// Defaults applied to new hosts and groups.
    pub fn defaults(&self) -> &DefaultsConfig {
        &self.defaults
    }

    fn traversal_config(&self) -> TraversalConfig {
        TraversalConfig::from(&self.hierarchy)
    }

    fn require_group(store: &dyn InventoryStorage, name: &str) -> Result<Group, HierarchyError> {
        store
            .get_group_by_name(name)?
            .ok_or_else(|| HierarchyError::group_not_found(name))
    }

    /// Look a host up by bare hostname, falling back to `hostname.domain`.
    fn require_host(store: &dyn InventoryStorage, key: &str) -> Result<Host, HierarchyError> {
        if let Some(host) = store.get_host_by_hostname(key)? {
            return Ok(host);
        }
        if let Some((hostname, domain)) = key.split_once('.') {
            if let Some(host) = store.get_host_by_hostname(hostname)? {
                if host.domain == domain {
                    return Ok(host);
                }
            }
        }
        Err(HierarchyError::host_not_found(key))
    }

    // --- Relationships ---

    /// Nest `child` inside `parent`.
    ///
    /// Lookup, cycle check, and insertion run in one store transaction, so
    /// two concurrent calls cannot jointly close a loop.
    pub fn create_child_relationship(
        &self,
        child: &str,
        parent: &str,
    ) -> Result<EdgeInsert, HierarchyError> {
        let config = self.traversal_config();
        let reject_duplicates = self.hierarchy.effective_reject_duplicate_edges();

        let outcome = atomically(self.store(), |tx| {
            let child_group = Self::require_group(tx, child)?;
            let parent_group = Self::require_group(tx, parent)?;
            dag_enforcement::check_relationship(tx, &child_group, &parent_group, &config)?;

            let edge = ChildGroupEdge::new(child_group.id, parent_group.id);
            let rows = tx.insert_child_edge(edge)?;
            if rows > 0 {
                return Ok(EdgeInsert::Created);
            }
            if reject_duplicates {
                return Err(HierarchyError::Duplicate {
                    child: child.to_string(),
                    parent: parent.to_string(),
                });
            }
            Ok(EdgeInsert::AlreadyPresent)
        });

        match &outcome {
            Ok(EdgeInsert::Created) => tracing::info!(child, parent, "created child relationship"),
            Ok(EdgeInsert::AlreadyPresent) => {
                tracing::debug!(child, parent, "child relationship already present")
            }
            Err(e) => tracing::warn!(child, parent, error = %e, "rejected child relationship"),
        }
        outcome
    }

    /// Remove the edge nesting `child` inside `parent`.
    /// Returns whether an edge was removed.
    pub fn remove_child_relationship(
        &self,
        child: &str,
        parent: &str,
    ) -> Result<bool, HierarchyError> {
        let child_group = Self::require_group(self.store(), child)?;
        let parent_group = Self::require_group(self.store(), parent)?;
        let rows = self
            .store
            .delete_child_edge(ChildGroupEdge::new(child_group.id, parent_group.id))?;
        tracing::info!(child, parent, removed = rows > 0, "remove child relationship");
        Ok(rows > 0)
    }

    /// Every stored relationship as `(child, parent)` names, in insertion order.
    pub fn child_relationships(&self) -> Result<Vec<(String, String)>, HierarchyError> {
        let names = self.group_names()?;
        Ok(self
            .store
            .list_child_edges()?
            .into_iter()
            .filter_map(|edge| {
                let child = names.get(&edge.child)?;
                let parent = names.get(&edge.parent)?;
                Some((child.clone(), parent.clone()))
            })
            .collect())
    }

    // --- Resolution ---

    /// Every group `group` is nested inside, nearest first.
    pub fn ancestors(&self, group: &str) -> Result<Vec<String>, HierarchyError> {
        let origin = Self::require_group(self.store(), group)?;
        let ids = traversal::ancestors_of(self.store(), origin.id, &self.traversal_config())?;
        traversal::names_of(self.store(), &ids)
    }

    /// Every group nested inside `group`, nearest first.
    pub fn descendants(&self, group: &str) -> Result<Vec<String>, HierarchyError> {
        let origin = Self::require_group(self.store(), group)?;
        let ids = traversal::descendants_of(self.store(), origin.id, &self.traversal_config())?;
        traversal::names_of(self.store(), &ids)
    }

    /// The host's direct group followed by its ancestors. Empty when the
    /// host has no direct group.
    pub fn effective_groups(&self, hostname: &str) -> Result<Vec<String>, HierarchyError> {
        let host = Self::require_host(self.store(), hostname)?;
        membership::effective_groups(self.store(), &host, &self.traversal_config())
    }

    /// The host's membership split into direct group and inherited names.
    pub fn split_membership(&self, hostname: &str) -> Result<Option<Membership>, HierarchyError> {
        let host = Self::require_host(self.store(), hostname)?;
        membership::resolve(self.store(), &host, &self.traversal_config())
    }

    // --- Projections ---

    pub fn build_inventory(&self) -> Result<Inventory, ProjectionError> {
        inventory::build_inventory(self.store())
    }

    /// The Ansible inventory as 4-space indented JSON.
    pub fn generate_inventory(&self) -> Result<Vec<u8>, ProjectionError> {
        to_pretty_json(&self.build_inventory()?)
    }

    pub fn build_scrape_targets(&self) -> Result<Vec<ScrapeTarget>, ProjectionError> {
        prometheus::build_scrape_targets(self.store(), &self.traversal_config())
    }

    /// The Prometheus target list as a 4-space indented JSON array.
    pub fn generate_prometheus_targets(&self) -> Result<Vec<u8>, ProjectionError> {
        to_pretty_json(&self.build_scrape_targets()?)
    }

    // --- Integrity ---

    /// Check the stored hierarchy for cycles, self-loops, and dangling edges.
    pub fn audit(&self) -> Result<HierarchyAudit, HierarchyError> {
        let snapshot = HierarchySnapshot::load(self.store())?;
        let audit = snapshot.audit();
        if audit.is_healthy() {
            tracing::debug!(
                groups = snapshot.node_count(),
                edges = snapshot.edge_count(),
                "hierarchy audit clean"
            );
        } else {
            tracing::warn!(
                cycles = audit.cycles.len(),
                self_loops = audit.self_loops.len(),
                dangling = audit.dangling_edges.len(),
                "hierarchy audit found problems"
            );
        }
        Ok(audit)
    }

    // --- Groups and hosts ---

    pub fn create_group(&self, group: &NewGroup) -> Result<GroupId, HierarchyError> {
        let id = self.store.upsert_group(group)?;
        tracing::info!(group = %group.name, %id, "upserted group");
        Ok(id)
    }

    /// Delete a group; its child and host edges go with it.
    pub fn delete_group(&self, name: &str) -> Result<(), HierarchyError> {
        let group = Self::require_group(self.store(), name)?;
        self.store.delete_group(group.id)?;
        tracing::info!(group = name, "deleted group");
        Ok(())
    }

    /// Upsert a host and, when `group` is given, make it the direct group.
    /// Both happen in one transaction; an unknown group writes nothing.
    pub fn create_host(
        &self,
        host: &NewHost,
        group: Option<&str>,
    ) -> Result<HostId, HierarchyError> {
        let id = atomically(self.store(), |tx| {
            let direct = group.map(|name| Self::require_group(tx, name)).transpose()?;
            let id = tx.upsert_host(host)?;
            if let Some(direct) = direct {
                tx.set_host_group(HostGroupEdge {
                    host: id,
                    group: direct.id,
                })?;
            }
            Ok(id)
        })?;
        tracing::info!(hostname = %host.hostname, %id, group, "upserted host");
        Ok(id)
    }

    pub fn delete_host(&self, hostname: &str) -> Result<(), HierarchyError> {
        let host = Self::require_host(self.store(), hostname)?;
        self.store.delete_host(host.id)?;
        tracing::info!(hostname, "deleted host");
        Ok(())
    }

    /// Look up one host by hostname or `hostname.domain`.
    pub fn host(&self, key: &str) -> Result<Host, HierarchyError> {
        Self::require_host(self.store(), key)
    }

    pub fn group(&self, name: &str) -> Result<Group, HierarchyError> {
        Self::require_group(self.store(), name)
    }

    /// Create `target` with the variables and flags of host `source`.
    ///
    /// `target` may be `hostname.domain`; a bare name keeps the source's
    /// domain. Group membership is not copied.
    pub fn copy_host(
        &self,
        source: &str,
        target: &str,
        address: &str,
        group: Option<&str>,
    ) -> Result<HostId, HierarchyError> {
        let existing = Self::require_host(self.store(), source)?;
        let (hostname, domain) = match target.split_once('.') {
            Some((hostname, domain)) => (hostname, domain),
            None => (target, existing.domain.as_str()),
        };
        if self.store.get_host_by_hostname(hostname)?.is_some() {
            return Err(HierarchyError::AlreadyExists {
                kind: "host",
                name: hostname.to_string(),
            });
        }
        let copy = NewHost::new(hostname, domain, address)
            .with_variables(existing.variables.as_str())
            .with_flags(existing.enabled, existing.monitored);
        let id = self.create_host(&copy, group)?;
        tracing::info!(source, target = hostname, "copied host");
        Ok(id)
    }

    /// Create `target` with the variables and flags of group `source`.
    pub fn copy_group(&self, source: &str, target: &str) -> Result<GroupId, HierarchyError> {
        let existing = Self::require_group(self.store(), source)?;
        if self.store.get_group_by_name(target)?.is_some() {
            return Err(HierarchyError::AlreadyExists {
                kind: "group",
                name: target.to_string(),
            });
        }
        let copy = NewGroup {
            name: target.to_string(),
            ..NewGroup::from(&existing)
        };
        let id = self.create_group(&copy)?;
        tracing::info!(source, target, "copied group");
        Ok(id)
    }

    /// Make `group` the host's direct group, replacing any previous one.
    pub fn set_host_group(&self, hostname: &str, group: &str) -> Result<(), HierarchyError> {
        let host = Self::require_host(self.store(), hostname)?;
        let group = Self::require_group(self.store(), group)?;
        self.store.set_host_group(HostGroupEdge {
            host: host.id,
            group: group.id,
        })?;
        Ok(())
    }

    /// Remove the host's assignment to `group`. Returns whether one existed.
    pub fn delete_host_group(&self, hostname: &str, group: &str) -> Result<bool, HierarchyError> {
        let host = Self::require_host(self.store(), hostname)?;
        let group = Self::require_group(self.store(), group)?;
        let rows = self.store.delete_host_group(HostGroupEdge {
            host: host.id,
            group: group.id,
        })?;
        Ok(rows > 0)
    }

    // --- Listing views ---

    pub fn list_group_summaries(&self) -> Result<Vec<GroupSummary>, HierarchyError> {
        let groups = self.store.list_groups()?;
        self.summarize_groups(groups)
    }

    pub fn search_group_summaries(
        &self,
        pattern: &str,
    ) -> Result<Vec<GroupSummary>, HierarchyError> {
        let groups = self.store.search_groups(pattern)?;
        self.summarize_groups(groups)
    }

    fn summarize_groups(&self, groups: Vec<Group>) -> Result<Vec<GroupSummary>, HierarchyError> {
        let names = self.group_names()?;
        let child_edges = self.store.list_child_edges()?;
        let host_edges = self.store.list_host_edges()?;
        Ok(groups
            .into_iter()
            .map(|group| {
                let child_names: Vec<String> = child_edges
                    .iter()
                    .filter(|edge| edge.parent == group.id)
                    .filter_map(|edge| names.get(&edge.child).cloned())
                    .collect();
                let num_hosts = host_edges.iter().filter(|e| e.group == group.id).count();
                GroupSummary {
                    num_children: child_names.len(),
                    num_hosts,
                    child_names,
                    group,
                }
            })
            .collect())
    }

    pub fn list_host_views(&self) -> Result<Vec<HostView>, HierarchyError> {
        let hosts = self.store.list_hosts()?;
        self.view_hosts(hosts)
    }

    pub fn search_host_views(&self, pattern: &str) -> Result<Vec<HostView>, HierarchyError> {
        let hosts = self.store.search_hosts(pattern)?;
        self.view_hosts(hosts)
    }

    fn view_hosts(&self, hosts: Vec<Host>) -> Result<Vec<HostView>, HierarchyError> {
        let config = self.traversal_config();
        hosts
            .into_iter()
            .map(|host| {
                let membership = membership::resolve(self.store(), &host, &config)?;
                let (direct_group, inherited_groups) = match membership {
                    Some(m) => (Some(m.direct.name), m.inherited.join(GROUP_LABEL_SEPARATOR)),
                    None => (None, String::new()),
                };
                Ok(HostView {
                    host,
                    direct_group,
                    inherited_groups,
                })
            })
            .collect()
    }

    /// Every direct host assignment, optionally limited to groups whose
    /// name contains `group_pattern`. Ordered by group, then hostname.
    pub fn host_assignments(
        &self,
        group_pattern: Option<&str>,
    ) -> Result<Vec<HostAssignment>, HierarchyError> {
        let groups: FxHashMap<GroupId, String> = match group_pattern {
            Some(pattern) => self.store.search_groups(pattern)?,
            None => self.store.list_groups()?,
        }
        .into_iter()
        .map(|g| (g.id, g.name))
        .collect();
        let hosts: FxHashMap<HostId, String> = self
            .store
            .list_hosts()?
            .into_iter()
            .map(|h| (h.id, h.hostname))
            .collect();

        let mut rows: Vec<HostAssignment> = self
            .store
            .list_host_edges()?
            .into_iter()
            .filter_map(|edge| {
                Some(HostAssignment {
                    group: groups.get(&edge.group)?.clone(),
                    group_id: edge.group,
                    hostname: hosts.get(&edge.host)?.clone(),
                    host_id: edge.host,
                })
            })
            .collect();
        rows.sort_by(|a, b| (&a.group, &a.hostname).cmp(&(&b.group, &b.hostname)));
        Ok(rows)
    }

    // --- Record documents ---

    /// Groups as JSON documents with parsed variables, all or those whose
    /// name contains `pattern`.
    pub fn group_documents(
        &self,
        pattern: Option<&str>,
    ) -> Result<Vec<GroupDocument>, ProjectionError> {
        let groups = match pattern {
            Some(pattern) => self.store.search_groups(pattern)?,
            None => self.store.list_groups()?,
        };
        records::group_documents(groups)
    }

    /// Hosts as JSON documents with parsed variables, all or those matching
    /// `pattern`. The documents re-import through `import_hosts`.
    pub fn host_documents(
        &self,
        pattern: Option<&str>,
    ) -> Result<Vec<HostDocument>, ProjectionError> {
        let hosts = match pattern {
            Some(pattern) => self.store.search_hosts(pattern)?,
            None => self.store.list_hosts()?,
        };
        records::host_documents(self.store(), hosts)
    }

    fn group_names(&self) -> Result<FxHashMap<GroupId, String>, HierarchyError> {
        Ok(self
            .store
            .list_groups()?
            .into_iter()
            .map(|group| (group.id, group.name))
            .collect())
    }

    // --- Bulk import ---

    pub fn import_groups(&self, json: &str) -> Result<ImportSummary, ImportError> {
        import::import_groups(self, json)
    }

    pub fn import_hosts(&self, json: &str) -> Result<ImportSummary, ImportError> {
        import::import_hosts(self, json)
    }

    pub fn import_children(&self, json: &str) -> Result<ImportSummary, ImportError> {
        import::import_children(self, json)
    }
}
