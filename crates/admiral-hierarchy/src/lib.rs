//! # admiral-hierarchy
//!
//! The group-hierarchy resolution engine. Keeps the containment graph
//! acyclic, computes ancestor/descendant closures, resolves each host's
//! effective groups, and projects the inventory into Ansible and
//! Prometheus JSON. All I/O goes through an injected
//! [`InventoryStorage`](admiral_core::traits::InventoryStorage).

pub mod engine;
pub mod graph;
pub mod import;
pub mod membership;
pub mod projection;
pub mod traversal;

pub use engine::{EdgeInsert, HierarchyEngine};
pub use graph::snapshot::HierarchyAudit;
pub use import::ImportSummary;
pub use membership::Membership;
pub use projection::inventory::{Inventory, InventoryGroup};
pub use projection::prometheus::{ScrapeTarget, TargetLabels};
pub use projection::records::{GroupDocument, HostDocument};
pub use traversal::{Direction, TraversalConfig};
