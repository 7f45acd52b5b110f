//! # admiral-core
//!
//! Foundation crate for the Admiral inventory.
//! Defines the inventory model, the relationship-store trait, errors,
//! layered configuration, and tracing setup. Every other crate in the
//! workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod traits;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::AdmiralConfig;
pub use errors::{AdmiralError, HierarchyError, ProjectionError, StorageError};
pub use traits::InventoryStorage;
pub use types::{ChildGroupEdge, Group, GroupId, Host, HostGroupEdge, HostId};
