//! Inventory model: groups, hosts, and the two relationship tables.
//! Edge types carry ids only; names are resolved on read.

pub mod edges;
pub mod group;
pub mod host;
pub mod identifiers;

pub use edges::{ChildGroupEdge, GroupRef, HostAssignment, HostGroupEdge};
pub use group::{Group, GroupSummary, NewGroup};
pub use host::{Host, HostView, NewHost};
pub use identifiers::{GroupId, HostId};

pub use rustc_hash::{FxHashMap, FxHashSet};
