//! Trait seams between the hierarchy engine and its collaborators.

pub mod storage;

pub use storage::{atomically, InventoryStorage, SharedStorage};
