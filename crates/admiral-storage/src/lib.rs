//! # admiral-storage
//!
//! SQLite-backed relationship store for the Admiral inventory.
//! One serialized write connection, a round-robin read pool, schema
//! migrations, and per-table query modules behind [`StorageEngine`].

pub mod connection;
pub mod engine;
pub mod migrations;
pub mod queries;
mod sqlite_error;

pub use connection::DatabaseManager;
pub use engine::StorageEngine;
pub(crate) use sqlite_error::to_storage_error;
