//! Storage configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_DB_FILENAME, DEFAULT_READ_POOL_SIZE};

/// Configuration for the SQLite relationship store.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the SQLite database file. Default: `admiral.db`.
    pub db_path: Option<String>,
    /// Number of read connections in the pool. Default: 4.
    pub read_pool_size: Option<usize>,
    /// Busy timeout in milliseconds. Default: 5000.
    pub busy_timeout_ms: Option<u32>,
}

impl StorageConfig {
    pub fn effective_db_path(&self) -> PathBuf {
        PathBuf::from(self.db_path.as_deref().unwrap_or(DEFAULT_DB_FILENAME))
    }

    pub fn effective_read_pool_size(&self) -> usize {
        self.read_pool_size.unwrap_or(DEFAULT_READ_POOL_SIZE)
    }

    pub fn effective_busy_timeout_ms(&self) -> u32 {
        self.busy_timeout_ms.unwrap_or(DEFAULT_BUSY_TIMEOUT_MS)
    }
}
