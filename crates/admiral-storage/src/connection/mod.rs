//! Connection management: write-serialized + read-pooled.

pub mod pool;
pub mod pragmas;
pub mod writer;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use admiral_core::config::StorageConfig;
use admiral_core::constants::DEFAULT_BUSY_TIMEOUT_MS;
use admiral_core::errors::StorageError;
use rusqlite::Connection;

use self::pool::ReadPool;
use self::pragmas::apply_pragmas;
use crate::migrations;

/// Manages the single write connection and the read connection pool.
pub struct DatabaseManager {
    writer: Mutex<Connection>,
    /// `None` for in-memory databases: a second in-memory connection is a
    /// separate database, so reads go through the writer instead.
    readers: Option<ReadPool>,
    path: Option<PathBuf>,
}

impl DatabaseManager {
    /// Open a database at the given path, apply pragmas, run migrations.
    pub fn open(path: &Path, config: &StorageConfig) -> Result<Self, StorageError> {
        let busy_timeout_ms = config.effective_busy_timeout_ms();
        let writer = Connection::open(path).map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
        apply_pragmas(&writer, busy_timeout_ms)?;
        migrations::run_migrations(&writer)?;

        let readers = ReadPool::open(path, config.effective_read_pool_size(), busy_timeout_ms)?;
        tracing::info!(
            path = %path.display(),
            readers = readers.size(),
            "opened inventory database"
        );

        Ok(Self {
            writer: Mutex::new(writer),
            readers: Some(readers),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let writer = Connection::open_in_memory().map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
        apply_pragmas(&writer, DEFAULT_BUSY_TIMEOUT_MS)?;
        migrations::run_migrations(&writer)?;

        Ok(Self {
            writer: Mutex::new(writer),
            readers: None,
            path: None,
        })
    }

    /// Execute a write operation with the serialized writer connection.
    /// The writer stays locked until `f` returns.
    pub fn with_writer<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Connection) -> Result<T, E>,
        E: From<StorageError>,
    {
        let guard = self.writer.lock().map_err(|_| StorageError::LockPoisoned {
            message: "write lock poisoned".to_string(),
        })?;
        f(&guard)
    }

    /// Execute a read operation on the best available connection.
    /// File-backed: the read pool. In-memory: the writer.
    pub fn with_reader<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Connection) -> Result<T, E>,
        E: From<StorageError>,
    {
        match &self.readers {
            Some(pool) => pool.with_conn(f),
            None => self.with_writer(f),
        }
    }

    /// Get the database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of pooled read connections (0 for in-memory).
    pub fn read_pool_size(&self) -> usize {
        self.readers.as_ref().map_or(0, ReadPool::size)
    }
}
