//! StorageEngine: owns the DatabaseManager and implements InventoryStorage.

use std::path::Path;

use admiral_core::config::StorageConfig;
use admiral_core::errors::{HierarchyError, StorageError};
use admiral_core::traits::InventoryStorage;
use admiral_core::types::{
    ChildGroupEdge, Group, GroupId, GroupRef, Host, HostGroupEdge, HostId, NewGroup, NewHost,
};
use rusqlite::Connection;

use crate::connection::writer::with_immediate_transaction;
use crate::connection::DatabaseManager;
use crate::queries::{child_groups, groups, host_groups, hosts};

/// The main storage engine. Reads use the pool when file-backed, writes
/// and transactions are serialized on the single writer connection.
pub struct StorageEngine {
    db: DatabaseManager,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path, config: &StorageConfig) -> Result<Self, StorageError> {
        Ok(Self {
            db: DatabaseManager::open(path, config)?,
        })
    }

    /// Open the database named by `config.db_path`.
    pub fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        Self::open(&config.effective_db_path(), config)
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Ok(Self {
            db: DatabaseManager::open_in_memory()?,
        })
    }

    /// Get a reference to the database manager (for advanced operations).
    pub fn database(&self) -> &DatabaseManager {
        &self.db
    }
}

impl InventoryStorage for StorageEngine {
    fn get_group(&self, id: GroupId) -> Result<Option<Group>, StorageError> {
        self.db.with_reader(|conn| groups::get_group(conn, id))
    }

    fn get_group_by_name(&self, name: &str) -> Result<Option<Group>, StorageError> {
        self.db.with_reader(|conn| groups::get_group_by_name(conn, name))
    }

    fn list_groups(&self) -> Result<Vec<Group>, StorageError> {
        self.db.with_reader(groups::list_groups)
    }

    fn search_groups(&self, pattern: &str) -> Result<Vec<Group>, StorageError> {
        self.db.with_reader(|conn| groups::search_groups(conn, pattern))
    }

    fn upsert_group(&self, group: &NewGroup) -> Result<GroupId, StorageError> {
        self.db.with_writer(|conn| groups::upsert_group(conn, group))
    }

    fn delete_group(&self, id: GroupId) -> Result<usize, StorageError> {
        self.db.with_writer(|conn| groups::delete_group(conn, id))
    }

    fn get_host(&self, id: HostId) -> Result<Option<Host>, StorageError> {
        self.db.with_reader(|conn| hosts::get_host(conn, id))
    }

    fn get_host_by_hostname(&self, hostname: &str) -> Result<Option<Host>, StorageError> {
        self.db.with_reader(|conn| hosts::get_host_by_hostname(conn, hostname))
    }

    fn list_hosts(&self) -> Result<Vec<Host>, StorageError> {
        self.db.with_reader(hosts::list_hosts)
    }

    fn search_hosts(&self, pattern: &str) -> Result<Vec<Host>, StorageError> {
        self.db.with_reader(|conn| hosts::search_hosts(conn, pattern))
    }

    fn upsert_host(&self, host: &NewHost) -> Result<HostId, StorageError> {
        self.db.with_writer(|conn| hosts::upsert_host(conn, host))
    }

    fn delete_host(&self, id: HostId) -> Result<usize, StorageError> {
        self.db.with_writer(|conn| hosts::delete_host(conn, id))
    }

    fn child_edges_by_child(&self, child: GroupId) -> Result<Vec<ChildGroupEdge>, StorageError> {
        self.db.with_reader(|conn| child_groups::edges_by_child(conn, child))
    }

    fn child_edges_by_parent(
        &self,
        parent: GroupId,
    ) -> Result<Vec<ChildGroupEdge>, StorageError> {
        self.db.with_reader(|conn| child_groups::edges_by_parent(conn, parent))
    }

    fn list_child_edges(&self) -> Result<Vec<ChildGroupEdge>, StorageError> {
        self.db.with_reader(child_groups::list_child_edges)
    }

    fn insert_child_edge(&self, edge: ChildGroupEdge) -> Result<usize, StorageError> {
        self.db.with_writer(|conn| child_groups::insert_child_edge(conn, edge))
    }

    fn delete_child_edge(&self, edge: ChildGroupEdge) -> Result<usize, StorageError> {
        self.db.with_writer(|conn| child_groups::delete_child_edge(conn, edge))
    }

    fn host_direct_group(&self, host: HostId) -> Result<Option<GroupRef>, StorageError> {
        self.db.with_reader(|conn| host_groups::host_direct_group(conn, host))
    }

    fn list_host_edges(&self) -> Result<Vec<HostGroupEdge>, StorageError> {
        self.db.with_reader(host_groups::list_host_edges)
    }

    fn set_host_group(&self, edge: HostGroupEdge) -> Result<usize, StorageError> {
        self.db.with_writer(|conn| host_groups::set_host_group(conn, edge))
    }

    fn delete_host_group(&self, edge: HostGroupEdge) -> Result<usize, StorageError> {
        self.db.with_writer(|conn| host_groups::delete_host_group(conn, edge))
    }

    /// Holds the writer for the whole of `work`. Calling back into this
    /// engine (rather than the view handed to `work`) from inside `work`
    /// would deadlock.
    fn in_transaction(
        &self,
        work: &mut dyn FnMut(&dyn InventoryStorage) -> Result<(), HierarchyError>,
    ) -> Result<(), HierarchyError> {
        self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| work(&TransactionView { conn: tx }))
        })
    }
}

/// Store view over a connection that is already inside a transaction.
/// Reads see the transaction's own uncommitted writes.
struct TransactionView<'conn> {
    conn: &'conn Connection,
}

impl InventoryStorage for TransactionView<'_> {
    fn get_group(&self, id: GroupId) -> Result<Option<Group>, StorageError> {
        groups::get_group(self.conn, id)
    }

    fn get_group_by_name(&self, name: &str) -> Result<Option<Group>, StorageError> {
        groups::get_group_by_name(self.conn, name)
    }

    fn list_groups(&self) -> Result<Vec<Group>, StorageError> {
        groups::list_groups(self.conn)
    }

    fn search_groups(&self, pattern: &str) -> Result<Vec<Group>, StorageError> {
        groups::search_groups(self.conn, pattern)
    }

    fn upsert_group(&self, group: &NewGroup) -> Result<GroupId, StorageError> {
        groups::upsert_group(self.conn, group)
    }

    fn delete_group(&self, id: GroupId) -> Result<usize, StorageError> {
        groups::delete_group(self.conn, id)
    }

    fn get_host(&self, id: HostId) -> Result<Option<Host>, StorageError> {
        hosts::get_host(self.conn, id)
    }

    fn get_host_by_hostname(&self, hostname: &str) -> Result<Option<Host>, StorageError> {
        hosts::get_host_by_hostname(self.conn, hostname)
    }

    fn list_hosts(&self) -> Result<Vec<Host>, StorageError> {
        hosts::list_hosts(self.conn)
    }

    fn search_hosts(&self, pattern: &str) -> Result<Vec<Host>, StorageError> {
        hosts::search_hosts(self.conn, pattern)
    }

    fn upsert_host(&self, host: &NewHost) -> Result<HostId, StorageError> {
        hosts::upsert_host(self.conn, host)
    }

    fn delete_host(&self, id: HostId) -> Result<usize, StorageError> {
        hosts::delete_host(self.conn, id)
    }

    fn child_edges_by_child(&self, child: GroupId) -> Result<Vec<ChildGroupEdge>, StorageError> {
        child_groups::edges_by_child(self.conn, child)
    }

    fn child_edges_by_parent(
        &self,
        parent: GroupId,
    ) -> Result<Vec<ChildGroupEdge>, StorageError> {
        child_groups::edges_by_parent(self.conn, parent)
    }

    fn list_child_edges(&self) -> Result<Vec<ChildGroupEdge>, StorageError> {
        child_groups::list_child_edges(self.conn)
    }

    fn insert_child_edge(&self, edge: ChildGroupEdge) -> Result<usize, StorageError> {
        child_groups::insert_child_edge(self.conn, edge)
    }

    fn delete_child_edge(&self, edge: ChildGroupEdge) -> Result<usize, StorageError> {
        child_groups::delete_child_edge(self.conn, edge)
    }

    fn host_direct_group(&self, host: HostId) -> Result<Option<GroupRef>, StorageError> {
        host_groups::host_direct_group(self.conn, host)
    }

    fn list_host_edges(&self) -> Result<Vec<HostGroupEdge>, StorageError> {
        host_groups::list_host_edges(self.conn)
    }

    fn set_host_group(&self, edge: HostGroupEdge) -> Result<usize, StorageError> {
        host_groups::set_host_group(self.conn, edge)
    }

    fn delete_host_group(&self, edge: HostGroupEdge) -> Result<usize, StorageError> {
        host_groups::delete_host_group(self.conn, edge)
    }

    /// Already inside a transaction: `work` joins it, and an error rolls
    /// back the enclosing transaction as a whole.
    fn in_transaction(
        &self,
        work: &mut dyn FnMut(&dyn InventoryStorage) -> Result<(), HierarchyError>,
    ) -> Result<(), HierarchyError> {
        work(self)
    }
}
