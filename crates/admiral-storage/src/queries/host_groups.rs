//! host_groups table queries.

use admiral_core::errors::StorageError;
use admiral_core::types::{GroupId, GroupRef, HostGroupEdge, HostId};
use rusqlite::{params, Connection, OptionalExtension};

use crate::to_storage_error;

/// Assign a host's direct group, replacing any previous assignment.
pub fn set_host_group(conn: &Connection, edge: HostGroupEdge) -> Result<usize, StorageError> {
    conn.prepare_cached(
        "INSERT INTO host_groups (host_id, group_id) VALUES (?1, ?2)
         ON CONFLICT(host_id) DO UPDATE SET group_id = excluded.group_id",
    )
    .map_err(to_storage_error)?
    .execute(params![edge.host.get(), edge.group.get()])
    .map_err(to_storage_error)
}

pub fn delete_host_group(conn: &Connection, edge: HostGroupEdge) -> Result<usize, StorageError> {
    conn.prepare_cached("DELETE FROM host_groups WHERE host_id = ?1 AND group_id = ?2")
        .map_err(to_storage_error)?
        .execute(params![edge.host.get(), edge.group.get()])
        .map_err(to_storage_error)
}

/// The host's direct group, if it has one.
pub fn host_direct_group(
    conn: &Connection,
    host: HostId,
) -> Result<Option<GroupRef>, StorageError> {
    conn.prepare_cached(
        "SELECT g.id, g.name, g.enabled, g.monitored
         FROM host_groups hg
         JOIN inventory_groups g ON g.id = hg.group_id
         WHERE hg.host_id = ?1",
    )
    .map_err(to_storage_error)?
    .query_row(params![host.get()], |row| {
        Ok(GroupRef {
            id: GroupId::new(row.get(0)?),
            name: row.get(1)?,
            enabled: row.get(2)?,
            monitored: row.get(3)?,
        })
    })
    .optional()
    .map_err(to_storage_error)
}

/// All host assignments in insertion order.
pub fn list_host_edges(conn: &Connection) -> Result<Vec<HostGroupEdge>, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT host_id, group_id FROM host_groups ORDER BY id")
        .map_err(to_storage_error)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(HostGroupEdge {
                host: HostId::new(row.get(0)?),
                group: GroupId::new(row.get(1)?),
            })
        })
        .map_err(to_storage_error)?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(to_storage_error)
}
