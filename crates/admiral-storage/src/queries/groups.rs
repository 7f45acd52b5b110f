//! inventory_groups table queries.

use admiral_core::errors::StorageError;
use admiral_core::types::{Group, GroupId, NewGroup};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::contains_pattern;
use crate::to_storage_error;

const GROUP_COLUMNS: &str = "id, name, variables, enabled, monitored";

fn row_to_group(row: &Row<'_>) -> rusqlite::Result<Group> {
    Ok(Group {
        id: GroupId::new(row.get(0)?),
        name: row.get(1)?,
        variables: row.get(2)?,
        enabled: row.get(3)?,
        monitored: row.get(4)?,
    })
}

fn collect_groups(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<Group>, StorageError> {
    let mut stmt = conn.prepare_cached(sql).map_err(to_storage_error)?;
    let rows = stmt
        .query_map(params, row_to_group)
        .map_err(to_storage_error)?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(to_storage_error)
}

/// Insert a group, or replace variables and flags of the group with the
/// same name. Returns the group's id either way.
pub fn upsert_group(conn: &Connection, group: &NewGroup) -> Result<GroupId, StorageError> {
    conn.prepare_cached(
        "INSERT INTO inventory_groups (name, variables, enabled, monitored)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(name) DO UPDATE SET
             variables = excluded.variables,
             enabled = excluded.enabled,
             monitored = excluded.monitored
         RETURNING id",
    )
    .map_err(to_storage_error)?
    .query_row(
        params![group.name, group.variables, group.enabled, group.monitored],
        |row| row.get(0),
    )
    .map(GroupId::new)
    .map_err(to_storage_error)
}

pub fn get_group(conn: &Connection, id: GroupId) -> Result<Option<Group>, StorageError> {
    conn.prepare_cached(&format!(
        "SELECT {GROUP_COLUMNS} FROM inventory_groups WHERE id = ?1"
    ))
    .map_err(to_storage_error)?
    .query_row(params![id.get()], row_to_group)
    .optional()
    .map_err(to_storage_error)
}

pub fn get_group_by_name(conn: &Connection, name: &str) -> Result<Option<Group>, StorageError> {
    conn.prepare_cached(&format!(
        "SELECT {GROUP_COLUMNS} FROM inventory_groups WHERE name = ?1"
    ))
    .map_err(to_storage_error)?
    .query_row(params![name], row_to_group)
    .optional()
    .map_err(to_storage_error)
}

/// All groups in insertion order.
pub fn list_groups(conn: &Connection) -> Result<Vec<Group>, StorageError> {
    collect_groups(
        conn,
        &format!("SELECT {GROUP_COLUMNS} FROM inventory_groups ORDER BY id"),
        [],
    )
}

/// Groups whose name contains `needle` (ASCII case-insensitive).
pub fn search_groups(conn: &Connection, needle: &str) -> Result<Vec<Group>, StorageError> {
    collect_groups(
        conn,
        &format!(
            "SELECT {GROUP_COLUMNS} FROM inventory_groups
             WHERE name LIKE ?1 ESCAPE '\\' ORDER BY id"
        ),
        params![contains_pattern(needle)],
    )
}

/// Delete a group. Child-group and host-group edges referencing it are
/// removed by `ON DELETE CASCADE`.
pub fn delete_group(conn: &Connection, id: GroupId) -> Result<usize, StorageError> {
    conn.prepare_cached("DELETE FROM inventory_groups WHERE id = ?1")
        .map_err(to_storage_error)?
        .execute(params![id.get()])
        .map_err(to_storage_error)
}
