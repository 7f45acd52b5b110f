//! child_groups table queries.
//!
//! Rows are always returned in insertion order so traversals break ties
//! the same way on every run.

use admiral_core::errors::StorageError;
use admiral_core::types::{ChildGroupEdge, GroupId};
use rusqlite::{params, Connection, Row};

use crate::to_storage_error;

fn row_to_edge(row: &Row<'_>) -> rusqlite::Result<ChildGroupEdge> {
    Ok(ChildGroupEdge::new(
        GroupId::new(row.get(0)?),
        GroupId::new(row.get(1)?),
    ))
}

fn collect_edges(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<ChildGroupEdge>, StorageError> {
    let mut stmt = conn.prepare_cached(sql).map_err(to_storage_error)?;
    let rows = stmt.query_map(params, row_to_edge).map_err(to_storage_error)?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(to_storage_error)
}

/// Insert an edge. Returns 0 when the pair already exists.
pub fn insert_child_edge(conn: &Connection, edge: ChildGroupEdge) -> Result<usize, StorageError> {
    let rows = conn
        .prepare_cached(
            "INSERT INTO child_groups (child_id, parent_id) VALUES (?1, ?2)
             ON CONFLICT(child_id, parent_id) DO NOTHING",
        )
        .map_err(to_storage_error)?
        .execute(params![edge.child.get(), edge.parent.get()])
        .map_err(to_storage_error)?;
    tracing::debug!(child = %edge.child, parent = %edge.parent, rows, "insert child edge");
    Ok(rows)
}

pub fn delete_child_edge(conn: &Connection, edge: ChildGroupEdge) -> Result<usize, StorageError> {
    conn.prepare_cached("DELETE FROM child_groups WHERE child_id = ?1 AND parent_id = ?2")
        .map_err(to_storage_error)?
        .execute(params![edge.child.get(), edge.parent.get()])
        .map_err(to_storage_error)
}

/// Edges whose child is `child`: its direct parents.
pub fn edges_by_child(
    conn: &Connection,
    child: GroupId,
) -> Result<Vec<ChildGroupEdge>, StorageError> {
    collect_edges(
        conn,
        "SELECT child_id, parent_id FROM child_groups WHERE child_id = ?1 ORDER BY id",
        params![child.get()],
    )
}

/// Edges whose parent is `parent`: its direct children.
pub fn edges_by_parent(
    conn: &Connection,
    parent: GroupId,
) -> Result<Vec<ChildGroupEdge>, StorageError> {
    collect_edges(
        conn,
        "SELECT child_id, parent_id FROM child_groups WHERE parent_id = ?1 ORDER BY id",
        params![parent.get()],
    )
}

pub fn list_child_edges(conn: &Connection) -> Result<Vec<ChildGroupEdge>, StorageError> {
    collect_edges(
        conn,
        "SELECT child_id, parent_id FROM child_groups ORDER BY id",
        [],
    )
}
