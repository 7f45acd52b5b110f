//! inventory_hosts table queries.

use admiral_core::errors::StorageError;
use admiral_core::types::{Host, HostId, NewHost};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::contains_pattern;
use crate::to_storage_error;

const HOST_COLUMNS: &str = "id, address, hostname, domain, variables, enabled, monitored";

fn row_to_host(row: &Row<'_>) -> rusqlite::Result<Host> {
    Ok(Host {
        id: HostId::new(row.get(0)?),
        address: row.get(1)?,
        hostname: row.get(2)?,
        domain: row.get(3)?,
        variables: row.get(4)?,
        enabled: row.get(5)?,
        monitored: row.get(6)?,
    })
}

fn collect_hosts(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<Host>, StorageError> {
    let mut stmt = conn.prepare_cached(sql).map_err(to_storage_error)?;
    let rows = stmt.query_map(params, row_to_host).map_err(to_storage_error)?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(to_storage_error)
}

/// Insert a host, or replace every other field of the host with the same
/// hostname. Returns the host's id either way.
pub fn upsert_host(conn: &Connection, host: &NewHost) -> Result<HostId, StorageError> {
    conn.prepare_cached(
        "INSERT INTO inventory_hosts
             (address, hostname, domain, variables, enabled, monitored)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(hostname) DO UPDATE SET
             address = excluded.address,
             domain = excluded.domain,
             variables = excluded.variables,
             enabled = excluded.enabled,
             monitored = excluded.monitored
         RETURNING id",
    )
    .map_err(to_storage_error)?
    .query_row(
        params![
            host.address,
            host.hostname,
            host.domain,
            host.variables,
            host.enabled,
            host.monitored,
        ],
        |row| row.get(0),
    )
    .map(HostId::new)
    .map_err(to_storage_error)
}

pub fn get_host(conn: &Connection, id: HostId) -> Result<Option<Host>, StorageError> {
    conn.prepare_cached(&format!(
        "SELECT {HOST_COLUMNS} FROM inventory_hosts WHERE id = ?1"
    ))
    .map_err(to_storage_error)?
    .query_row(params![id.get()], row_to_host)
    .optional()
    .map_err(to_storage_error)
}

pub fn get_host_by_hostname(
    conn: &Connection,
    hostname: &str,
) -> Result<Option<Host>, StorageError> {
    conn.prepare_cached(&format!(
        "SELECT {HOST_COLUMNS} FROM inventory_hosts WHERE hostname = ?1"
    ))
    .map_err(to_storage_error)?
    .query_row(params![hostname], row_to_host)
    .optional()
    .map_err(to_storage_error)
}

/// All hosts in insertion order.
pub fn list_hosts(conn: &Connection) -> Result<Vec<Host>, StorageError> {
    collect_hosts(
        conn,
        &format!("SELECT {HOST_COLUMNS} FROM inventory_hosts ORDER BY id"),
        [],
    )
}

/// Hosts whose hostname or address contains `needle`.
pub fn search_hosts(conn: &Connection, needle: &str) -> Result<Vec<Host>, StorageError> {
    collect_hosts(
        conn,
        &format!(
            "SELECT {HOST_COLUMNS} FROM inventory_hosts
             WHERE hostname LIKE ?1 ESCAPE '\\' OR address LIKE ?1 ESCAPE '\\'
             ORDER BY id"
        ),
        params![contains_pattern(needle)],
    )
}

/// Delete a host. Its direct group assignment goes with it.
pub fn delete_host(conn: &Connection, id: HostId) -> Result<usize, StorageError> {
    conn.prepare_cached("DELETE FROM inventory_hosts WHERE id = ?1")
        .map_err(to_storage_error)?
        .execute(params![id.get()])
        .map_err(to_storage_error)
}
