//! V001: Initial schema.
//! inventory_groups, inventory_hosts, child_groups, host_groups.

pub const MIGRATION_SQL: &str = r#"
-- Groups: name is the natural key used by every caller.
CREATE TABLE IF NOT EXISTS inventory_groups (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    variables TEXT NOT NULL DEFAULT '{}',
    enabled INTEGER NOT NULL DEFAULT 1,
    monitored INTEGER NOT NULL DEFAULT 1
) STRICT;

-- Hosts: hostname is the natural key; address is the connection address.
CREATE TABLE IF NOT EXISTS inventory_hosts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    address TEXT NOT NULL,
    hostname TEXT NOT NULL UNIQUE,
    domain TEXT NOT NULL DEFAULT '',
    variables TEXT NOT NULL DEFAULT '{}',
    enabled INTEGER NOT NULL DEFAULT 1,
    monitored INTEGER NOT NULL DEFAULT 1
) STRICT;

-- Group containment: child is nested inside parent.
-- Acyclicity beyond self-loops is enforced by the hierarchy engine.
CREATE TABLE IF NOT EXISTS child_groups (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    child_id INTEGER NOT NULL REFERENCES inventory_groups(id) ON DELETE CASCADE,
    parent_id INTEGER NOT NULL REFERENCES inventory_groups(id) ON DELETE CASCADE,
    UNIQUE (child_id, parent_id),
    CHECK (child_id <> parent_id)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_child_groups_parent
    ON child_groups(parent_id);

-- Direct group assignment: at most one per host.
CREATE TABLE IF NOT EXISTS host_groups (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    host_id INTEGER NOT NULL UNIQUE REFERENCES inventory_hosts(id) ON DELETE CASCADE,
    group_id INTEGER NOT NULL REFERENCES inventory_groups(id) ON DELETE CASCADE
) STRICT;

CREATE INDEX IF NOT EXISTS idx_host_groups_group
    ON host_groups(group_id);
"#;
