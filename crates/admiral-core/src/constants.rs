//! Shared constants for the Admiral inventory.

/// Default SQLite database file name.
pub const DEFAULT_DB_FILENAME: &str = "admiral.db";

/// Default number of read connections in the pool.
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

/// Default SQLite busy timeout in milliseconds.
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;

/// Default ceiling on hierarchy traversal depth.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Variables blob stored for hosts and groups created without any.
pub const EMPTY_VARIABLES: &str = "{}";

/// Top-level inventory key that carries per-host variables.
pub const INVENTORY_META_KEY: &str = "_meta";

/// Key under `_meta` holding the host variables map.
pub const INVENTORY_HOSTVARS_KEY: &str = "hostvars";

/// Host variable injected with the host's connection address.
pub const ANSIBLE_HOST_KEY: &str = "ansible_ssh_host";

/// Separator for the joined inherited-groups label.
pub const GROUP_LABEL_SEPARATOR: &str = ",";
