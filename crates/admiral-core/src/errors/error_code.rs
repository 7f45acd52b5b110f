//! AdmiralErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this to expose a structured code string
/// alongside its human-readable message.
pub trait AdmiralErrorCode {
    /// Returns the error code string (e.g., "RELATIONSHIP_LOOP").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const DB_BUSY: &str = "DB_BUSY";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const FOREIGN_KEY_VIOLATION: &str = "FOREIGN_KEY_VIOLATION";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SELF_REFERENCE: &str = "SELF_REFERENCE";
pub const RELATIONSHIP_LOOP: &str = "RELATIONSHIP_LOOP";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const DUPLICATE: &str = "DUPLICATE";
pub const ALREADY_EXISTS: &str = "ALREADY_EXISTS";
pub const DEPTH_EXCEEDED: &str = "DEPTH_EXCEEDED";
pub const MALFORMED_VARIABLES: &str = "MALFORMED_VARIABLES";
pub const PROJECTION_ERROR: &str = "PROJECTION_ERROR";
pub const IMPORT_ERROR: &str = "IMPORT_ERROR";
