//! Configuration errors.

use super::error_code::{self, AdmiralErrorCode};

/// Raised while layering config files and validating the merged result.
/// `path` is `<string>` for inline TOML.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {message}")]
    Unreadable { path: String, message: String },

    #[error("Invalid TOML in {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Invalid value for {field}: {message}")]
    ValidationFailed { field: String, message: String },
}

impl AdmiralErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}
