//! Top-level Admiral configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{DefaultsConfig, HierarchyConfig, StorageConfig};
use crate::errors::ConfigError;

/// Project-level config file name, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "admiral.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`ADMIRAL_*`)
/// 3. Project config (`admiral.toml` in the working directory)
/// 4. User config (`~/.admiral/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AdmiralConfig {
    pub storage: StorageConfig,
    pub defaults: DefaultsConfig,
    pub hierarchy: HierarchyConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub db_path: Option<String>,
    pub max_depth: Option<usize>,
    pub reject_duplicate_edges: Option<bool>,
}

impl AdmiralConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                Self::merge_toml_file(&mut config, &user_config_path)?;
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        ::tracing::debug!(
            db_path = %config.storage.effective_db_path().display(),
            max_depth = config.hierarchy.effective_max_depth(),
            "configuration resolved"
        );

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &AdmiralConfig) -> Result<(), ConfigError> {
        if config.hierarchy.max_depth == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "hierarchy.max_depth".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.storage.read_pool_size == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "storage.read_pool_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(ref path) = config.storage.db_path {
            if path.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "storage.db_path".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.admiral/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".admiral").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut AdmiralConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let file_config: AdmiralConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a value.
    fn merge(base: &mut AdmiralConfig, other: &AdmiralConfig) {
        // Storage
        if other.storage.db_path.is_some() {
            base.storage.db_path = other.storage.db_path.clone();
        }
        if other.storage.read_pool_size.is_some() {
            base.storage.read_pool_size = other.storage.read_pool_size;
        }
        if other.storage.busy_timeout_ms.is_some() {
            base.storage.busy_timeout_ms = other.storage.busy_timeout_ms;
        }

        // Defaults
        if other.defaults.domain.is_some() {
            base.defaults.domain = other.defaults.domain.clone();
        }
        if other.defaults.enabled.is_some() {
            base.defaults.enabled = other.defaults.enabled;
        }
        if other.defaults.monitored.is_some() {
            base.defaults.monitored = other.defaults.monitored;
        }

        // Hierarchy
        if other.hierarchy.max_depth.is_some() {
            base.hierarchy.max_depth = other.hierarchy.max_depth;
        }
        if other.hierarchy.reject_duplicate_edges.is_some() {
            base.hierarchy.reject_duplicate_edges = other.hierarchy.reject_duplicate_edges;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `ADMIRAL_DB_PATH`, `ADMIRAL_MAX_DEPTH`, etc.
    fn apply_env_overrides(config: &mut AdmiralConfig) {
        if let Ok(val) = std::env::var("ADMIRAL_DB_PATH") {
            config.storage.db_path = Some(val);
        }
        if let Ok(val) = std::env::var("ADMIRAL_READ_POOL_SIZE") {
            if let Ok(v) = val.parse::<usize>() {
                config.storage.read_pool_size = Some(v);
            }
        }
        if let Ok(val) = std::env::var("ADMIRAL_DEFAULT_DOMAIN") {
            config.defaults.domain = Some(val);
        }
        if let Ok(val) = std::env::var("ADMIRAL_MAX_DEPTH") {
            if let Ok(v) = val.parse::<usize>() {
                config.hierarchy.max_depth = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut AdmiralConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.db_path {
            config.storage.db_path = Some(v.clone());
        }
        if let Some(v) = cli.max_depth {
            config.hierarchy.max_depth = Some(v);
        }
        if let Some(v) = cli.reject_duplicate_edges {
            config.hierarchy.reject_duplicate_edges = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
