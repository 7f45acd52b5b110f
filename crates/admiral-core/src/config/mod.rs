//! Configuration system for Admiral.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod admiral_config;
pub mod defaults_config;
pub mod hierarchy_config;
pub mod storage_config;

pub use admiral_config::{AdmiralConfig, CliOverrides};
pub use defaults_config::DefaultsConfig;
pub use hierarchy_config::HierarchyConfig;
pub use storage_config::StorageConfig;
