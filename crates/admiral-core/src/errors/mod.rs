//! Error handling for Admiral.
//! One error enum per subsystem, `thiserror` only.

pub mod admiral_error;
pub mod config_error;
pub mod error_code;
pub mod hierarchy_error;
pub mod import_error;
pub mod projection_error;
pub mod storage_error;

pub use admiral_error::AdmiralError;
pub use config_error::ConfigError;
pub use error_code::AdmiralErrorCode;
pub use hierarchy_error::HierarchyError;
pub use import_error::ImportError;
pub use projection_error::{ProjectionError, VariablesOwner};
pub use storage_error::StorageError;
