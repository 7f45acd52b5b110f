//! Command-line structure.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{
    ChildCommands, GroupCommands, HostCommands, HostGroupCommands, ImportCommands,
};

/// Admiral - Ansible inventory and Prometheus target manager
#[derive(Parser)]
#[command(name = "admiral")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Database file (overrides config and ADMIRAL_DB_PATH)
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Directory holding the project admiral.toml
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Maximum hierarchy depth walked during resolution
    #[arg(long, global = true)]
    pub max_depth: Option<usize>,

    /// Fail when a child relationship already exists
    #[arg(long, global = true)]
    pub reject_duplicates: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the Ansible dynamic inventory
    Inventory,

    /// Print the Prometheus file-based service discovery targets
    Prometheus,

    /// Manage groups
    #[command(subcommand)]
    Group(GroupCommands),

    /// Manage hosts
    #[command(subcommand)]
    Host(HostCommands),

    /// Manage group nesting
    #[command(subcommand)]
    Child(ChildCommands),

    /// Manage a host's direct group
    #[command(subcommand)]
    HostGroup(HostGroupCommands),

    /// Bulk import from JSON files
    #[command(subcommand)]
    Import(ImportCommands),

    /// Check the stored hierarchy for cycles and dangling edges
    Audit,
}
