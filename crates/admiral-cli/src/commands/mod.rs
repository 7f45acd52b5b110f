//! Subcommand handlers. Each returns the process exit code on success.

mod audit;
mod child;
mod group;
mod host;
mod host_group;
mod import;
mod projection;

pub use child::ChildCommands;
pub use group::GroupCommands;
pub use host::HostCommands;
pub use host_group::HostGroupCommands;
pub use import::ImportCommands;

use std::process::ExitCode;

use admiral_core::errors::{AdmiralError, VariablesOwner};
use admiral_hierarchy::projection::{normalize_variables, to_pretty_json};
use admiral_hierarchy::HierarchyEngine;
use serde::Serialize;

use crate::cli::Commands;

pub fn run(engine: &HierarchyEngine, command: Commands) -> Result<ExitCode, AdmiralError> {
    match command {
        Commands::Inventory => projection::inventory(engine),
        Commands::Prometheus => projection::prometheus(engine),
        Commands::Audit => audit::run(engine),
        Commands::Group(cmd) => group::run(engine, cmd),
        Commands::Host(cmd) => host::run(engine, cmd),
        Commands::Child(cmd) => child::run(engine, cmd),
        Commands::HostGroup(cmd) => host_group::run(engine, cmd),
        Commands::Import(cmd) => import::run(engine, cmd),
    }
}

/// Validate a `--variables` argument and compact it.
fn variables_arg(
    owner: VariablesOwner,
    name: &str,
    raw: &str,
) -> Result<String, AdmiralError> {
    Ok(normalize_variables(owner, name, raw)?)
}

fn print_names(names: &[String]) {
    for name in names {
        println!("{name}");
    }
}

/// Print `value` as 4-space indented JSON.
fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AdmiralError> {
    print_json_bytes(&to_pretty_json(value)?);
    Ok(())
}

fn print_json_bytes(bytes: &[u8]) {
    println!("{}", String::from_utf8_lossy(bytes));
}
