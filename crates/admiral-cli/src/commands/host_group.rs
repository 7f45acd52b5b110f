use std::process::ExitCode;

use admiral_core::errors::AdmiralError;
use admiral_core::types::HostAssignment;
use admiral_hierarchy::HierarchyEngine;
use clap::Subcommand;

use crate::output::Table;

#[derive(Subcommand)]
pub enum HostGroupCommands {
    /// Make a group the host's direct group, replacing any previous one
    Set {
        hostname: String,
        group: String,
    },

    /// Remove the host's assignment to a group
    Delete {
        hostname: String,
        group: String,
    },

    /// List each group's direct hosts
    List {
        /// Only groups whose name contains this substring
        group: Option<String>,
    },
}

pub fn run(
    engine: &HierarchyEngine,
    command: HostGroupCommands,
) -> Result<ExitCode, AdmiralError> {
    match command {
        HostGroupCommands::Set { hostname, group } => engine.set_host_group(&hostname, &group)?,
        HostGroupCommands::Delete { hostname, group } => {
            if !engine.delete_host_group(&hostname, &group)? {
                eprintln!("{hostname} is not in {group}");
            }
        }
        HostGroupCommands::List { group } => {
            print_assignments(&engine.host_assignments(group.as_deref())?)
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn print_assignments(rows: &[HostAssignment]) {
    let mut table = Table::new(&["Group", "Group ID", "Hostname", "Host ID"]);
    for row in rows {
        table.add_row(vec![
            row.group.clone(),
            row.group_id.to_string(),
            row.hostname.clone(),
            row.host_id.to_string(),
        ]);
    }
    table.print();
}
