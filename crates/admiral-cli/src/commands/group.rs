use std::process::ExitCode;

use admiral_core::constants::EMPTY_VARIABLES;
use admiral_core::errors::{AdmiralError, VariablesOwner};
use admiral_core::types::GroupSummary;
use admiral_hierarchy::HierarchyEngine;
use clap::{Args, Subcommand};

use super::{print_json, variables_arg};
use crate::output::Table;

#[derive(Subcommand)]
pub enum GroupCommands {
    /// Create a group, or update it if the name exists
    Create(CreateGroupArgs),

    /// Delete a group and every relationship it takes part in
    Delete {
        /// Group name
        name: String,
    },

    /// List all groups
    List {
        /// Print JSON records with parsed variables
        #[arg(short, long)]
        json: bool,
    },

    /// List groups whose name contains a substring
    Search {
        /// Substring to match
        pattern: String,

        /// Print JSON records with parsed variables
        #[arg(short, long)]
        json: bool,
    },

    /// Create a new group with the variables and flags of an existing one
    Copy {
        /// Existing group
        source: String,
        /// Name for the copy
        target: String,
    },
}

#[derive(Args)]
pub struct CreateGroupArgs {
    /// Group name
    pub name: String,

    /// Group variables as a JSON object
    #[arg(long, default_value = EMPTY_VARIABLES)]
    pub variables: String,

    /// Include the group in projections (defaults to config)
    #[arg(long)]
    pub enable: Option<bool>,

    /// Include the group's hosts in Prometheus targets (defaults to config)
    #[arg(long)]
    pub monitor: Option<bool>,
}

pub fn run(engine: &HierarchyEngine, command: GroupCommands) -> Result<ExitCode, AdmiralError> {
    match command {
        GroupCommands::Create(args) => {
            let variables = variables_arg(VariablesOwner::Group, &args.name, &args.variables)?;
            let group = engine
                .defaults()
                .new_group(args.name)
                .with_variables(variables)
                .with_flag_overrides(args.enable, args.monitor);
            engine.create_group(&group)?;
        }
        GroupCommands::Delete { name } => engine.delete_group(&name)?,
        GroupCommands::List { json: true } => print_json(&engine.group_documents(None)?)?,
        GroupCommands::List { json: false } => print_groups(&engine.list_group_summaries()?),
        GroupCommands::Search {
            pattern,
            json: true,
        } => print_json(&engine.group_documents(Some(&pattern))?)?,
        GroupCommands::Search {
            pattern,
            json: false,
        } => print_groups(&engine.search_group_summaries(&pattern)?),
        GroupCommands::Copy { source, target } => {
            engine.copy_group(&source, &target)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn print_groups(groups: &[GroupSummary]) {
    let mut table = Table::new(&[
        "ID",
        "Name",
        "Enabled",
        "Monitored",
        "Children count",
        "Hosts count",
    ]);
    for summary in groups {
        table.add_row(vec![
            summary.group.id.to_string(),
            summary.group.name.clone(),
            summary.group.enabled.to_string(),
            summary.group.monitored.to_string(),
            summary.num_children.to_string(),
            summary.num_hosts.to_string(),
        ]);
    }
    table.print();
}
