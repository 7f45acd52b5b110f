use std::process::ExitCode;

use admiral_core::errors::AdmiralError;
use admiral_hierarchy::{EdgeInsert, HierarchyEngine};
use clap::Subcommand;

use super::print_names;
use crate::output::Table;

#[derive(Subcommand)]
pub enum ChildCommands {
    /// Nest a group inside a parent group
    Create {
        /// Group to nest
        child: String,
        /// Group to nest it in
        parent: String,
    },

    /// Remove a nesting
    Delete {
        child: String,
        parent: String,
    },

    /// List every nesting
    List,

    /// Print every group a group is nested in, nearest first
    Ancestors {
        group: String,
    },

    /// Print every group nested in a group, nearest first
    Descendants {
        group: String,
    },
}

pub fn run(engine: &HierarchyEngine, command: ChildCommands) -> Result<ExitCode, AdmiralError> {
    match command {
        ChildCommands::Create { child, parent } => {
            if engine.create_child_relationship(&child, &parent)? == EdgeInsert::AlreadyPresent {
                eprintln!("{child} is already a child of {parent}");
            }
        }
        ChildCommands::Delete { child, parent } => {
            if !engine.remove_child_relationship(&child, &parent)? {
                eprintln!("{child} is not a child of {parent}");
            }
        }
        ChildCommands::List => {
            let mut table = Table::new(&["Parent", "Child"]);
            for (child, parent) in engine.child_relationships()? {
                table.add_row(vec![parent, child]);
            }
            table.print();
        }
        ChildCommands::Ancestors { group } => print_names(&engine.ancestors(&group)?),
        ChildCommands::Descendants { group } => print_names(&engine.descendants(&group)?),
    }
    Ok(ExitCode::SUCCESS)
}
