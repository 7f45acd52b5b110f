use std::process::ExitCode;

use admiral_core::constants::EMPTY_VARIABLES;
use admiral_core::errors::{AdmiralError, VariablesOwner};
use admiral_core::types::HostView;
use admiral_hierarchy::HierarchyEngine;
use clap::{Args, Subcommand};

use super::{print_json, print_names, variables_arg};
use crate::output::Table;

#[derive(Subcommand)]
pub enum HostCommands {
    /// Create a host, or update it if the hostname exists
    Create(CreateHostArgs),

    /// Delete a host and its group assignment
    Delete {
        /// Hostname
        hostname: String,
    },

    /// List all hosts with their direct and inherited groups
    List {
        /// Print JSON records with parsed variables
        #[arg(short, long)]
        json: bool,
    },

    /// List hosts whose hostname or address contains a substring
    Search {
        /// Substring to match
        pattern: String,

        /// Print JSON records with parsed variables
        #[arg(short, long)]
        json: bool,
    },

    /// Print a host's effective groups, direct group first
    Groups {
        /// Hostname or hostname.domain
        hostname: String,
    },

    /// Create a new host with the variables and flags of an existing one
    Copy(CopyHostArgs),
}

#[derive(Args)]
pub struct CopyHostArgs {
    /// Existing hostname or hostname.domain
    pub source: String,

    /// Hostname for the copy; hostname.domain also sets the domain
    pub target: String,

    /// Address of the copy
    #[arg(long)]
    pub ip: String,

    /// Direct group of the copy
    #[arg(long)]
    pub group: Option<String>,
}

#[derive(Args)]
pub struct CreateHostArgs {
    /// Hostname
    pub hostname: String,

    /// Address used to reach the host
    #[arg(long)]
    pub ip: String,

    /// DNS domain (defaults to config)
    #[arg(long)]
    pub domain: Option<String>,

    /// Direct group
    #[arg(long)]
    pub group: Option<String>,

    /// Host variables as a JSON object
    #[arg(long, default_value = EMPTY_VARIABLES)]
    pub variables: String,

    /// Include the host in projections (defaults to config)
    #[arg(long)]
    pub enable: Option<bool>,

    /// Include the host in Prometheus targets (defaults to config)
    #[arg(long)]
    pub monitor: Option<bool>,
}

pub fn run(engine: &HierarchyEngine, command: HostCommands) -> Result<ExitCode, AdmiralError> {
    match command {
        HostCommands::Create(args) => create(engine, args)?,
        HostCommands::Delete { hostname } => engine.delete_host(&hostname)?,
        HostCommands::List { json: true } => print_json(&engine.host_documents(None)?)?,
        HostCommands::List { json: false } => print_hosts(&engine.list_host_views()?),
        HostCommands::Search {
            pattern,
            json: true,
        } => print_json(&engine.host_documents(Some(&pattern))?)?,
        HostCommands::Search {
            pattern,
            json: false,
        } => print_hosts(&engine.search_host_views(&pattern)?),
        HostCommands::Groups { hostname } => print_names(&engine.effective_groups(&hostname)?),
        HostCommands::Copy(args) => {
            engine.copy_host(&args.source, &args.target, &args.ip, args.group.as_deref())?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn create(engine: &HierarchyEngine, args: CreateHostArgs) -> Result<(), AdmiralError> {
    let variables = variables_arg(VariablesOwner::Host, &args.hostname, &args.variables)?;
    let mut host = engine
        .defaults()
        .new_host(args.hostname, args.ip)
        .with_variables(variables)
        .with_flag_overrides(args.enable, args.monitor);
    if let Some(domain) = args.domain {
        host.domain = domain;
    }
    engine.create_host(&host, args.group.as_deref())?;
    Ok(())
}

fn print_hosts(hosts: &[HostView]) {
    let mut table = Table::new(&[
        "ID",
        "IP",
        "Hostname",
        "Domain",
        "Enabled",
        "Monitored",
        "Direct Group",
        "Inherited Groups",
    ]);
    for view in hosts {
        table.add_row(vec![
            view.host.id.to_string(),
            view.host.address.clone(),
            view.host.hostname.clone(),
            view.host.domain.clone(),
            view.host.enabled.to_string(),
            view.host.monitored.to_string(),
            view.direct_group.clone().unwrap_or_default(),
            view.inherited_groups.clone(),
        ]);
    }
    table.print();
}
