//! Admiral CLI
//!
//! Usage:
//!   admiral inventory                     # Ansible dynamic inventory JSON
//!   admiral prometheus                    # Prometheus file_sd targets JSON
//!   admiral group create web --variables '{"tier":"front"}'
//!   admiral host create web01 --ip 10.0.0.1 --group web
//!   admiral host copy web01 web02.example.com --ip 10.0.0.2
//!   admiral host list --json              # records with parsed variables
//!   admiral child create web production
//!   admiral host-group list web
//!   admiral import hosts hosts.json
//!   admiral audit

mod cli;
mod commands;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use admiral_core::config::{AdmiralConfig, CliOverrides};
use admiral_core::errors::{AdmiralError, AdmiralErrorCode};
use admiral_core::traits::SharedStorage;
use admiral_hierarchy::HierarchyEngine;
use admiral_storage::StorageEngine;
use clap::Parser;

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    admiral_core::tracing::init_tracing();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("{}", e.coded_string());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, AdmiralError> {
    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    let overrides = CliOverrides {
        db_path: cli.db,
        max_depth: cli.max_depth,
        reject_duplicate_edges: cli.reject_duplicates.then_some(true),
    };
    let config = AdmiralConfig::load(&root, Some(&overrides))?;

    let store: SharedStorage = Arc::new(StorageEngine::from_config(&config.storage)?);
    let engine = HierarchyEngine::new(store, &config);
    commands::run(&engine, cli.command)
}
