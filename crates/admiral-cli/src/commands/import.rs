use std::path::{Path, PathBuf};
use std::process::ExitCode;

use admiral_core::errors::{AdmiralError, ImportError};
use admiral_hierarchy::{HierarchyEngine, ImportSummary};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum ImportCommands {
    /// Import `[{"name", "variables", "enable", "monitor"}]`
    Groups { file: PathBuf },

    /// Import `[{"ip", "hostname", "domain", "variables", "enable", "monitor", "groups"}]`
    Hosts { file: PathBuf },

    /// Import `[{"child", "parent"}]`
    Children { file: PathBuf },
}

pub fn run(engine: &HierarchyEngine, command: ImportCommands) -> Result<ExitCode, AdmiralError> {
    let summary = match command {
        ImportCommands::Groups { file } => engine.import_groups(&read(&file)?)?,
        ImportCommands::Hosts { file } => engine.import_hosts(&read(&file)?)?,
        ImportCommands::Children { file } => engine.import_children(&read(&file)?)?,
    };
    report(&summary);
    Ok(ExitCode::SUCCESS)
}

fn read(path: &Path) -> Result<String, ImportError> {
    std::fs::read_to_string(path).map_err(|e| ImportError::Unreadable {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

fn report(summary: &ImportSummary) {
    println!(
        "imported {} records, {} unchanged",
        summary.imported, summary.unchanged
    );
}
