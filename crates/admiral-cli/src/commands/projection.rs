use std::process::ExitCode;

use admiral_core::errors::AdmiralError;
use admiral_hierarchy::HierarchyEngine;

use super::print_json_bytes;

pub fn inventory(engine: &HierarchyEngine) -> Result<ExitCode, AdmiralError> {
    print_json_bytes(&engine.generate_inventory()?);
    Ok(ExitCode::SUCCESS)
}

pub fn prometheus(engine: &HierarchyEngine) -> Result<ExitCode, AdmiralError> {
    print_json_bytes(&engine.generate_prometheus_targets()?);
    Ok(ExitCode::SUCCESS)
}
