use std::process::ExitCode;

use admiral_core::errors::AdmiralError;
use admiral_hierarchy::HierarchyEngine;

/// Print audit findings. Exits non-zero when the hierarchy is unhealthy.
pub fn run(engine: &HierarchyEngine) -> Result<ExitCode, AdmiralError> {
    let audit = engine.audit()?;
    if audit.is_healthy() {
        println!("hierarchy is acyclic");
        return Ok(ExitCode::SUCCESS);
    }
    for cycle in &audit.cycles {
        println!("cycle: {}", cycle.join(", "));
    }
    for group in &audit.self_loops {
        println!("self-loop: {group}");
    }
    for edge in &audit.dangling_edges {
        println!("dangling edge: child {} -> parent {}", edge.child, edge.parent);
    }
    Ok(ExitCode::FAILURE)
}
