//! Graph integrity: the per-insert cycle guard and the whole-graph audit.

pub mod dag_enforcement;
pub mod snapshot;
