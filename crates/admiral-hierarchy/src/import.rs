//! Bulk import of groups, hosts, and child relationships from JSON arrays.
//!
//! Records are applied in order and the import stops at the first failing
//! record; records before it stay applied.

use admiral_core::config::DefaultsConfig;
use admiral_core::constants::EMPTY_VARIABLES;
use admiral_core::errors::ImportError;
use admiral_core::types::{NewGroup, NewHost};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::engine::{EdgeInsert, HierarchyEngine};

/// `{"name", "variables", "enable", "monitor"}`
#[derive(Debug, Clone, Deserialize)]
pub struct GroupRecord {
    pub name: String,
    #[serde(default)]
    pub variables: Option<Value>,
    #[serde(default)]
    pub enable: Option<bool>,
    #[serde(default)]
    pub monitor: Option<bool>,
}

/// `{"ip", "hostname", "domain", "variables", "enable", "monitor", "groups"}`.
/// The first listed group becomes the host's direct group.
#[derive(Debug, Clone, Deserialize)]
pub struct HostRecord {
    pub ip: String,
    pub hostname: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub variables: Option<Value>,
    #[serde(default)]
    pub enable: Option<bool>,
    #[serde(default)]
    pub monitor: Option<bool>,
    #[serde(default)]
    pub groups: Vec<String>,
}

/// `{"child", "parent"}` by group name.
#[derive(Debug, Clone, Deserialize)]
pub struct ChildRecord {
    pub child: String,
    pub parent: String,
}

/// Outcome of an import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Records written.
    pub imported: usize,
    /// Records that matched existing state and changed nothing.
    pub unchanged: usize,
}

fn parse_records<T: DeserializeOwned>(json: &str) -> Result<Vec<T>, ImportError> {
    serde_json::from_str(json).map_err(|e| ImportError::InvalidJson {
        message: e.to_string(),
    })
}

/// Variables must be a JSON object; absent or null means `{}`.
fn variables_blob(
    index: usize,
    name: &str,
    variables: Option<Value>,
) -> Result<String, ImportError> {
    match variables {
        None | Some(Value::Null) => Ok(EMPTY_VARIABLES.to_string()),
        Some(value @ Value::Object(_)) => Ok(value.to_string()),
        Some(_) => Err(ImportError::InvalidRecord {
            index,
            name: name.to_string(),
            message: "variables must be a JSON object".to_string(),
        }),
    }
}

fn new_group(
    defaults: &DefaultsConfig,
    index: usize,
    record: GroupRecord,
) -> Result<NewGroup, ImportError> {
    let variables = variables_blob(index, &record.name, record.variables)?;
    Ok(defaults
        .new_group(record.name)
        .with_variables(variables)
        .with_flag_overrides(record.enable, record.monitor))
}

fn new_host(
    defaults: &DefaultsConfig,
    index: usize,
    record: HostRecord,
) -> Result<NewHost, ImportError> {
    let variables = variables_blob(index, &record.hostname, record.variables)?;
    let mut host = defaults
        .new_host(record.hostname, record.ip)
        .with_variables(variables)
        .with_flag_overrides(record.enable, record.monitor);
    if let Some(domain) = record.domain {
        host.domain = domain;
    }
    Ok(host)
}

/// Upsert every group record.
pub fn import_groups(engine: &HierarchyEngine, json: &str) -> Result<ImportSummary, ImportError> {
    let records: Vec<GroupRecord> = parse_records(json)?;
    let mut summary = ImportSummary::default();
    for (index, record) in records.into_iter().enumerate() {
        let group = new_group(engine.defaults(), index, record)?;
        engine.store().upsert_group(&group)?;
        summary.imported += 1;
    }
    tracing::info!(imported = summary.imported, "imported groups");
    Ok(summary)
}

/// Upsert every host record and assign its direct group.
pub fn import_hosts(engine: &HierarchyEngine, json: &str) -> Result<ImportSummary, ImportError> {
    let records: Vec<HostRecord> = parse_records(json)?;
    let mut summary = ImportSummary::default();
    for (index, record) in records.into_iter().enumerate() {
        let direct_group = record.groups.first().cloned();
        if record.groups.len() > 1 {
            tracing::warn!(
                hostname = %record.hostname,
                ignored = ?&record.groups[1..],
                "host lists several groups; only the first is assigned"
            );
        }
        let host = new_host(engine.defaults(), index, record)?;
        engine
            .create_host(&host, direct_group.as_deref())
            .map_err(|source| ImportError::Hierarchy { index, source })?;
        summary.imported += 1;
    }
    tracing::info!(imported = summary.imported, "imported hosts");
    Ok(summary)
}

/// Create every child relationship through the cycle guard.
pub fn import_children(
    engine: &HierarchyEngine,
    json: &str,
) -> Result<ImportSummary, ImportError> {
    let records: Vec<ChildRecord> = parse_records(json)?;
    let mut summary = ImportSummary::default();
    for (index, record) in records.into_iter().enumerate() {
        match engine.create_child_relationship(&record.child, &record.parent) {
            Ok(EdgeInsert::Created) => summary.imported += 1,
            Ok(EdgeInsert::AlreadyPresent) => summary.unchanged += 1,
            Err(source) => return Err(ImportError::Hierarchy { index, source }),
        }
    }
    tracing::info!(
        imported = summary.imported,
        unchanged = summary.unchanged,
        "imported child relationships"
    );
    Ok(summary)
}
