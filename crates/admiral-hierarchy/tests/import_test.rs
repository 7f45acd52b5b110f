//! Bulk JSON import.

mod common;

use std::sync::Arc;

use admiral_core::config::AdmiralConfig;
use admiral_core::errors::{HierarchyError, ImportError};
use admiral_core::traits::{InventoryStorage, SharedStorage};
use admiral_hierarchy::{HierarchyEngine, ImportSummary};
use admiral_storage::StorageEngine;

use common::sqlite_engine;

const GROUPS: &str = r#"[
    {"name": "group1", "variables": {"group_var1": {"group_sub_var1": "group_sub_val1"}}, "enable": true, "monitor": true},
    {"name": "group2", "variables": {"group_var2": "group_val2"}, "enable": true, "monitor": false},
    {"name": "group3"}
]"#;

const HOSTS: &str = r#"[
    {"ip": "1.1.1.1", "hostname": "host1", "domain": "domain.local",
     "variables": {"host_var1": {"host_sub_var1": "host_sub_val1"}},
     "enable": true, "monitor": true, "groups": ["group1"]},
    {"ip": "3.3.3.3", "hostname": "host3", "domain": "domain.local",
     "groups": ["group3", "group2"]},
    {"ip": "9.9.9.9", "hostname": "orphan"}
]"#;

const CHILDREN: &str = r#"[
    {"child": "group3", "parent": "group2"},
    {"child": "group2", "parent": "group1"},
    {"child": "group3", "parent": "group2"}
]"#;

#[test]
fn test_import_round() {
    let engine = sqlite_engine();

    assert_eq!(
        engine.import_groups(GROUPS).unwrap(),
        ImportSummary {
            imported: 3,
            unchanged: 0
        }
    );
    let group2 = engine.store().get_group_by_name("group2").unwrap().unwrap();
    assert!(group2.enabled);
    assert!(!group2.monitored);
    assert_eq!(group2.variables, r#"{"group_var2":"group_val2"}"#);
    let group3 = engine.store().get_group_by_name("group3").unwrap().unwrap();
    assert_eq!(group3.variables, "{}");
    assert!(group3.enabled && group3.monitored);

    assert_eq!(engine.import_hosts(HOSTS).unwrap().imported, 3);
    // Only the first listed group is assigned.
    assert_eq!(engine.effective_groups("host3").unwrap(), vec!["group3"]);
    assert!(engine.effective_groups("orphan").unwrap().is_empty());
    let orphan = engine.store().get_host_by_hostname("orphan").unwrap().unwrap();
    assert_eq!(orphan.domain, "");

    assert_eq!(
        engine.import_children(CHILDREN).unwrap(),
        ImportSummary {
            imported: 2,
            unchanged: 1
        }
    );
    assert_eq!(
        engine.effective_groups("host3").unwrap(),
        vec!["group3", "group2", "group1"]
    );
}

#[test]
fn test_import_stops_at_first_failing_record() {
    let engine = sqlite_engine();
    engine.import_groups(GROUPS).unwrap();

    let children = r#"[
        {"child": "group2", "parent": "group1"},
        {"child": "group1", "parent": "group2"},
        {"child": "group3", "parent": "group2"}
    ]"#;
    match engine.import_children(children).unwrap_err() {
        ImportError::Hierarchy { index, source } => {
            assert_eq!(index, 1);
            assert!(matches!(source, HierarchyError::RelationshipLoop { .. }));
        }
        other => panic!("expected record failure, got {other:?}"),
    }
    // The first record stays applied; the third was never attempted.
    assert_eq!(engine.child_relationships().unwrap().len(), 1);
}

#[test]
fn test_import_rejects_non_object_variables() {
    let engine = sqlite_engine();
    let err = engine
        .import_groups(r#"[{"name": "ok"}, {"name": "bad", "variables": "nope"}]"#)
        .unwrap_err();
    assert!(matches!(err, ImportError::InvalidRecord { index: 1, ref name, .. } if name == "bad"));
    assert!(engine.store().get_group_by_name("ok").unwrap().is_some());
}

#[test]
fn test_import_rejects_invalid_json() {
    let engine = sqlite_engine();
    assert!(matches!(
        engine.import_hosts("{not an array"),
        Err(ImportError::InvalidJson { .. })
    ));
    assert!(matches!(
        engine.import_children(r#"[{"child": "a"}]"#),
        Err(ImportError::InvalidJson { .. })
    ));
}

#[test]
fn test_import_host_with_unknown_group() {
    let engine = sqlite_engine();
    let err = engine
        .import_hosts(r#"[{"ip": "1.1.1.1", "hostname": "h", "groups": ["ghost"]}]"#)
        .unwrap_err();
    assert!(matches!(
        err,
        ImportError::Hierarchy {
            index: 0,
            source: HierarchyError::NotFound { .. }
        }
    ));
    assert!(engine.store().get_host_by_hostname("h").unwrap().is_none());
}

#[test]
fn test_import_applies_configured_defaults() {
    let store: SharedStorage = Arc::new(StorageEngine::open_in_memory().unwrap());
    let config = AdmiralConfig::from_toml(
        "[defaults]\ndomain = \"corp.example\"\nmonitored = false\n",
    )
    .unwrap();
    let engine = HierarchyEngine::new(store, &config);

    engine
        .import_groups(r#"[{"name": "quiet"}, {"name": "loud", "monitor": true}]"#)
        .unwrap();
    engine
        .import_hosts(
            r#"[{"ip": "1.1.1.1", "hostname": "a"},
                {"ip": "2.2.2.2", "hostname": "b", "domain": "lab", "enable": false}]"#,
        )
        .unwrap();

    let quiet = engine.group("quiet").unwrap();
    assert!(quiet.enabled && !quiet.monitored);
    assert!(engine.group("loud").unwrap().monitored);

    let a = engine.host("a.corp.example").unwrap();
    assert!(a.enabled && !a.monitored);
    let b = engine.host("b").unwrap();
    assert_eq!(b.domain, "lab");
    assert!(!b.enabled);
}
