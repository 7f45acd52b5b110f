//! Host lookup, copying, assignment listing, and record documents.

mod common;

use admiral_core::errors::HierarchyError;
use admiral_core::types::{NewGroup, NewHost};
use serde_json::{json, Value};

use common::{load_fixture, sqlite_engine, FIXTURE_DOMAIN};

#[test]
fn test_host_lookup_by_fqdn() {
    let engine = sqlite_engine();
    load_fixture(&engine);

    let by_name = engine.host("host1").unwrap();
    let by_fqdn = engine.host("host1.domain.local").unwrap();
    assert_eq!(by_name, by_fqdn);

    assert_eq!(
        engine.effective_groups("host3.domain.local").unwrap(),
        vec!["group3", "group4", "group5"]
    );

    // The domain has to match.
    let err = engine.host("host1.elsewhere.net").unwrap_err();
    assert!(matches!(
        err,
        HierarchyError::NotFound { kind: "host", ref name } if name == "host1.elsewhere.net"
    ));
}

#[test]
fn test_dotted_hostname_wins_over_fqdn_split() {
    let engine = sqlite_engine();
    engine
        .create_host(&NewHost::new("db.primary", "", "10.0.0.5"), None)
        .unwrap();
    engine
        .create_host(&NewHost::new("db", "primary", "10.0.0.6"), None)
        .unwrap();
    assert_eq!(engine.host("db.primary").unwrap().address, "10.0.0.5");
}

#[test]
fn test_copy_host_keeps_domain_and_variables() {
    let engine = sqlite_engine();
    load_fixture(&engine);
    engine
        .create_host(
            &NewHost::new("quiet", FIXTURE_DOMAIN, "9.9.9.9")
                .with_variables(r#"{"role":"cache"}"#)
                .with_flags(false, false),
            Some("group2"),
        )
        .unwrap();

    engine.copy_host("quiet", "quiet2", "9.9.9.10", None).unwrap();

    let copy = engine.host("quiet2").unwrap();
    assert_eq!(copy.address, "9.9.9.10");
    assert_eq!(copy.domain, FIXTURE_DOMAIN);
    assert_eq!(copy.variables, r#"{"role":"cache"}"#);
    assert!(!copy.enabled);
    assert!(!copy.monitored);
    // Membership is not carried over.
    assert!(engine.effective_groups("quiet2").unwrap().is_empty());
}

#[test]
fn test_copy_host_target_with_domain() {
    let engine = sqlite_engine();
    load_fixture(&engine);

    engine
        .copy_host("host1.domain.local", "edge1.dmz.example", "5.5.5.5", Some("group3"))
        .unwrap();

    let copy = engine.host("edge1.dmz.example").unwrap();
    assert_eq!(copy.hostname, "edge1");
    assert_eq!(copy.domain, "dmz.example");
    assert_eq!(
        engine.effective_groups("edge1").unwrap(),
        vec!["group3", "group4", "group5"]
    );
}

#[test]
fn test_copy_rejects_existing_target() {
    let engine = sqlite_engine();
    load_fixture(&engine);

    let err = engine.copy_host("host1", "host2", "7.7.7.7", None).unwrap_err();
    assert!(matches!(
        err,
        HierarchyError::AlreadyExists { kind: "host", ref name } if name == "host2"
    ));
    assert_eq!(engine.host("host2").unwrap().address, "2.2.2.2");

    let err = engine.copy_group("group1", "group2").unwrap_err();
    assert!(matches!(err, HierarchyError::AlreadyExists { kind: "group", .. }));

    let err = engine.copy_host("ghost", "ghost2", "7.7.7.7", None).unwrap_err();
    assert!(matches!(err, HierarchyError::NotFound { kind: "host", .. }));
}

#[test]
fn test_copy_group_clones_variables_not_edges() {
    let engine = sqlite_engine();
    load_fixture(&engine);
    engine
        .create_group(&NewGroup::new("muted", true, false).with_variables(r#"{"tier":2}"#))
        .unwrap();
    engine.create_child_relationship("muted", "group5").unwrap();

    engine.copy_group("muted", "muted-copy").unwrap();

    let copy = engine.group("muted-copy").unwrap();
    assert_eq!(copy.variables, r#"{"tier":2}"#);
    assert!(copy.enabled);
    assert!(!copy.monitored);
    assert!(engine.ancestors("muted-copy").unwrap().is_empty());
}

#[test]
fn test_host_assignments() {
    let engine = sqlite_engine();
    load_fixture(&engine);
    engine
        .create_host(&NewHost::new("host0", FIXTURE_DOMAIN, "0.0.0.1"), Some("group1"))
        .unwrap();
    engine
        .create_host(&NewHost::new("loose", FIXTURE_DOMAIN, "0.0.0.2"), None)
        .unwrap();

    let rows: Vec<(String, String)> = engine
        .host_assignments(None)
        .unwrap()
        .into_iter()
        .map(|row| (row.group, row.hostname))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("group1".to_string(), "host0".to_string()),
            ("group1".to_string(), "host1".to_string()),
            ("group2".to_string(), "host2".to_string()),
            ("group3".to_string(), "host3".to_string()),
        ]
    );

    let filtered = engine.host_assignments(Some("group3")).unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].hostname, "host3");
    assert_eq!(filtered[0].host_id, engine.host("host3").unwrap().id);
    assert_eq!(filtered[0].group_id, engine.group("group3").unwrap().id);

    assert!(engine.host_assignments(Some("nomatch")).unwrap().is_empty());
}

#[test]
fn test_host_documents_parse_variables() {
    let engine = sqlite_engine();
    load_fixture(&engine);

    let docs = engine.host_documents(Some("host1")).unwrap();
    assert_eq!(docs.len(), 1);
    let doc: Value = serde_json::to_value(&docs[0]).unwrap();
    assert_eq!(doc["ip"], "1.1.1.1");
    assert_eq!(doc["domain"], FIXTURE_DOMAIN);
    assert_eq!(
        doc["variables"],
        json!({"host_var1": {"host_sub_var1": "host_sub_val1"}})
    );
    assert_eq!(doc["groups"], json!(["group1"]));
    assert_eq!(doc["enable"], true);

    let groups = engine.group_documents(None).unwrap();
    assert_eq!(groups.len(), 5);
    assert_eq!(groups[1].variables["group_var2"], "group_val2");
}

#[test]
fn test_host_documents_reimport() {
    let source = sqlite_engine();
    load_fixture(&source);
    let hosts = serde_json::to_string(&source.host_documents(None).unwrap()).unwrap();
    let groups = serde_json::to_string(&source.group_documents(None).unwrap()).unwrap();

    let target = sqlite_engine();
    target.import_groups(&groups).unwrap();
    let summary = target.import_hosts(&hosts).unwrap();
    assert_eq!(summary.imported, 3);

    let host3 = target.host("host3.domain.local").unwrap();
    assert_eq!(host3.address, "3.3.3.3");
    assert_eq!(
        target.split_membership("host3").unwrap().unwrap().direct.name,
        "group3"
    );
}
