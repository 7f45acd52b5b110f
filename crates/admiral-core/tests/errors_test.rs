//! Error code and conversion tests.

use admiral_core::errors::{
    AdmiralError, AdmiralErrorCode, ConfigError, HierarchyError, ImportError, ProjectionError,
    StorageError, VariablesOwner,
};

#[test]
fn test_hierarchy_codes() {
    let cases: Vec<(HierarchyError, &str)> = vec![
        (
            HierarchyError::SelfReference {
                group: "g".into(),
            },
            "SELF_REFERENCE",
        ),
        (
            HierarchyError::RelationshipLoop {
                child: "a".into(),
                parent: "b".into(),
            },
            "RELATIONSHIP_LOOP",
        ),
        (HierarchyError::group_not_found("g"), "NOT_FOUND"),
        (
            HierarchyError::Duplicate {
                child: "a".into(),
                parent: "b".into(),
            },
            "DUPLICATE",
        ),
        (
            HierarchyError::DepthExceeded {
                origin: "a".into(),
                max_depth: 3,
            },
            "DEPTH_EXCEEDED",
        ),
        (
            HierarchyError::AlreadyExists {
                kind: "host",
                name: "web01".into(),
            },
            "ALREADY_EXISTS",
        ),
        (HierarchyError::Storage(StorageError::DbBusy), "DB_BUSY"),
    ];
    for (err, code) in cases {
        assert_eq!(err.error_code(), code, "{err}");
    }
}

#[test]
fn test_coded_string_format() {
    let err = HierarchyError::SelfReference {
        group: "group1".into(),
    };
    assert_eq!(
        err.coded_string(),
        "[SELF_REFERENCE] Group group1 cannot be its own parent"
    );
}

#[test]
fn test_not_found_names_kind() {
    assert_eq!(
        HierarchyError::host_not_found("host9").to_string(),
        "host not found: host9"
    );
    assert_eq!(
        HierarchyError::group_not_found("group9").to_string(),
        "group not found: group9"
    );
}

#[test]
fn test_malformed_variables_names_owner() {
    let err = ProjectionError::MalformedVariables {
        owner: VariablesOwner::Host,
        name: "host1".into(),
        message: "expected value".into(),
    };
    assert_eq!(err.error_code(), "MALFORMED_VARIABLES");
    assert!(err.to_string().contains("host host1"));
}

#[test]
fn test_storage_error_propagates_through_layers() {
    let err: ProjectionError = HierarchyError::from(StorageError::ForeignKeyViolation {
        message: "FOREIGN KEY constraint failed".into(),
    })
    .into();
    assert_eq!(err.error_code(), "FOREIGN_KEY_VIOLATION");

    let top: AdmiralError = err.into();
    assert_eq!(top.error_code(), "FOREIGN_KEY_VIOLATION");
}

#[test]
fn test_import_error_delegates_to_record_cause() {
    let err = ImportError::Hierarchy {
        index: 2,
        source: HierarchyError::RelationshipLoop {
            child: "group5".into(),
            parent: "group3".into(),
        },
    };
    assert_eq!(err.error_code(), "RELATIONSHIP_LOOP");
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_config_error_code() {
    let err: AdmiralError = ConfigError::Unreadable {
        path: "admiral.toml".into(),
        message: "permission denied".into(),
    }
    .into();
    assert_eq!(err.error_code(), "CONFIG_ERROR");
    assert_eq!(
        err.coded_string(),
        "[CONFIG_ERROR] Configuration error: Cannot read config admiral.toml: permission denied"
    );
}
