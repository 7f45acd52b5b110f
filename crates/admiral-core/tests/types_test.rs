//! Inventory model tests.

use admiral_core::types::{GroupId, Host, HostId, NewGroup, NewHost};

fn host(hostname: &str, domain: &str) -> Host {
    Host {
        id: HostId::new(1),
        address: "1.1.1.1".into(),
        hostname: hostname.into(),
        domain: domain.into(),
        variables: "{}".into(),
        enabled: true,
        monitored: true,
    }
}

#[test]
fn test_fqdn_joins_hostname_and_domain() {
    assert_eq!(host("host1", "domain.local").fqdn(), "host1.domain.local");
}

#[test]
fn test_fqdn_without_domain_has_no_trailing_dot() {
    assert_eq!(host("host1", "").fqdn(), "host1");
}

#[test]
fn test_new_records_start_with_empty_variables() {
    let group = NewGroup::new("group1", true, false);
    assert_eq!(group.variables, "{}");
    assert!(!group.monitored);

    let host = NewHost::new("host1", "domain.local", "1.1.1.1").with_flags(false, true);
    assert_eq!(host.variables, "{}");
    assert!(!host.enabled);
}

#[test]
fn test_ids_serialize_transparently() {
    let json = serde_json::to_string(&GroupId::new(7)).unwrap();
    assert_eq!(json, "7");
    let id: HostId = serde_json::from_str("11").unwrap();
    assert_eq!(id.get(), 11);
}
