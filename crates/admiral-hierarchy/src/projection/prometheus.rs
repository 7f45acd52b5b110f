//! Prometheus file-based service discovery projection.

use admiral_core::errors::ProjectionError;
use admiral_core::traits::InventoryStorage;
use serde::Serialize;

use crate::membership;
use crate::traversal::TraversalConfig;

/// One scrape target group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapeTarget {
    pub targets: Vec<String>,
    pub labels: TargetLabels,
}

/// Direct group, plus the comma-joined ancestors of that group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetLabels {
    pub group: String,
    pub inherited_groups: String,
}

/// One target per host that is enabled and monitored and whose direct
/// group is enabled and monitored. Other hosts are skipped.
pub fn build_scrape_targets(
    store: &dyn InventoryStorage,
    config: &TraversalConfig,
) -> Result<Vec<ScrapeTarget>, ProjectionError> {
    let mut targets = Vec::new();
    for host in store.list_hosts()? {
        if !(host.enabled && host.monitored) {
            continue;
        }
        let Some(membership) = membership::resolve(store, &host, config)? else {
            continue;
        };
        if !(membership.direct.enabled && membership.direct.monitored) {
            continue;
        }
        targets.push(ScrapeTarget {
            targets: vec![host.fqdn()],
            labels: TargetLabels {
                inherited_groups: membership.inherited_label(),
                group: membership.direct.name,
            },
        });
    }
    tracing::debug!(targets = targets.len(), "built scrape targets");
    Ok(targets)
}
