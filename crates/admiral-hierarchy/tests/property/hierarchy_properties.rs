//! Property tests: whatever sequence of relationships is requested, the
//! stored hierarchy stays acyclic and within the depth ceiling.

#[path = "../common/mod.rs"]
mod common;

use admiral_core::config::AdmiralConfig;
use admiral_core::errors::HierarchyError;
use admiral_core::traits::SharedStorage;
use admiral_core::types::NewHost;
use admiral_hierarchy::{EdgeInsert, HierarchyEngine};
use proptest::prelude::*;

use common::{add_groups, memory_engine, MemoryStore};

const NAMES: [&str; 8] = ["g0", "g1", "g2", "g3", "g4", "g5", "g6", "g7"];

fn edge_requests() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0..NAMES.len(), 0..NAMES.len()), 0..40)
}

proptest! {
    #[test]
    fn prop_no_group_is_its_own_ancestor(requests in edge_requests()) {
        let (store, engine) = memory_engine();
        add_groups(&engine, &NAMES);

        for (child, parent) in requests {
            let before = store.edge_count();
            match engine.create_child_relationship(NAMES[child], NAMES[parent]) {
                Ok(EdgeInsert::Created) => prop_assert_eq!(store.edge_count(), before + 1),
                Ok(EdgeInsert::AlreadyPresent) => prop_assert_eq!(store.edge_count(), before),
                Err(HierarchyError::SelfReference { .. }) => prop_assert_eq!(child, parent),
                Err(HierarchyError::RelationshipLoop { .. }) => {
                    prop_assert_eq!(store.edge_count(), before)
                }
                Err(other) => return Err(TestCaseError::fail(format!("unexpected {other:?}"))),
            }
        }

        for name in NAMES {
            let ancestors = engine.ancestors(name).unwrap();
            prop_assert!(!ancestors.iter().any(|a| a == name));
        }
        prop_assert!(engine.audit().unwrap().is_healthy());
    }

    #[test]
    fn prop_ancestors_and_descendants_mirror(requests in edge_requests()) {
        let (_store, engine) = memory_engine();
        add_groups(&engine, &NAMES);
        for (child, parent) in requests {
            let _ = engine.create_child_relationship(NAMES[child], NAMES[parent]);
        }

        for a in NAMES {
            let ancestors = engine.ancestors(a).unwrap();
            for b in &ancestors {
                prop_assert!(engine.descendants(b).unwrap().iter().any(|d| d == a));
            }
            let mut deduped = ancestors.clone();
            deduped.sort();
            deduped.dedup();
            prop_assert_eq!(deduped.len(), ancestors.len());
        }
    }

    #[test]
    fn prop_accepted_chains_stay_readable(requests in edge_requests()) {
        let store = MemoryStore::new();
        let shared: SharedStorage = store.clone();
        let config = AdmiralConfig::from_toml("[hierarchy]\nmax_depth = 3\n").unwrap();
        let engine = HierarchyEngine::new(shared, &config);
        add_groups(&engine, &NAMES);
        for (i, name) in NAMES.iter().enumerate() {
            engine
                .create_host(&NewHost::new(format!("h{i}"), "", "10.0.0.1"), Some(*name))
                .unwrap();
        }

        for (child, parent) in requests {
            let before = store.edge_count();
            if let Err(HierarchyError::DepthExceeded { .. }) =
                engine.create_child_relationship(NAMES[child], NAMES[parent])
            {
                prop_assert_eq!(store.edge_count(), before);
            }
        }

        for name in NAMES {
            prop_assert!(engine.ancestors(name).is_ok());
            prop_assert!(engine.descendants(name).is_ok());
        }
        prop_assert!(engine.generate_prometheus_targets().is_ok());
        prop_assert!(engine.list_host_views().is_ok());
    }
}
