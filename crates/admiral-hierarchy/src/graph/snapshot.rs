//! Whole-hierarchy snapshot in a petgraph `StableGraph`, used to audit the
//! stored edges for cycles, self-loops, and dangling endpoints.

use admiral_core::errors::HierarchyError;
use admiral_core::traits::InventoryStorage;
use admiral_core::types::{ChildGroupEdge, GroupId};
use petgraph::algo::tarjan_scc;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::Directed;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Edges point child → parent.
pub type HierarchyGraph = StableGraph<String, (), Directed>;

/// Stored hierarchy loaded into memory with an id → node index.
pub struct HierarchySnapshot {
    pub graph: HierarchyGraph,
    pub node_index: FxHashMap<GroupId, NodeIndex>,
    /// Edges whose child or parent no longer exists.
    pub dangling: Vec<ChildGroupEdge>,
    /// Edges whose child and parent are the same group.
    pub self_loops: Vec<ChildGroupEdge>,
}

/// Findings of a hierarchy audit. Empty on a healthy store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HierarchyAudit {
    /// Each cycle's group names, sorted.
    pub cycles: Vec<Vec<String>>,
    pub self_loops: Vec<String>,
    pub dangling_edges: Vec<ChildGroupEdge>,
}

impl HierarchyAudit {
    pub fn is_healthy(&self) -> bool {
        self.cycles.is_empty() && self.self_loops.is_empty() && self.dangling_edges.is_empty()
    }
}

impl HierarchySnapshot {
    /// Load every group and child edge from the store.
    pub fn load(store: &dyn InventoryStorage) -> Result<Self, HierarchyError> {
        let mut graph = HierarchyGraph::default();
        let mut node_index = FxHashMap::default();
        for group in store.list_groups()? {
            let idx = graph.add_node(group.name);
            node_index.insert(group.id, idx);
        }

        let mut dangling = Vec::new();
        let mut self_loops = Vec::new();
        for edge in store.list_child_edges()? {
            match (node_index.get(&edge.child), node_index.get(&edge.parent)) {
                (Some(&child), Some(&parent)) => {
                    if child == parent {
                        self_loops.push(edge);
                    }
                    graph.add_edge(child, parent, ());
                }
                _ => dangling.push(edge),
            }
        }

        Ok(Self {
            graph,
            node_index,
            dangling,
            self_loops,
        })
    }

    /// Strongly connected components with more than one group.
    pub fn find_cycles(&self) -> Vec<Vec<NodeIndex>> {
        tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .collect()
    }

    fn name(&self, idx: NodeIndex) -> String {
        self.graph.node_weight(idx).cloned().unwrap_or_default()
    }

    /// Summarize every integrity problem by group name.
    pub fn audit(&self) -> HierarchyAudit {
        let mut cycles: Vec<Vec<String>> = self
            .find_cycles()
            .into_iter()
            .map(|scc| {
                let mut names: Vec<String> = scc.into_iter().map(|idx| self.name(idx)).collect();
                names.sort();
                names
            })
            .collect();
        cycles.sort();

        let self_loops = self
            .self_loops
            .iter()
            .filter_map(|edge| self.node_index.get(&edge.child))
            .map(|&idx| self.name(idx))
            .collect();

        HierarchyAudit {
            cycles,
            self_loops,
            dangling_edges: self.dangling.clone(),
        }
    }

    /// Number of groups.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of child edges between existing groups.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
