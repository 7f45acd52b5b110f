//! Ancestor/descendant resolution over the child-group edges.
//!
//! Breadth-first with an explicit worklist and visited set: results come
//! nearest-first, ties follow edge insertion order, and every group appears
//! once even when reachable along several paths. A chain longer than
//! `max_depth` is reported as `DepthExceeded` rather than followed.
//! [`longest_chain`] measures the deepest route instead, for the insertion
//! guard.

use std::collections::VecDeque;

use admiral_core::config::HierarchyConfig;
use admiral_core::constants::DEFAULT_MAX_DEPTH;
use admiral_core::errors::HierarchyError;
use admiral_core::traits::InventoryStorage;
use admiral_core::types::GroupId;
use rustc_hash::{FxHashMap, FxHashSet};

/// Which way to follow child-group edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// child → parent: everything the group is nested inside.
    Ancestors,
    /// parent → child: everything nested inside the group.
    Descendants,
}

/// Configuration for traversal operations.
#[derive(Debug, Clone, Copy)]
pub struct TraversalConfig {
    /// Longest edge chain followed from the origin.
    pub max_depth: usize,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl From<&HierarchyConfig> for TraversalConfig {
    fn from(config: &HierarchyConfig) -> Self {
        Self {
            max_depth: config.effective_max_depth(),
        }
    }
}

/// Every group `origin` is nested inside, nearest first. Empty for a root.
pub fn ancestors_of(
    store: &dyn InventoryStorage,
    origin: GroupId,
    config: &TraversalConfig,
) -> Result<Vec<GroupId>, HierarchyError> {
    Walk::new(store, origin, Direction::Ancestors, config).collect()
}

/// Every group nested inside `origin`, nearest first. Empty for a leaf.
pub fn descendants_of(
    store: &dyn InventoryStorage,
    origin: GroupId,
    config: &TraversalConfig,
) -> Result<Vec<GroupId>, HierarchyError> {
    Walk::new(store, origin, Direction::Descendants, config).collect()
}

/// Whether `target` is reachable from `origin` in `direction`.
/// Stops as soon as `target` is discovered.
pub fn reaches(
    store: &dyn InventoryStorage,
    origin: GroupId,
    target: GroupId,
    direction: Direction,
    config: &TraversalConfig,
) -> Result<bool, HierarchyError> {
    for found in Walk::new(store, origin, direction, config) {
        if found? == target {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Edge count of the longest chain leading out of `origin` in `direction`.
///
/// Unlike [`Walk`], which records each group at its nearest distance, this
/// keeps the farthest one: a group is re-expanded whenever a longer route
/// to it turns up. A chain longer than `max_depth` (including any cycle)
/// fails with `DepthExceeded`.
pub fn longest_chain(
    store: &dyn InventoryStorage,
    origin: GroupId,
    direction: Direction,
    config: &TraversalConfig,
) -> Result<usize, HierarchyError> {
    let mut longest: FxHashMap<GroupId, usize> = FxHashMap::default();
    let mut queue = VecDeque::from([(origin, 0)]);
    let mut deepest = 0;
    while let Some((group, depth)) = queue.pop_front() {
        // Superseded by a longer route found after this entry was queued.
        if longest.get(&group).is_some_and(|&known| known > depth) {
            continue;
        }
        for neighbor in neighbors(store, group, direction)? {
            let next = depth + 1;
            if next > config.max_depth {
                return Err(depth_exceeded(store, origin, config.max_depth));
            }
            if longest.get(&neighbor).is_some_and(|&known| known >= next) {
                continue;
            }
            longest.insert(neighbor, next);
            deepest = deepest.max(next);
            queue.push_back((neighbor, next));
        }
    }
    Ok(deepest)
}

/// Resolve ids to names, skipping any group deleted since it was found.
pub fn names_of(
    store: &dyn InventoryStorage,
    ids: &[GroupId],
) -> Result<Vec<String>, HierarchyError> {
    let mut names = Vec::with_capacity(ids.len());
    for &id in ids {
        if let Some(group) = store.get_group(id)? {
            names.push(group.name);
        }
    }
    Ok(names)
}

/// Lazy breadth-first walk yielding groups in discovery order.
pub struct Walk<'a> {
    store: &'a dyn InventoryStorage,
    origin: GroupId,
    direction: Direction,
    max_depth: usize,
    visited: FxHashSet<GroupId>,
    /// Discovered groups still to be expanded, with their depth.
    frontier: VecDeque<(GroupId, usize)>,
    /// Discovered groups not yet yielded.
    ready: VecDeque<GroupId>,
    finished: bool,
}

impl<'a> Walk<'a> {
    pub fn new(
        store: &'a dyn InventoryStorage,
        origin: GroupId,
        direction: Direction,
        config: &TraversalConfig,
    ) -> Self {
        let mut visited = FxHashSet::default();
        visited.insert(origin);
        let mut frontier = VecDeque::new();
        frontier.push_back((origin, 0));
        Self {
            store,
            origin,
            direction,
            max_depth: config.max_depth,
            visited,
            frontier,
            ready: VecDeque::new(),
            finished: false,
        }
    }

    fn fail(&mut self, error: HierarchyError) -> Option<Result<GroupId, HierarchyError>> {
        self.finished = true;
        Some(Err(error))
    }
}

impl Iterator for Walk<'_> {
    type Item = Result<GroupId, HierarchyError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.finished {
                return None;
            }
            if let Some(id) = self.ready.pop_front() {
                return Some(Ok(id));
            }
            let (current, depth) = self.frontier.pop_front()?;
            let neighbors = match neighbors(self.store, current, self.direction) {
                Ok(neighbors) => neighbors,
                Err(e) => return self.fail(e),
            };
            for neighbor in neighbors {
                if !self.visited.insert(neighbor) {
                    continue;
                }
                if depth + 1 > self.max_depth {
                    let error = depth_exceeded(self.store, self.origin, self.max_depth);
                    return self.fail(error);
                }
                self.ready.push_back(neighbor);
                self.frontier.push_back((neighbor, depth + 1));
            }
        }
    }
}

/// Groups one edge away from `group` in `direction`, in edge insertion order.
fn neighbors(
    store: &dyn InventoryStorage,
    group: GroupId,
    direction: Direction,
) -> Result<Vec<GroupId>, HierarchyError> {
    Ok(match direction {
        Direction::Ancestors => store
            .child_edges_by_child(group)?
            .into_iter()
            .map(|edge| edge.parent)
            .collect(),
        Direction::Descendants => store
            .child_edges_by_parent(group)?
            .into_iter()
            .map(|edge| edge.child)
            .collect(),
    })
}

fn depth_exceeded(
    store: &dyn InventoryStorage,
    origin: GroupId,
    max_depth: usize,
) -> HierarchyError {
    let origin = match store.get_group(origin) {
        Ok(Some(group)) => group.name,
        _ => origin.to_string(),
    };
    tracing::warn!(%origin, max_depth, "traversal depth exceeded");
    HierarchyError::DepthExceeded { origin, max_depth }
}
