use ahash::{AHashMap, AHashSet};
use std::collections::VecDeque;

use crate::step::{StepGraph, StepId};

/// Reverse adjacency: every step reachable from a root, mapped to the set
/// of steps with an edge directly into it.
pub type ParentMap = AHashMap<StepId, AHashSet<StepId>>;

/// Builds the predecessor map for everything reachable from `root`.
///
/// Every visited step gets an entry, so the root always maps to the empty
/// set. The visited guard is on steps, not edges: a step reached again via
/// a different parent still has that parent unioned in, it just is not
/// re-expanded. Safe on diamonds and on malformed cyclic graphs.
pub fn parent_map(graph: &StepGraph, root: StepId) -> ParentMap {
    let mut parents = ParentMap::new();
    parents.entry(root).or_default();

    let mut visited = AHashSet::new();
    visited.insert(root);
    let mut queue = VecDeque::new();
    queue.push_back(root);

    while let Some(step) = queue.pop_front() {
        for edge in graph[step].out_edges() {
            if let Some(target) = edge.target {
                parents.entry(target).or_default().insert(step);
                if visited.insert(target) {
                    queue.push_back(target);
                }
            }
        }
    }
    parents
}
