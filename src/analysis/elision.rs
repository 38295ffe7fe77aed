use ahash::{AHashMap, AHashSet};

use super::ParentMap;
use crate::step::{StepGraph, StepId};

/// Removes every Merge and Split key from a parent map, short-circuiting
/// edges through them.
///
/// A merge's predecessors become direct predecessors of its successor; a
/// split's single parent becomes a direct predecessor of each branch head.
/// Junctions feeding straight into other junctions are substituted
/// transitively until only non-junction predecessors remain, so chains of
/// merges collapse in one call. An orphan merge (empty predecessor set)
/// simply contributes nothing to its successor.
///
/// The operation is idempotent: running it on an already-elided map returns
/// the same map.
pub fn elide_junctions(graph: &StepGraph, parents: &ParentMap) -> ParentMap {
    let mut cache: AHashMap<StepId, AHashSet<StepId>> = AHashMap::new();
    let mut elided = ParentMap::new();

    for (&step, preds) in parents.iter() {
        if graph[step].is_junction() {
            continue;
        }
        let mut direct = AHashSet::new();
        for &pred in preds.iter() {
            if graph[pred].is_junction() {
                let mut trail = AHashSet::new();
                for source in junction_sources(graph, parents, pred, &mut cache, &mut trail) {
                    direct.insert(source);
                }
            } else {
                direct.insert(pred);
            }
        }
        elided.insert(step, direct);
    }
    elided
}

/// Transitive non-junction predecessors of a junction step.
///
/// The trail set breaks junction cycles in malformed graphs; a junction
/// reached through itself resolves to nothing rather than recursing.
fn junction_sources(
    graph: &StepGraph,
    parents: &ParentMap,
    junction: StepId,
    cache: &mut AHashMap<StepId, AHashSet<StepId>>,
    trail: &mut AHashSet<StepId>,
) -> AHashSet<StepId> {
    if let Some(hit) = cache.get(&junction) {
        return hit.clone();
    }
    if !trail.insert(junction) {
        return AHashSet::new();
    }

    let mut sources = AHashSet::new();
    if let Some(preds) = parents.get(&junction) {
        for &pred in preds.iter() {
            if graph[pred].is_junction() {
                for source in junction_sources(graph, parents, pred, cache, trail) {
                    sources.insert(source);
                }
            } else {
                sources.insert(pred);
            }
        }
    }

    trail.remove(&junction);
    cache.insert(junction, sources.clone());
    sources
}
