use ahash::AHashSet;

use crate::step::{StepGraph, StepId, StepKind};

/// Enumerates every simple forward path from `from` to each reachable
/// terminal, as ordered step lists.
///
/// A terminal is a step with no attached outgoing targets (a Finish, or a
/// dead end in a half-edited graph). The on-path guard keeps malformed
/// cyclic graphs from recursing forever; a path is cut rather than looped.
pub fn possible_paths(graph: &StepGraph, from: StepId) -> Vec<Vec<StepId>> {
    let mut paths = Vec::new();
    let mut current = Vec::new();
    let mut on_path = AHashSet::new();
    collect_paths(graph, from, &mut current, &mut on_path, &mut paths);
    paths
}

fn collect_paths(
    graph: &StepGraph,
    id: StepId,
    current: &mut Vec<StepId>,
    on_path: &mut AHashSet<StepId>,
    paths: &mut Vec<Vec<StepId>>,
) {
    current.push(id);
    on_path.insert(id);

    let targets: Vec<StepId> = graph[id]
        .out_edges()
        .iter()
        .filter_map(|edge| edge.target)
        .filter(|target| !on_path.contains(target))
        .collect();

    if targets.is_empty() {
        paths.push(current.clone());
    } else {
        for target in targets {
            collect_paths(graph, target, current, on_path, paths);
        }
    }

    on_path.remove(&id);
    current.pop();
}

/// Checks that every route out of `from` eventually lands on a Finish.
///
/// A step is valid when it is a Finish, or when it has at least one
/// outgoing edge, every edge has a target, and every target is itself
/// valid. Revisited steps count as already checked, which both memoizes
/// diamonds and terminates on cycles. Dead-end non-Finish steps and
/// detached edges make the whole graph invalid; callers are expected to
/// run this before starting a cooking session.
pub fn paths_are_valid(graph: &StepGraph, from: StepId) -> bool {
    let mut checked = AHashSet::new();
    check_valid(graph, from, &mut checked)
}

fn check_valid(graph: &StepGraph, id: StepId, checked: &mut AHashSet<StepId>) -> bool {
    if !checked.insert(id) {
        return true;
    }
    match graph[id].kind {
        StepKind::Finish => true,
        StepKind::Start { .. }
        | StepKind::Text { .. }
        | StepKind::Timer { .. }
        | StepKind::Split { .. }
        | StepKind::Merge { .. } => {
            let edges = graph[id].out_edges();
            !edges.is_empty()
                && edges.iter().all(|edge| match edge.target {
                    Some(target) => check_valid(graph, target, checked),
                    None => false,
                })
        }
    }
}
