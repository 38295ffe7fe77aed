use ahash::AHashSet;

use crate::step::{StepGraph, StepId, StepKind};

/// One entry in the nested display structure of a recipe.
///
/// A recipe renders as an ordered sequence of these: plain steps for linear
/// runs, and `Parallel` groups for the region between a split and its
/// merge. `Parallel` membership is unordered even though a `Vec` carries it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupItem {
    /// A single instruction or timer step.
    Step(StepId),
    /// An ordered run of items forming one branch.
    Sequence(Vec<GroupItem>),
    /// Branches that may be worked in any order.
    Parallel(Vec<GroupItem>),
}

/// Computes the sequence/parallel nesting used to render a recipe as
/// nested lists.
///
/// Start, Finish and the routing junctions never appear in the output; a
/// split opens a `Parallel` group whose branches each run up to the merge
/// that closes the region, and the outer sequence resumes past that merge.
/// A fan-out left with a single attached branch contributes that branch
/// directly instead of a one-member group. Returns an empty sequence for a
/// missing root or a Start with no attached paths.
pub fn nested_groups(graph: &StepGraph, root: Option<StepId>) -> Vec<GroupItem> {
    let Some(root) = root else {
        return Vec::new();
    };
    let mut items = Vec::new();
    let mut visited = AHashSet::new();
    let mut cursor = Some(root);
    while cursor.is_some() {
        match walk_segment(graph, cursor, &mut visited, &mut items) {
            Some(merge) => cursor = merge_successor(graph, merge),
            None => break,
        }
    }
    items
}

fn merge_successor(graph: &StepGraph, merge: StepId) -> Option<StepId> {
    graph[merge].out_edges().first().and_then(|edge| edge.target)
}

/// Walks one linear run of steps, recursing through fan-outs.
///
/// Returns the merge that terminated the run, if any, so the caller can
/// resume past it. The visited set guards against malformed cycles and
/// against walking a shared step twice.
fn walk_segment(
    graph: &StepGraph,
    mut cursor: Option<StepId>,
    visited: &mut AHashSet<StepId>,
    items: &mut Vec<GroupItem>,
) -> Option<StepId> {
    while let Some(id) = cursor {
        match &graph[id].kind {
            StepKind::Finish => return None,
            StepKind::Merge { .. } => return Some(id),
            StepKind::Start { paths } => {
                if !visited.insert(id) {
                    return None;
                }
                let targets: Vec<StepId> = paths.iter().filter_map(|e| e.target).collect();
                match targets.as_slice() {
                    [] => return None,
                    [only] => cursor = Some(*only),
                    _ => match fan_out(graph, &targets, visited, items) {
                        Some(merge) => cursor = merge_successor(graph, merge),
                        None => return None,
                    },
                }
            }
            StepKind::Split { branches } => {
                if !visited.insert(id) {
                    return None;
                }
                let targets: Vec<StepId> = branches.iter().filter_map(|e| e.target).collect();
                match fan_out(graph, &targets, visited, items) {
                    Some(merge) => cursor = merge_successor(graph, merge),
                    None => return None,
                }
            }
            StepKind::Text { next, .. } => {
                if !visited.insert(id) {
                    return None;
                }
                items.push(GroupItem::Step(id));
                let targets: Vec<StepId> = next.iter().filter_map(|e| e.target).collect();
                match targets.as_slice() {
                    [] => return None,
                    [only] => cursor = Some(*only),
                    _ => match fan_out(graph, &targets, visited, items) {
                        Some(merge) => cursor = merge_successor(graph, merge),
                        None => return None,
                    },
                }
            }
            StepKind::Timer { next } => {
                if !visited.insert(id) {
                    return None;
                }
                items.push(GroupItem::Step(id));
                cursor = next.target;
            }
        }
    }
    None
}

/// Builds the group for one fan-out region and appends it to `items`.
///
/// Each branch is walked to the merge closing the region; single-item
/// branches are flattened, empty branches (an edge wired straight into the
/// merge) are dropped. Returns the closing merge, taken from the first
/// branch that reached one.
fn fan_out(
    graph: &StepGraph,
    targets: &[StepId],
    visited: &mut AHashSet<StepId>,
    items: &mut Vec<GroupItem>,
) -> Option<StepId> {
    let mut branches = Vec::new();
    let mut closing_merge = None;
    for &target in targets {
        let mut branch = Vec::new();
        if let Some(merge) = walk_segment(graph, Some(target), visited, &mut branch) {
            closing_merge.get_or_insert(merge);
        }
        match branch.len() {
            0 => {}
            1 => {
                if let Some(only) = branch.pop() {
                    branches.push(only);
                }
            }
            _ => branches.push(GroupItem::Sequence(branch)),
        }
    }
    match branches.len() {
        0 => {}
        1 => {
            if let Some(only) = branches.pop() {
                items.push(only);
            }
        }
        _ => items.push(GroupItem::Parallel(branches)),
    }
    closing_merge
}
