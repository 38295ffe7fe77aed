//! Ingredient and time rollups over a step graph.
//!
//! Everything here is best-effort: half-edited graphs produce partial
//! results (empty lists, zero times) instead of errors, so the editor can
//! keep its summary panes live mid-edit. The one refusal is
//! [`cook_time_range`] over converging topologies, which is a documented
//! open problem rather than a guessed algorithm.

use ahash::{AHashMap, AHashSet};
use itertools::Itertools;
use std::collections::VecDeque;

use crate::analysis::possible_paths;
use crate::error::RollupError;
use crate::step::{IngredientUsage, StepGraph, StepId, StepKind};

/// Merges usages by exact (case-sensitive) name, summing quantities.
///
/// First-appearance order is kept; the first-seen unit and note win for a
/// merged entry.
pub fn merge_usages(usages: impl IntoIterator<Item = IngredientUsage>) -> Vec<IngredientUsage> {
    let mut merged: Vec<IngredientUsage> = Vec::new();
    for usage in usages {
        match merged.iter_mut().find(|entry| entry.name == usage.name) {
            Some(entry) => entry.quantity += usage.quantity,
            None => merged.push(usage),
        }
    }
    merged
}

/// Everything `from` and its descendants consume, merged by name.
pub fn ingredient_totals(graph: &StepGraph, from: StepId) -> Vec<IngredientUsage> {
    let mut visited = AHashSet::new();
    let mut usages = Vec::new();
    gather_usages(graph, from, &mut visited, &mut usages);
    merge_usages(usages)
}

fn gather_usages(
    graph: &StepGraph,
    id: StepId,
    visited: &mut AHashSet<StepId>,
    out: &mut Vec<IngredientUsage>,
) {
    if !visited.insert(id) {
        return;
    }
    out.extend(graph[id].ingredients.iter().cloned());
    for edge in graph[id].out_edges() {
        if let Some(target) = edge.target {
            gather_usages(graph, target, visited, out);
        }
    }
}

/// Duration of the first Finish reachable from `from`, walking forward.
///
/// `None` when no Finish is reachable (a half-edited graph).
pub fn cleanup_minutes(graph: &StepGraph, from: StepId) -> Option<f64> {
    let mut visited = AHashSet::new();
    visited.insert(from);
    let mut queue = VecDeque::new();
    queue.push_back(from);
    while let Some(id) = queue.pop_front() {
        if graph[id].is_finish() {
            return Some(graph[id].minutes_to_complete);
        }
        for edge in graph[id].out_edges() {
            if let Some(target) = edge.target {
                if visited.insert(target) {
                    queue.push_back(target);
                }
            }
        }
    }
    None
}

/// Prep/cook/cleanup breakdown of one start-to-finish path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathInfo {
    /// The Start step's duration.
    pub prep_minutes: f64,
    /// Sum of the intermediate steps' durations along this one path.
    pub cook_minutes: f64,
    /// The Finish step's duration.
    pub cleanup_minutes: f64,
}

impl PathInfo {
    pub fn total_minutes(&self) -> f64 {
        self.prep_minutes + self.cook_minutes + self.cleanup_minutes
    }
}

/// Times one path as produced by [`possible_paths`].
///
/// Prep is the first step's duration, cook is the sum of everything in
/// between, and cleanup is the first Finish's duration, walking forward
/// past the path's last step when the path stopped early. `None` for an
/// empty path.
pub fn path_info(graph: &StepGraph, path: &[StepId]) -> Option<PathInfo> {
    let (&first, rest) = path.split_first()?;
    let prep_minutes = graph[first].minutes_to_complete;

    let mut cook_minutes = 0.0;
    let mut cleanup = None;
    for &id in rest {
        if graph[id].is_finish() {
            cleanup = Some(graph[id].minutes_to_complete);
            break;
        }
        cook_minutes += graph[id].minutes_to_complete;
    }
    let cleanup_minutes = cleanup
        .or_else(|| path.last().and_then(|&last| cleanup_minutes(graph, last)))
        .unwrap_or(0.0);

    Some(PathInfo {
        prep_minutes,
        cook_minutes,
        cleanup_minutes,
    })
}

/// Inclusive duration range across divergent paths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    pub min: f64,
    pub max: f64,
}

/// Cook-time range across a recipe's divergent paths.
///
/// Only defined for graphs without merge steps: once branches converge,
/// wall-clock cook time depends on which branches overlap in time, and no
/// aggregation over such topologies is attempted here. Any reachable merge
/// yields [`RollupError::ConvergentPaths`].
pub fn cook_time_range(graph: &StepGraph) -> Result<TimeRange, RollupError> {
    if contains_merge(graph, graph.root()) {
        return Err(RollupError::ConvergentPaths);
    }
    let mut range: Option<TimeRange> = None;
    for path in possible_paths(graph, graph.root()) {
        if let Some(info) = path_info(graph, &path) {
            range = Some(match range {
                None => TimeRange {
                    min: info.cook_minutes,
                    max: info.cook_minutes,
                },
                Some(range) => TimeRange {
                    min: range.min.min(info.cook_minutes),
                    max: range.max.max(info.cook_minutes),
                },
            });
        }
    }
    Ok(range.unwrap_or(TimeRange { min: 0.0, max: 0.0 }))
}

fn contains_merge(graph: &StepGraph, from: StepId) -> bool {
    let mut visited = AHashSet::new();
    visited.insert(from);
    let mut queue = VecDeque::new();
    queue.push_back(from);
    while let Some(id) = queue.pop_front() {
        if matches!(graph[id].kind, StepKind::Merge { .. }) {
            return true;
        }
        for edge in graph[id].out_edges() {
            if let Some(target) = edge.target {
                if visited.insert(target) {
                    queue.push_back(target);
                }
            }
        }
    }
    false
}

/// Min/max quantity of one ingredient across a recipe's divergent paths.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientRange {
    pub name: String,
    pub unit: String,
    pub min: f64,
    pub max: f64,
}

/// Per-ingredient min/max across every enumerated path, sorted by name.
///
/// An ingredient absent from some path has a min of zero.
pub fn ingredient_ranges(graph: &StepGraph) -> Vec<IngredientRange> {
    let paths = possible_paths(graph, graph.root());
    let path_count = paths.len();

    let mut by_name: AHashMap<String, (String, Vec<f64>)> = AHashMap::new();
    for path in &paths {
        let totals = merge_usages(
            path.iter()
                .flat_map(|&id| graph[id].ingredients.iter().cloned()),
        );
        for usage in totals {
            by_name
                .entry(usage.name)
                .or_insert_with(|| (usage.unit, Vec::new()))
                .1
                .push(usage.quantity);
        }
    }

    by_name
        .into_iter()
        .map(|(name, (unit, quantities))| {
            let max = quantities.iter().copied().fold(0.0_f64, f64::max);
            let min = if quantities.len() < path_count {
                0.0
            } else {
                quantities.iter().copied().fold(f64::INFINITY, f64::min)
            };
            IngredientRange {
                name,
                unit,
                min,
                max,
            }
        })
        .sorted_by(|a, b| a.name.cmp(&b.name))
        .collect()
}
