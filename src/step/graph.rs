use serde::{Deserialize, Serialize};
use std::ops::Index;

use super::{OutEdge, Step, StepId, StepKind};
use crate::error::GraphError;

/// Arena-backed recipe step graph.
///
/// Steps are owned by the graph and addressed by [`StepId`]; edges hold ids
/// instead of pointers, so Merge fan-in and Split fan-out are plain lookups
/// and the whole structure serializes without any cycle handling.
///
/// The graph is created with its Start step already in place; editing adds
/// steps and rewires edges. Steps are never removed by the core; only
/// edges are attached and detached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepGraph {
    steps: Vec<Step>,
    root: StepId,
}

impl StepGraph {
    /// Creates a graph containing only its Start step.
    pub fn new() -> Self {
        Self {
            steps: vec![Step::start()],
            root: StepId(0),
        }
    }

    /// The Start step, the entry point for every traversal.
    pub fn root(&self) -> StepId {
        self.root
    }

    /// Adds a step and returns its id.
    pub fn add(&mut self, step: Step) -> StepId {
        let id = StepId(self.steps.len() as u32);
        self.steps.push(step);
        id
    }

    pub fn get(&self, id: StepId) -> Option<&Step> {
        self.steps.get(id.index())
    }

    pub fn get_mut(&mut self, id: StepId) -> Option<&mut Step> {
        self.steps.get_mut(id.index())
    }

    /// Number of steps in the arena, reachable or not.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Iterates over every step with its id.
    pub fn steps(&self) -> impl Iterator<Item = (StepId, &Step)> {
        self.steps
            .iter()
            .enumerate()
            .map(|(i, step)| (StepId(i as u32), step))
    }

    /// Uniform edge access used by the traversal algorithms.
    pub fn out_edges(&self, id: StepId) -> &[OutEdge] {
        self[id].out_edges()
    }

    /// Appends a new detached labeled edge to a variable-fan-out step.
    pub fn push_edge(
        &mut self,
        id: StepId,
        label: impl Into<String>,
    ) -> Result<usize, GraphError> {
        let step = self
            .steps
            .get_mut(id.index())
            .ok_or(GraphError::UnknownStep { step: id })?;
        let edges = match &mut step.kind {
            StepKind::Start { paths } => paths,
            StepKind::Text { next, .. } => next,
            StepKind::Split { branches } => branches,
            StepKind::Timer { .. } | StepKind::Merge { .. } | StepKind::Finish => {
                return Err(GraphError::FixedFanOut { step: id });
            }
        };
        edges.push(OutEdge::new(label));
        Ok(edges.len() - 1)
    }

    /// Points an existing edge at a new target, or detaches it with `None`.
    pub fn set_edge_target(
        &mut self,
        id: StepId,
        edge: usize,
        target: Option<StepId>,
    ) -> Result<(), GraphError> {
        if let Some(target) = target {
            if target.index() >= self.steps.len() {
                return Err(GraphError::UnknownStep { step: target });
            }
        }
        let step = self
            .steps
            .get_mut(id.index())
            .ok_or(GraphError::UnknownStep { step: id })?;
        let edges = step.out_edges_mut();
        let fan_out = edges.len();
        let slot = edges.get_mut(edge).ok_or(GraphError::EdgeOutOfRange {
            step: id,
            edge,
            fan_out,
        })?;
        slot.target = target;
        Ok(())
    }

    /// Removes an edge from a variable-fan-out step and returns it.
    pub fn remove_edge(&mut self, id: StepId, edge: usize) -> Result<OutEdge, GraphError> {
        let step = self
            .steps
            .get_mut(id.index())
            .ok_or(GraphError::UnknownStep { step: id })?;
        let edges = match &mut step.kind {
            StepKind::Start { paths } => paths,
            StepKind::Text { next, .. } => next,
            StepKind::Split { branches } => branches,
            StepKind::Timer { .. } | StepKind::Merge { .. } | StepKind::Finish => {
                return Err(GraphError::FixedFanOut { step: id });
            }
        };
        if edge >= edges.len() {
            return Err(GraphError::EdgeOutOfRange {
                step: id,
                edge,
                fan_out: edges.len(),
            });
        }
        Ok(edges.remove(edge))
    }

    /// Adds `step` and wires a labeled edge from `from` to it.
    ///
    /// For single-edge kinds (Timer, Merge) the existing edge is relabeled
    /// and retargeted; for the rest a new edge is appended.
    pub fn chain(
        &mut self,
        from: StepId,
        label: impl Into<String>,
        step: Step,
    ) -> Result<StepId, GraphError> {
        let source = self
            .steps
            .get(from.index())
            .ok_or(GraphError::UnknownStep { step: from })?;
        if matches!(source.kind, StepKind::Finish) {
            return Err(GraphError::FixedFanOut { step: from });
        }
        let single = matches!(
            source.kind,
            StepKind::Timer { .. } | StepKind::Merge { .. }
        );

        let id = self.add(step);
        if single {
            if let StepKind::Timer { next } | StepKind::Merge { next } =
                &mut self.steps[from.index()].kind
            {
                next.label = label.into();
                next.target = Some(id);
            }
        } else {
            let edge = self.push_edge(from, label)?;
            self.set_edge_target(from, edge, Some(id))?;
        }
        Ok(id)
    }
}

impl Default for StepGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<StepId> for StepGraph {
    type Output = Step;

    fn index(&self, id: StepId) -> &Step {
        &self.steps[id.index()]
    }
}
