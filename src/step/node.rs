use serde::{Deserialize, Serialize};
use std::fmt;
use std::slice;

use super::IngredientUsage;

/// Stable handle to a step stored in a [`StepGraph`](super::StepGraph) arena.
///
/// A step's identity IS its id: two `Text` steps with identical titles are
/// still distinct nodes, which parent-mapping and merge detection depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(pub(crate) u32);

impl StepId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A labeled outgoing connection to another step.
///
/// The target is rewirable and may be detached while the editor is mid-edit;
/// path validity treats a detached edge as an incomplete recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutEdge {
    pub label: String,
    pub target: Option<StepId>,
}

impl OutEdge {
    /// Creates a detached edge.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: None,
        }
    }

    /// Creates an edge already pointing at `target`.
    pub fn to(label: impl Into<String>, target: StepId) -> Self {
        Self {
            label: label.into(),
            target: Some(target),
        }
    }
}

/// The closed set of step kinds a recipe graph is made of.
///
/// Every consumer (traversal, grouping, the session runner, serialization)
/// matches exhaustively on this enum, so adding a kind forces each site to
/// be revisited at compile time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StepKind {
    /// The graph's entry point. Usually a single path, but the model keeps
    /// a list so a recipe may open with several top-level tracks.
    Start { paths: Vec<OutEdge> },
    /// An instruction (or branching question) shown to the cook.
    Text {
        title: String,
        instructions: Option<String>,
        next: Vec<OutEdge>,
    },
    /// A wait with exactly one continuation.
    Timer { next: OutEdge },
    /// Pure fan-out into parallel prep tracks.
    Split { branches: Vec<OutEdge> },
    /// Pure fan-in; incoming edges are tracked externally via parent maps.
    Merge { next: OutEdge },
    /// Terminal step.
    Finish,
}

/// A single node of a recipe's step graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    pub kind: StepKind,
    /// Editor canvas placement. Never read by the graph logic.
    pub position: (f32, f32),
    /// Estimated duration of this step, in minutes.
    pub minutes_to_complete: f64,
    /// Ingredients consumed while performing this step.
    pub ingredients: Vec<IngredientUsage>,
}

impl Step {
    fn with_kind(kind: StepKind) -> Self {
        Self {
            kind,
            position: (0.0, 0.0),
            minutes_to_complete: 0.0,
            ingredients: Vec::new(),
        }
    }

    /// A Start step with no paths yet.
    pub fn start() -> Self {
        Self::with_kind(StepKind::Start { paths: Vec::new() })
    }

    /// An instruction step with no outgoing edges yet.
    pub fn text(title: impl Into<String>) -> Self {
        Self::with_kind(StepKind::Text {
            title: title.into(),
            instructions: None,
            next: Vec::new(),
        })
    }

    /// A timer step; its single continuation starts detached.
    pub fn timer(minutes: f64) -> Self {
        let mut step = Self::with_kind(StepKind::Timer {
            next: OutEdge::new("Next"),
        });
        step.minutes_to_complete = minutes;
        step
    }

    /// A fan-out step with no branches yet (the editor adds two or more).
    pub fn split() -> Self {
        Self::with_kind(StepKind::Split {
            branches: Vec::new(),
        })
    }

    /// A fan-in step; its single continuation starts detached.
    pub fn merge() -> Self {
        Self::with_kind(StepKind::Merge {
            next: OutEdge::new("Next"),
        })
    }

    /// A terminal step.
    pub fn finish() -> Self {
        Self::with_kind(StepKind::Finish)
    }

    /// Sets the editor placement hint.
    #[must_use]
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = (x, y);
        self
    }

    /// Sets the duration estimate.
    #[must_use]
    pub fn taking_minutes(mut self, minutes: f64) -> Self {
        self.minutes_to_complete = minutes;
        self
    }

    /// Attaches an ingredient requirement.
    #[must_use]
    pub fn using(mut self, ingredient: IngredientUsage) -> Self {
        self.ingredients.push(ingredient);
        self
    }

    /// Sets the free-text instructions of a Text step; no-op for other kinds.
    #[must_use]
    pub fn with_instructions(mut self, text: impl Into<String>) -> Self {
        if let StepKind::Text { instructions, .. } = &mut self.kind {
            *instructions = Some(text.into());
        }
        self
    }

    /// The ordered outgoing edges of this step, whatever its kind.
    ///
    /// This is the one accessor every graph algorithm traverses through;
    /// single-edge kinds are exposed as one-element slices.
    pub fn out_edges(&self) -> &[OutEdge] {
        match &self.kind {
            StepKind::Start { paths } => paths,
            StepKind::Text { next, .. } => next,
            StepKind::Timer { next } => slice::from_ref(next),
            StepKind::Split { branches } => branches,
            StepKind::Merge { next } => slice::from_ref(next),
            StepKind::Finish => &[],
        }
    }

    /// Mutable view of the outgoing edges.
    pub fn out_edges_mut(&mut self) -> &mut [OutEdge] {
        match &mut self.kind {
            StepKind::Start { paths } => paths,
            StepKind::Text { next, .. } => next,
            StepKind::Timer { next } => slice::from_mut(next),
            StepKind::Split { branches } => branches,
            StepKind::Merge { next } => slice::from_mut(next),
            StepKind::Finish => &mut [],
        }
    }

    /// True for the pure routing steps (Split and Merge) that elision and
    /// grouping hide from display.
    pub fn is_junction(&self) -> bool {
        matches!(
            self.kind,
            StepKind::Split { .. } | StepKind::Merge { .. }
        )
    }

    pub fn is_finish(&self) -> bool {
        matches!(self.kind, StepKind::Finish)
    }

    /// Short label for display and logs.
    pub fn display_name(&self) -> &str {
        match &self.kind {
            StepKind::Start { .. } => "Start",
            StepKind::Text { title, .. } => title,
            StepKind::Timer { .. } => "Timer",
            StepKind::Split { .. } => "Split",
            StepKind::Merge { .. } => "Merge",
            StepKind::Finish => "Finish",
        }
    }
}
