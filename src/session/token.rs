use std::fmt;

use crate::step::{IngredientUsage, StepId};

/// Identifies one live traversal position in a [`SessionRunner`](super::SessionRunner).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(pub(crate) u64);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Identifies the set of tokens spawned from one "start cooking" event.
///
/// Merge-sibling detection only considers tokens sharing a session id, so
/// two pots of the same recipe never wait on each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub(crate) u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// One in-progress traversal position within a cooking session.
#[derive(Debug, Clone)]
pub struct ActiveStepToken {
    pub(crate) id: TokenId,
    pub(crate) session: SessionId,
    pub(crate) current: StepId,
    pub(crate) remaining_minutes: f64,
    /// Ingredients already recorded along this token's path, keyed by the
    /// step that declared them so a revisited step replaces its record
    /// instead of double counting.
    pub(crate) used: Vec<(StepId, Vec<IngredientUsage>)>,
}

impl ActiveStepToken {
    pub fn id(&self) -> TokenId {
        self.id
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    /// The step this token currently sits at.
    pub fn current_step(&self) -> StepId {
        self.current
    }

    /// Display-only countdown for Timer steps.
    pub fn remaining_minutes(&self) -> f64 {
        self.remaining_minutes
    }

    /// Ingredient records accumulated so far, in traversal order.
    pub fn used_ingredients(&self) -> impl Iterator<Item = &IngredientUsage> {
        self.used.iter().flat_map(|(_, usages)| usages.iter())
    }

    pub(crate) fn record_usage(&mut self, step: StepId, usages: &[IngredientUsage]) {
        self.used.retain(|(recorded, _)| *recorded != step);
        if !usages.is_empty() {
            self.used.push((step, usages.to_vec()));
        }
    }

    /// Folds a merged-away sibling's records into this token, keeping this
    /// token's record wherever both visited the same step.
    pub(crate) fn absorb(&mut self, sibling: ActiveStepToken) {
        for (step, usages) in sibling.used {
            if !self.used.iter().any(|(recorded, _)| *recorded == step) {
                self.used.push((step, usages));
            }
        }
    }
}
