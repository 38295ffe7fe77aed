//! The live cooking-session state machine.
//!
//! Concurrency here is purely logical: a session's tokens represent
//! parallel prep tracks, but every transition is a discrete, user-triggered
//! state update applied one at a time. Waiting at a merge is a steady
//! state, not a suspended computation.

mod token;

pub use token::*;

use ahash::AHashSet;

use crate::error::SessionError;
use crate::rollup::merge_usages;
use crate::step::{IngredientUsage, StepGraph, StepId, StepKind};

/// Outcome of advancing a token one transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// The token moved onto an instruction or timer step.
    Moved,
    /// The token reached a merge and is waiting for its siblings.
    Waiting,
    /// The token fanned out; these are the live branch tokens it spawned.
    Forked(Vec<TokenId>),
    /// The token reached a Finish; the rollup of everything it consumed is
    /// ready for inventory deduction.
    Finished(Vec<IngredientUsage>),
}

/// Drives live cooking sessions over step graphs.
///
/// Holds every live [`ActiveStepToken`] across sessions. Callers are
/// expected to check [`paths_are_valid`](crate::analysis::paths_are_valid)
/// before starting a session; the runner reports editing leftovers
/// (detached edges, bad indices) as [`SessionError`]s but does not
/// re-validate whole graphs.
#[derive(Debug, Default)]
pub struct SessionRunner {
    tokens: Vec<ActiveStepToken>,
    next_token: u64,
    next_session: u64,
}

impl SessionRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns a fresh session with a single token parked on the Start step.
    pub fn start_session(&mut self, graph: &StepGraph) -> SessionId {
        let session = SessionId(self.next_session);
        self.next_session += 1;
        let start = graph.root();
        self.spawn(session, start, graph[start].minutes_to_complete, Vec::new());
        session
    }

    /// Every live token, across sessions.
    pub fn tokens(&self) -> &[ActiveStepToken] {
        &self.tokens
    }

    pub fn token(&self, token: TokenId) -> Option<&ActiveStepToken> {
        self.tokens.iter().find(|t| t.id == token)
    }

    /// The live tokens belonging to one session.
    pub fn session_tokens(&self, session: SessionId) -> impl Iterator<Item = &ActiveStepToken> {
        self.tokens.iter().filter(move |t| t.session == session)
    }

    /// Advances `token` along the outgoing edge at index `edge`.
    ///
    /// The current step's ingredients are recorded first (replacing any
    /// prior record for that step), then the edge target is entered:
    /// Text/Timer steps are moved onto, a Split fans the token out, a
    /// Merge either parks it or resolves straight through if this is the
    /// last arrival, and a Finish retires it. A Start that fans out into
    /// several paths forks across all of them regardless of `edge`. The
    /// merge sweep runs after the transition.
    pub fn advance(
        &mut self,
        graph: &StepGraph,
        token: TokenId,
        edge: usize,
    ) -> Result<Advance, SessionError> {
        let index = self
            .index_of(token)
            .ok_or(SessionError::UnknownToken { token })?;
        let current = self.tokens[index].current;
        let usages = graph[current].ingredients.clone();
        self.tokens[index].record_usage(current, &usages);

        let multi_path_start = matches!(graph[current].kind, StepKind::Start { .. })
            && graph[current].out_edges().len() != 1;

        let outcome = if multi_path_start {
            let attached: Vec<StepId> = graph[current]
                .out_edges()
                .iter()
                .filter_map(|e| e.target)
                .collect();
            if attached.is_empty() {
                return Err(SessionError::NoEntryPaths);
            }
            let parent = self.tokens.remove(index);
            Advance::Forked(self.fork(graph, parent, &attached))
        } else {
            let edges = graph[current].out_edges();
            let slot = edges.get(edge).ok_or(SessionError::EdgeOutOfRange {
                token,
                step: current,
                edge,
                fan_out: edges.len(),
            })?;
            let target = slot.target.ok_or(SessionError::UnattachedEdge {
                step: current,
                edge,
            })?;
            self.enter(graph, token, target)
        };

        self.update_merge_steps(graph);
        Ok(outcome)
    }

    /// Drops a token (the cook abandoned that branch) and re-checks merges,
    /// since a waiting sibling may have just become the last arrival.
    pub fn discard(&mut self, graph: &StepGraph, token: TokenId) -> Result<(), SessionError> {
        let index = self
            .index_of(token)
            .ok_or(SessionError::UnknownToken { token })?;
        self.tokens.remove(index);
        self.update_merge_steps(graph);
        Ok(())
    }

    /// Counts down a timer display. Purely advisory: hitting zero never
    /// advances anything.
    pub fn tick(&mut self, token: TokenId, minutes: f64) -> Result<f64, SessionError> {
        let index = self
            .index_of(token)
            .ok_or(SessionError::UnknownToken { token })?;
        let entry = &mut self.tokens[index];
        entry.remaining_minutes = (entry.remaining_minutes - minutes).max(0.0);
        Ok(entry.remaining_minutes)
    }

    /// Union of everything a session has consumed so far, merged by name.
    ///
    /// Forked tokens inherit their parent's records keyed by step, so the
    /// shared history is counted once no matter how many branches carry it.
    pub fn session_used_ingredients(&self, session: SessionId) -> Vec<IngredientUsage> {
        let mut seen = AHashSet::new();
        let mut usages = Vec::new();
        for token in self.session_tokens(session) {
            for (step, list) in &token.used {
                if seen.insert(*step) {
                    usages.extend(list.iter().cloned());
                }
            }
        }
        merge_usages(usages)
    }

    /// Re-resolves any token waiting at a merge that has become the last
    /// arrival, because a sibling just arrived, finished, or was discarded.
    ///
    /// Runs to a fixed point; idempotent and safe to call redundantly.
    pub fn update_merge_steps(&mut self, graph: &StepGraph) {
        loop {
            let parked: Vec<(TokenId, StepId)> = self
                .tokens
                .iter()
                .filter(|t| matches!(graph[t.current].kind, StepKind::Merge { .. }))
                .map(|t| (t.id, t.current))
                .collect();

            let mut moved = false;
            for (token, merge) in parked {
                // May have been absorbed by an earlier resolution this pass.
                let Some(index) = self.index_of(token) else {
                    continue;
                };
                if self.tokens[index].current != merge {
                    continue;
                }
                let session = self.tokens[index].session;
                if self.sibling_converging(graph, session, token, merge) {
                    continue;
                }
                let Some(next) = graph[merge].out_edges().first().and_then(|e| e.target) else {
                    continue;
                };
                self.absorb_parked(token, merge);
                self.enter(graph, token, next);
                moved = true;
            }
            if !moved {
                break;
            }
        }
    }

    fn spawn(
        &mut self,
        session: SessionId,
        current: StepId,
        remaining_minutes: f64,
        used: Vec<(StepId, Vec<IngredientUsage>)>,
    ) -> TokenId {
        let id = TokenId(self.next_token);
        self.next_token += 1;
        self.tokens.push(ActiveStepToken {
            id,
            session,
            current,
            remaining_minutes,
            used,
        });
        id
    }

    fn index_of(&self, token: TokenId) -> Option<usize> {
        self.tokens.iter().position(|t| t.id == token)
    }

    /// Applies the entry rules for landing `token` on `target`.
    fn enter(&mut self, graph: &StepGraph, token: TokenId, target: StepId) -> Advance {
        let mut trail = AHashSet::new();
        self.enter_guarded(graph, token, target, &mut trail)
    }

    fn enter_guarded(
        &mut self,
        graph: &StepGraph,
        token: TokenId,
        target: StepId,
        trail: &mut AHashSet<StepId>,
    ) -> Advance {
        let Some(index) = self.index_of(token) else {
            return Advance::Moved;
        };
        match &graph[target].kind {
            StepKind::Finish => {
                let done = self.tokens.remove(index);
                let rollup = merge_usages(done.used.into_iter().flat_map(|(_, usages)| usages));
                Advance::Finished(rollup)
            }
            StepKind::Split { branches } => {
                let attached: Vec<StepId> = branches.iter().filter_map(|e| e.target).collect();
                let parent = self.tokens.remove(index);
                Advance::Forked(self.fork(graph, parent, &attached))
            }
            StepKind::Merge { next } => {
                // A merge wired back upstream of itself would otherwise
                // recurse forever through resolution chains.
                if !trail.insert(target) {
                    self.tokens[index].current = target;
                    self.tokens[index].remaining_minutes = 0.0;
                    return Advance::Waiting;
                }
                let session = self.tokens[index].session;
                if self.sibling_converging(graph, session, token, target) {
                    self.tokens[index].current = target;
                    self.tokens[index].remaining_minutes = 0.0;
                    Advance::Waiting
                } else {
                    match next.target {
                        Some(next_target) => {
                            self.absorb_parked(token, target);
                            self.enter_guarded(graph, token, next_target, trail)
                        }
                        // Dangling merge exit in a half-edited graph: park.
                        None => {
                            self.tokens[index].current = target;
                            self.tokens[index].remaining_minutes = 0.0;
                            Advance::Waiting
                        }
                    }
                }
            }
            StepKind::Start { .. } | StepKind::Text { .. } | StepKind::Timer { .. } => {
                self.tokens[index].current = target;
                self.tokens[index].remaining_minutes = graph[target].minutes_to_complete;
                Advance::Moved
            }
        }
    }

    /// Retires `parent` into one token per branch target, each inheriting
    /// the session and the accumulated usage records.
    ///
    /// All branch tokens are spawned at the parent's position before any of
    /// them enters its target, so a branch wired straight into a merge
    /// still sees its yet-to-move siblings as converging.
    fn fork(
        &mut self,
        graph: &StepGraph,
        parent: ActiveStepToken,
        targets: &[StepId],
    ) -> Vec<TokenId> {
        let ids: Vec<TokenId> = targets
            .iter()
            .map(|_| {
                self.spawn(
                    parent.session,
                    parent.current,
                    0.0,
                    parent.used.clone(),
                )
            })
            .collect();

        let mut live = Vec::new();
        for (&target, id) in targets.iter().zip(ids) {
            match self.enter(graph, id, target) {
                Advance::Finished(_) => {}
                Advance::Forked(nested) => live.extend(nested),
                Advance::Moved | Advance::Waiting => live.push(id),
            }
        }
        live
    }

    /// True while another token of the same session can still reach
    /// `merge`. Tokens already parked at the merge have arrived and do not
    /// count.
    fn sibling_converging(
        &self,
        graph: &StepGraph,
        session: SessionId,
        token: TokenId,
        merge: StepId,
    ) -> bool {
        self.tokens.iter().any(|t| {
            t.session == session
                && t.id != token
                && t.current != merge
                && reaches(graph, t.current, merge)
        })
    }

    /// Removes same-session tokens parked at `merge`, folding their usage
    /// records into `token` so exactly one token continues past the merge.
    fn absorb_parked(&mut self, token: TokenId, merge: StepId) {
        let Some(keeper) = self.index_of(token) else {
            return;
        };
        let session = self.tokens[keeper].session;
        let parked: Vec<TokenId> = self
            .tokens
            .iter()
            .filter(|t| t.session == session && t.id != token && t.current == merge)
            .map(|t| t.id)
            .collect();
        for sibling in parked {
            if let Some(position) = self.index_of(sibling) {
                let removed = self.tokens.remove(position);
                if let Some(keeper) = self.index_of(token) {
                    self.tokens[keeper].absorb(removed);
                }
            }
        }
    }
}

/// Forward closure check: can `goal` still be reached from `from`?
fn reaches(graph: &StepGraph, from: StepId, goal: StepId) -> bool {
    if from == goal {
        return true;
    }
    let mut visited = AHashSet::new();
    visited.insert(from);
    let mut stack = vec![from];
    while let Some(id) = stack.pop() {
        for edge in graph[id].out_edges() {
            if let Some(target) = edge.target {
                if target == goal {
                    return true;
                }
                if visited.insert(target) {
                    stack.push(target);
                }
            }
        }
    }
    false
}
