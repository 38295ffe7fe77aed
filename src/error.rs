use crate::session::TokenId;
use crate::step::StepId;
use thiserror::Error;

/// Errors that can occur while editing a step graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Step {step} does not exist in this graph")]
    UnknownStep { step: StepId },

    #[error("Step {step} has a fixed fan-out and cannot gain or lose edges")]
    FixedFanOut { step: StepId },

    #[error("Step {step} has {fan_out} outgoing edges, but edge index {edge} was requested")]
    EdgeOutOfRange {
        step: StepId,
        edge: usize,
        fan_out: usize,
    },
}

/// Errors that can occur while driving a live cooking session.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("Token {token} is not live in this runner")]
    UnknownToken { token: TokenId },

    #[error(
        "Token {token} sits at step {step} with {fan_out} outgoing edges; edge index {edge} is out of range"
    )]
    EdgeOutOfRange {
        token: TokenId,
        step: StepId,
        edge: usize,
        fan_out: usize,
    },

    #[error("Edge {edge} of step {step} has no target attached; validate the recipe before cooking")]
    UnattachedEdge { step: StepId, edge: usize },

    #[error("The start step has no attached paths to cook along")]
    NoEntryPaths,
}

/// Errors that can occur during time/ingredient aggregation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RollupError {
    #[error(
        "Cook time ranges over converging paths are not supported; the graph contains a merge step"
    )]
    ConvergentPaths,
}

/// Errors that can occur when saving or loading a recipe archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Could not access archive file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Archive serialization failed: {0}")]
    Encode(String),

    #[error("Archive deserialization failed: {0}")]
    Decode(String),
}

/// Errors that can occur when converting an external recipe source into a
/// step graph.
#[derive(Error, Debug, Clone)]
pub enum RecipeConversionError {
    #[error("Invalid recipe draft: {0}")]
    ValidationError(String),
}
