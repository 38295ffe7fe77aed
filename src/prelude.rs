//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the
//! souschef crate. Import this module to get access to the core
//! functionality without having to import each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use souschef::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! // Import a flat recipe the way the LLM/scraper collaborators do.
//! let mut draft = LinearDraft::new("Weeknight pasta");
//! draft.push(DraftStep::Instruction {
//!     title: "Boil the pasta".to_string(),
//!     text: None,
//!     minutes: 9.0,
//!     ingredients: vec![IngredientUsage::new("spaghetti", 500.0, "g")],
//! });
//! let recipe = draft.into_recipe()?;
//! assert!(recipe.is_cookable());
//!
//! // Cook it live.
//! let mut runner = SessionRunner::new();
//! let session = runner.start_session(&recipe.graph);
//! println!("session {} has {} token(s)", session, runner.tokens().len());
//! # Ok(())
//! # }
//! ```

// Step model
pub use crate::step::{IngredientUsage, OutEdge, Step, StepGraph, StepId, StepKind};

// Graph analysis
pub use crate::analysis::{
    GroupItem, ParentMap, elide_junctions, nested_groups, parent_map, paths_are_valid,
    possible_paths,
};

// Aggregation
pub use crate::rollup::{
    IngredientRange, PathInfo, TimeRange, cleanup_minutes, cook_time_range, ingredient_ranges,
    ingredient_totals, merge_usages, path_info,
};

// Live cooking sessions
pub use crate::session::{ActiveStepToken, Advance, SessionId, SessionRunner, TokenId};

// Recipe records and import
pub use crate::recipe::{DraftStep, IntoStepGraph, LinearDraft, Recipe, RecipeArchive};

// Error types
pub use crate::error::{
    ArchiveError, GraphError, RecipeConversionError, RollupError, SessionError,
};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
