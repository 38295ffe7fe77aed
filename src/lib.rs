//! # Souschef - Recipe Step-Graph and Cooking-Session Engine
//!
//! **Souschef** is the core of a recipe manager: a directed step graph
//! modeling a recipe's procedure (including parallel prep tracks that split
//! apart and rejoin), pure analysis over that graph (predecessor maps,
//! junction elision, nested display grouping, path validity), ingredient and
//! time rollups, and a live session runner that walks one token per
//! in-progress branch through the graph, waiting at merge points until every
//! sibling arrives.
//!
//! ## Core Workflow
//!
//! The engine is format-agnostic about where recipes come from. The editor
//! builds a [`StepGraph`](step::StepGraph) by hand; importers (an LLM recipe
//! parser, a web scraper) implement [`IntoStepGraph`](recipe::IntoStepGraph)
//! to hand over flat drafts. The usual flow is:
//!
//! 1.  **Build or import**: construct a [`StepGraph`](step::StepGraph), or
//!     convert an external source through [`LinearDraft`](recipe::LinearDraft).
//! 2.  **Validate**: [`paths_are_valid`](analysis::paths_are_valid) must hold
//!     before a recipe is cooked; analysis and rollups stay best-effort on
//!     half-edited graphs.
//! 3.  **Display**: [`nested_groups`](analysis::nested_groups) turns the
//!     graph into the sequence/parallel outline the UI renders;
//!     [`ingredient_totals`](rollup::ingredient_totals) and
//!     [`path_info`](rollup::path_info) feed the summary panes.
//! 4.  **Cook**: a [`SessionRunner`](session::SessionRunner) drives live
//!     sessions, forking tokens at splits and joining them at merges.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use souschef::prelude::*;
//!
//! fn main() -> Result<()> {
//!     // Build a small two-track recipe by hand.
//!     let mut graph = StepGraph::new();
//!     let root = graph.root();
//!     let prep = graph.chain(
//!         root,
//!         "Start",
//!         Step::text("Chop the aromatics")
//!             .taking_minutes(5.0)
//!             .using(IngredientUsage::new("onion", 1.0, "piece")),
//!     )?;
//!     let split = graph.chain(prep, "Next", Step::split())?;
//!     let sauce = graph.chain(split, "Sauce", Step::text("Simmer the sauce").taking_minutes(20.0))?;
//!     let pasta = graph.chain(split, "Pasta", Step::timer(9.0))?;
//!     let merge = graph.chain(sauce, "Next", Step::merge())?;
//!     graph.set_edge_target(pasta, 0, Some(merge))?;
//!     let plate = graph.chain(merge, "Next", Step::text("Toss and plate"))?;
//!     graph.chain(plate, "Done", Step::finish())?;
//!
//!     assert!(paths_are_valid(&graph, root));
//!
//!     // Walk it live: one token until the split, two afterwards.
//!     let mut runner = SessionRunner::new();
//!     let session = runner.start_session(&graph);
//!     let token = runner.tokens()[0].id();
//!     runner.advance(&graph, token, 0)?; // onto "Chop the aromatics"
//!
//!     println!(
//!         "session {}: {} live token(s)",
//!         session,
//!         runner.tokens().len()
//!     );
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod error;
pub mod prelude;
pub mod recipe;
pub mod rollup;
pub mod session;
pub mod step;
