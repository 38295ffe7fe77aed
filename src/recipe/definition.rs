use serde::{Deserialize, Serialize};

use crate::analysis::{GroupItem, nested_groups, paths_are_valid};
use crate::rollup::ingredient_totals;
use crate::step::{IngredientUsage, StepGraph};

/// A stored recipe: metadata plus the step graph the cook walks through.
///
/// This is the record the persistence layer keeps on disk, wholesale;
/// everything in it (the graph included) round-trips through serde.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    pub description: Option<String>,
    pub servings: Option<u32>,
    pub source_url: Option<String>,
    pub graph: StepGraph,
}

impl Recipe {
    /// Creates a recipe whose graph holds only its Start step.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            servings: None,
            source_url: None,
            graph: StepGraph::new(),
        }
    }

    /// A recipe can be cooked once every path out of Start reaches a Finish.
    pub fn is_cookable(&self) -> bool {
        paths_are_valid(&self.graph, self.graph.root())
    }

    /// Every ingredient the whole recipe consumes, merged by name.
    pub fn shopping_list(&self) -> Vec<IngredientUsage> {
        ingredient_totals(&self.graph, self.graph.root())
    }

    /// The sequence/parallel outline used for display.
    pub fn outline(&self) -> Vec<GroupItem> {
        nested_groups(&self.graph, Some(self.graph.root()))
    }
}
