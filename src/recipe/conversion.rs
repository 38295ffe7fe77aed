use super::Recipe;
use crate::error::RecipeConversionError;
use crate::step::{IngredientUsage, Step, StepGraph};

/// A trait for external recipe sources that can be converted into a step
/// graph.
///
/// This is the seam the importer collaborators plug into: the LLM recipe
/// parser and the web scraper each hold their own intermediate model and
/// implement this trait to hand the core a graph it can validate, display
/// and cook. Most importers produce flat recipes and can lean on
/// [`LinearDraft`] instead of wiring a graph by hand.
///
/// # Example
///
/// ```rust,no_run
/// use souschef::error::RecipeConversionError;
/// use souschef::recipe::{DraftStep, IntoStepGraph, LinearDraft};
/// use souschef::step::StepGraph;
///
/// // 1. Your importer's own intermediate model.
/// struct ScrapedRecipe {
///     name: String,
///     instructions: Vec<String>,
/// }
///
/// // 2. Implement `IntoStepGraph` for it.
/// impl IntoStepGraph for ScrapedRecipe {
///     fn into_step_graph(self) -> Result<StepGraph, RecipeConversionError> {
///         let mut draft = LinearDraft::new(self.name);
///         for text in self.instructions {
///             draft.push(DraftStep::Instruction {
///                 title: text,
///                 text: None,
///                 minutes: 0.0,
///                 ingredients: vec![],
///             });
///         }
///         draft.into_step_graph()
///     }
/// }
/// ```
pub trait IntoStepGraph {
    /// Consumes the object and builds the equivalent step graph.
    fn into_step_graph(self) -> Result<StepGraph, RecipeConversionError>;
}

/// A flat, no-branching recipe as produced by the LLM importer and the web
/// scraper: instructions and waits in order.
///
/// Converts into the degenerate `Start -> Text/Timer* -> Finish` chain,
/// which is a fully valid graph with no splits or merges.
#[derive(Debug, Clone, Default)]
pub struct LinearDraft {
    pub title: String,
    pub description: Option<String>,
    pub source_url: Option<String>,
    pub steps: Vec<DraftStep>,
}

/// One entry of a [`LinearDraft`].
#[derive(Debug, Clone)]
pub enum DraftStep {
    Instruction {
        title: String,
        text: Option<String>,
        minutes: f64,
        ingredients: Vec<IngredientUsage>,
    },
    Wait {
        minutes: f64,
    },
}

impl LinearDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn push(&mut self, step: DraftStep) {
        self.steps.push(step);
    }

    /// Builds the full stored record, not just the graph.
    pub fn into_recipe(self) -> Result<Recipe, RecipeConversionError> {
        let title = self.title.clone();
        let description = self.description.clone();
        let source_url = self.source_url.clone();
        let graph = self.into_step_graph()?;
        Ok(Recipe {
            title,
            description,
            servings: None,
            source_url,
            graph,
        })
    }
}

impl IntoStepGraph for LinearDraft {
    fn into_step_graph(self) -> Result<StepGraph, RecipeConversionError> {
        if self.steps.is_empty() {
            return Err(RecipeConversionError::ValidationError(
                "a recipe draft needs at least one step".to_string(),
            ));
        }

        let mut graph = StepGraph::new();
        let mut cursor = graph.root();
        for step in self.steps {
            let node = match step {
                DraftStep::Instruction {
                    title,
                    text,
                    minutes,
                    ingredients,
                } => {
                    let mut node = Step::text(title).taking_minutes(minutes);
                    if let Some(text) = text {
                        node = node.with_instructions(text);
                    }
                    node.ingredients = ingredients;
                    node
                }
                DraftStep::Wait { minutes } => Step::timer(minutes),
            };
            cursor = graph
                .chain(cursor, "Next", node)
                .map_err(|e| RecipeConversionError::ValidationError(e.to_string()))?;
        }
        graph
            .chain(cursor, "Done", Step::finish())
            .map_err(|e| RecipeConversionError::ValidationError(e.to_string()))?;
        Ok(graph)
    }
}
