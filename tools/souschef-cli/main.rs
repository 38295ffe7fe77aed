use clap::Parser;
use itertools::Itertools;
use serde::Deserialize;
use souschef::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::time::Instant;

// --- JSON Deserialization Structs (Editor Export Format Specific) ---
// These structs match the editor's exported recipe format and are only used
// here for conversion.

#[derive(Deserialize)]
struct RawRecipe {
    title: String,
    #[serde(default)]
    description: Option<String>,
    nodes: Vec<RawNode>,
    edges: Vec<RawEdge>,
}

#[derive(Deserialize)]
struct RawNode {
    id: String,
    #[serde(alias = "stepType")]
    step_type: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    instructions: Option<String>,
    #[serde(default)]
    minutes: f64,
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
    #[serde(default)]
    ingredients: Vec<RawIngredient>,
}

#[derive(Deserialize)]
struct RawIngredient {
    name: String,
    quantity: f64,
    unit: String,
    #[serde(default)]
    note: Option<String>,
}

#[derive(Deserialize)]
struct RawEdge {
    source: String,
    #[serde(default)]
    label: Option<String>,
    target: Option<String>,
}

// --- Converter Implementation ---
// This implements the conversion from the editor's raw JSON model into a
// souschef step graph.

impl IntoStepGraph for RawRecipe {
    fn into_step_graph(self) -> std::result::Result<StepGraph, RecipeConversionError> {
        let mut graph = StepGraph::new();
        let mut ids: HashMap<String, StepId> = HashMap::new();

        for node in &self.nodes {
            let id = match node.step_type.as_str() {
                "start" => graph.root(),
                "text" => graph.add(Step::text(node.title.clone().unwrap_or_default())),
                "timer" => graph.add(Step::timer(node.minutes)),
                "split" => graph.add(Step::split()),
                "merge" => graph.add(Step::merge()),
                "finish" => graph.add(Step::finish()),
                other => {
                    return Err(RecipeConversionError::ValidationError(format!(
                        "node '{}' has unknown step type '{}'",
                        node.id, other
                    )));
                }
            };
            if let Some(step) = graph.get_mut(id) {
                step.position = (node.x, node.y);
                step.minutes_to_complete = node.minutes;
                if let Some(text) = &node.instructions {
                    if let StepKind::Text { instructions, .. } = &mut step.kind {
                        *instructions = Some(text.clone());
                    }
                }
                step.ingredients = node
                    .ingredients
                    .iter()
                    .map(|raw| {
                        let usage =
                            IngredientUsage::new(raw.name.clone(), raw.quantity, raw.unit.clone());
                        match &raw.note {
                            Some(note) => usage.with_note(note.clone()),
                            None => usage,
                        }
                    })
                    .collect();
            }
            if ids.insert(node.id.clone(), id).is_some() {
                return Err(RecipeConversionError::ValidationError(format!(
                    "duplicate node id '{}'",
                    node.id
                )));
            }
        }

        for edge in &self.edges {
            let source = *ids.get(&edge.source).ok_or_else(|| {
                RecipeConversionError::ValidationError(format!(
                    "edge references unknown source node '{}'",
                    edge.source
                ))
            })?;
            let target = match &edge.target {
                Some(raw_target) => Some(*ids.get(raw_target).ok_or_else(|| {
                    RecipeConversionError::ValidationError(format!(
                        "edge references unknown target node '{}'",
                        raw_target
                    ))
                })?),
                None => None,
            };
            let label = edge.label.as_deref().unwrap_or("Next");
            wire(&mut graph, source, label, target).map_err(|e| {
                RecipeConversionError::ValidationError(format!(
                    "could not wire edge from '{}': {}",
                    edge.source, e
                ))
            })?;
        }

        Ok(graph)
    }
}

/// Attaches a labeled edge on `source`: single-edge kinds reuse their fixed
/// edge, the rest get a new one appended.
fn wire(
    graph: &mut StepGraph,
    source: StepId,
    label: &str,
    target: Option<StepId>,
) -> std::result::Result<(), GraphError> {
    let single = matches!(
        graph[source].kind,
        StepKind::Timer { .. } | StepKind::Merge { .. }
    );
    if single {
        if let Some(step) = graph.get_mut(source) {
            if let Some(slot) = step.out_edges_mut().first_mut() {
                slot.label = label.to_string();
            }
        }
        graph.set_edge_target(source, 0, target)
    } else {
        let edge = graph.push_edge(source, label)?;
        graph.set_edge_target(source, edge, target)
    }
}

/// A step-graph inspection and live cooking CLI for souschef recipes
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the recipe JSON file exported by the editor
    recipe_path: Option<String>,

    /// Run an interactive cooking session after inspection
    #[arg(short, long)]
    cook: bool,

    /// Run in interactive 'human' mode to be prompted for inputs
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    human: bool,
}

fn main() {
    let cli = Cli::parse();

    let (recipe_path, cook) = if cli.human {
        let path = prompt_for_input("Enter recipe path", Some("data/recipe.json"));
        let cook = prompt_for_input("Cook it interactively? (y/n)", Some("n"));
        (path, cook.trim().eq_ignore_ascii_case("y"))
    } else {
        let path = cli
            .recipe_path
            .unwrap_or_else(|| exit_with_error("Recipe path is required in non-interactive mode."));
        (path, cli.cook)
    };

    run_inspection(recipe_path, cook);
}

fn run_inspection(recipe_path: String, cook: bool) {
    let total_start = Instant::now();

    // --- 1. File Loading ---
    let load_start = Instant::now();
    let recipe_json = fs::read_to_string(&recipe_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read recipe file '{}': {}",
            &recipe_path, e
        ))
    });
    let load_duration = load_start.elapsed();

    // --- 2. Parsing and Conversion ---
    let convert_start = Instant::now();
    let raw_recipe: RawRecipe = serde_json::from_str(&recipe_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse recipe JSON: {}", e)));
    let title = raw_recipe.title.clone();
    let graph = raw_recipe
        .into_step_graph()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to convert recipe: {}", e)));
    let convert_duration = convert_start.elapsed();

    let paths = possible_paths(&graph, graph.root());
    println!("\nInspecting '{}'", title);
    println!("{} steps, {} possible path(s)", graph.len(), paths.len());

    // --- 3. Validity ---
    let valid = paths_are_valid(&graph, graph.root());
    if valid {
        println!("Graph is valid: every path reaches a Finish.");
    } else {
        println!("Graph is NOT valid: it has dead ends or detached edges.");
    }

    // --- 4. Outline ---
    println!("\nOutline:");
    let outline = nested_groups(&graph, Some(graph.root()));
    let mut rendered = String::new();
    render_items(&graph, &outline, 1, &mut rendered);
    print!("{}", rendered);

    // --- 5. Rollups ---
    let shopping = ingredient_totals(&graph, graph.root());
    if !shopping.is_empty() {
        println!("\nShopping list:");
        for usage in &shopping {
            println!("  - {}", usage);
        }
    }

    if let Some(path) = paths.first() {
        if let Some(info) = path_info(&graph, path) {
            println!("\nFirst path timing:");
            println!("  Prep:    {} min", info.prep_minutes);
            println!("  Cook:    {} min", info.cook_minutes);
            println!("  Cleanup: {} min", info.cleanup_minutes);
            println!("  Total:   {} min", info.total_minutes());
        }
    }
    match cook_time_range(&graph) {
        Ok(range) => println!("Cook time across paths: {} - {} min", range.min, range.max),
        Err(RollupError::ConvergentPaths) => {
            println!("Cook time range: unavailable (paths converge through a merge)");
        }
    }

    let total_duration = total_start.elapsed();
    println!("\n--- Performance Summary ---");
    println!("File Loading: {:?}", load_duration);
    println!("Conversion:   {:?}", convert_duration);
    println!("---------------------------");
    println!("Total:        {:?}", total_duration);

    if cook {
        if !valid {
            exit_with_error("Refusing to cook an invalid recipe; fix the graph first.");
        }
        run_cooking_session(&graph);
    }
    println!();
}

/// Interactive cooking loop: the user advances tokens one edge at a time
/// and watches forks and merges happen.
fn run_cooking_session(graph: &StepGraph) {
    println!("\n--- Cooking Session ---");
    println!("Commands: <token> <edge> to advance, d <token> to discard, q to quit.");

    let mut runner = SessionRunner::new();
    let session = runner.start_session(graph);

    loop {
        let tokens: Vec<_> = runner.session_tokens(session).collect();
        if tokens.is_empty() {
            println!("\nAll branches finished. Enjoy!");
            let used = runner.session_used_ingredients(session);
            if !used.is_empty() {
                println!("Consumed: {}", used.iter().map(|u| u.to_string()).join(", "));
            }
            return;
        }

        println!();
        for token in &tokens {
            let step = &graph[token.current_step()];
            let edges = step
                .out_edges()
                .iter()
                .enumerate()
                .map(|(i, e)| format!("{}:{}", i, e.label))
                .join(", ");
            let timer = if token.remaining_minutes() > 0.0 {
                format!(" ({} min left)", token.remaining_minutes())
            } else {
                String::new()
            };
            println!(
                "  {} at '{}'{} -> [{}]",
                token.id(),
                step.display_name(),
                timer,
                edges
            );
        }

        let line = prompt_for_input("advance", None);
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            ["q"] => return,
            ["d", raw_token] => {
                let Some(token) = find_token(&runner, session, raw_token) else {
                    println!("No such token.");
                    continue;
                };
                if let Err(e) = runner.discard(graph, token) {
                    println!("{}", e);
                }
            }
            [raw_token, raw_edge] => {
                let Some(token) = find_token(&runner, session, raw_token) else {
                    println!("No such token.");
                    continue;
                };
                let Ok(edge) = raw_edge.parse::<usize>() else {
                    println!("Edge must be a number.");
                    continue;
                };
                match runner.advance(graph, token, edge) {
                    Ok(Advance::Moved) => {}
                    Ok(Advance::Waiting) => println!("  -> waiting at a merge for siblings"),
                    Ok(Advance::Forked(ids)) => {
                        println!("  -> forked into {} branch token(s)", ids.len())
                    }
                    Ok(Advance::Finished(used)) => {
                        println!("  -> branch finished!");
                        if !used.is_empty() {
                            println!(
                                "     consumed: {}",
                                used.iter().map(|u| u.to_string()).join(", ")
                            );
                        }
                    }
                    Err(e) => println!("{}", e),
                }
            }
            _ => println!("Commands: <token> <edge>, d <token>, q"),
        }
    }
}

fn find_token(runner: &SessionRunner, session: SessionId, raw: &str) -> Option<TokenId> {
    runner
        .session_tokens(session)
        .find(|t| t.id().to_string() == raw || t.id().to_string() == format!("t{}", raw))
        .map(|t| t.id())
}

/// Recursively renders the nested outline with indentation; parallel groups
/// are marked since their branches carry no order.
fn render_items(graph: &StepGraph, items: &[GroupItem], depth: usize, out: &mut String) {
    let pad = "  ".repeat(depth);
    for item in items {
        match item {
            GroupItem::Step(id) => {
                out.push_str(&format!("{}- {}\n", pad, graph[*id].display_name()));
            }
            GroupItem::Sequence(inner) => {
                out.push_str(&format!("{}- then:\n", pad));
                render_items(graph, inner, depth + 1, out);
            }
            GroupItem::Parallel(branches) => {
                out.push_str(&format!("{}- in any order:\n", pad));
                for branch in branches {
                    render_items(graph, std::slice::from_ref(branch), depth + 1, out);
                }
            }
        }
    }
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> String {
    let mut line = String::new();
    let default_prompt = default.map_or("".to_string(), |d| format!(" [default: {}]", d));

    print!("> {}{}: ", prompt_text, default_prompt);
    io::stdout().flush().unwrap();

    io::stdin()
        .read_line(&mut line)
        .expect("Failed to read line");
    let trimmed = line.trim().to_string();

    if trimmed.is_empty() {
        default.unwrap_or("").to_string()
    } else {
        trimmed
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
