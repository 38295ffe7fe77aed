//! Tests for path enumeration and validity checking.
mod common;
use common::*;
use souschef::prelude::*;

#[test]
fn test_possible_paths_linear_chain() {
    let (graph, ids) = linear_chain();
    let paths = possible_paths(&graph, graph.root());
    assert_eq!(paths, vec![ids]);
}

#[test]
fn test_possible_paths_diamond() {
    let d = diamond();
    let paths = possible_paths(&d.graph, d.root);
    assert_eq!(paths.len(), 2);
    for path in &paths {
        assert_eq!(path.first(), Some(&d.root));
        assert_eq!(path.last(), Some(&d.finish));
    }
    assert!(paths.iter().any(|path| path.contains(&d.a)));
    assert!(paths.iter().any(|path| path.contains(&d.b)));
}

#[test]
fn test_possible_paths_stop_at_dead_end() {
    let mut graph = StepGraph::new();
    let root = graph.root();
    let a = graph.chain(root, "Next", Step::text("A")).expect("wire A");
    graph.push_edge(a, "Next").expect("dangling edge");

    let paths = possible_paths(&graph, root);
    assert_eq!(paths, vec![vec![root, a]]);
}

#[test]
fn test_paths_valid_for_start_to_finish() {
    let mut graph = StepGraph::new();
    graph
        .chain(graph.root(), "Next", Step::finish())
        .expect("wire Finish");
    assert!(paths_are_valid(&graph, graph.root()));
}

#[test]
fn test_paths_valid_for_diamond() {
    let d = diamond();
    assert!(paths_are_valid(&d.graph, d.root));
}

#[test]
fn test_paths_invalid_for_dead_end() {
    let mut graph = StepGraph::new();
    let root = graph.root();
    graph
        .chain(root, "Next", Step::text("Dead end"))
        .expect("wire step");
    assert!(!paths_are_valid(&graph, root));
}

#[test]
fn test_paths_invalid_for_detached_edge() {
    let mut graph = StepGraph::new();
    let root = graph.root();
    let a = graph.chain(root, "Next", Step::text("A")).expect("wire A");
    let finish = graph.add(Step::finish());
    wire(&mut graph, a, "Next", finish);
    // An extra half-wired branch invalidates the whole graph.
    graph.push_edge(a, "Maybe").expect("dangling edge");

    assert!(!paths_are_valid(&graph, root));
}

#[test]
fn test_paths_invalid_for_bare_start() {
    let graph = StepGraph::new();
    assert!(!paths_are_valid(&graph, graph.root()));
}

#[test]
fn test_paths_valid_treats_revisits_as_checked() {
    // Revisited steps count as already valid; the check terminates on
    // cycles instead of recursing.
    let mut graph = StepGraph::new();
    let root = graph.root();
    let a = graph.chain(root, "Next", Step::text("A")).expect("wire A");
    let b = graph.chain(a, "Next", Step::text("B")).expect("wire B");
    wire(&mut graph, b, "Back", a);

    assert!(paths_are_valid(&graph, root));
}

#[test]
fn test_worked_example_is_valid() {
    let w = worked_example();
    assert!(paths_are_valid(&w.graph, w.graph.root()));
}
