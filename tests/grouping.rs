//! Tests for the nested sequence/parallel display grouping.
mod common;
use common::*;
use souschef::prelude::*;

#[test]
fn test_grouping_empty_for_missing_root() {
    let graph = StepGraph::new();
    assert!(nested_groups(&graph, None).is_empty());
}

#[test]
fn test_grouping_empty_for_bare_start() {
    let graph = StepGraph::new();
    assert!(nested_groups(&graph, Some(graph.root())).is_empty());
}

#[test]
fn test_grouping_linear_chain() {
    let (graph, ids) = linear_chain();
    let items = nested_groups(&graph, Some(graph.root()));
    // Start and Finish never appear.
    assert_eq!(items, vec![GroupItem::Step(ids[1]), GroupItem::Step(ids[2])]);
}

#[test]
fn test_grouping_diamond() {
    let d = diamond();
    let items = nested_groups(&d.graph, Some(d.root));
    let expected = vec![GroupItem::Parallel(vec![
        GroupItem::Step(d.a),
        GroupItem::Step(d.b),
    ])];
    assert_eq!(normalize_items(&items), normalize_items(&expected));
}

#[test]
fn test_grouping_worked_example() {
    // Expected: [X, {[A,tH], [B, {tE, D, [C, {F,G}]}]}, Z]
    let w = worked_example();
    let items = nested_groups(&w.graph, Some(w.graph.root()));

    let expected = vec![
        GroupItem::Step(w.x),
        GroupItem::Parallel(vec![
            GroupItem::Sequence(vec![GroupItem::Step(w.a), GroupItem::Step(w.t_h)]),
            GroupItem::Sequence(vec![
                GroupItem::Step(w.b),
                GroupItem::Parallel(vec![
                    GroupItem::Step(w.t_e),
                    GroupItem::Step(w.d),
                    GroupItem::Sequence(vec![
                        GroupItem::Step(w.c),
                        GroupItem::Parallel(vec![GroupItem::Step(w.f), GroupItem::Step(w.g)]),
                    ]),
                ]),
            ]),
        ]),
        GroupItem::Step(w.z),
    ];

    assert_eq!(normalize_items(&items), normalize_items(&expected));
}

#[test]
fn test_grouping_single_branch_fan_out() {
    // A split with one attached branch contributes the branch sequence
    // directly instead of a one-member parallel group.
    let mut graph = StepGraph::new();
    let root = graph.root();
    let split = graph.chain(root, "Next", Step::split()).expect("wire Split");
    let m = graph.chain(split, "Only", Step::text("M")).expect("wire M");
    let n = graph.chain(m, "Next", Step::text("N")).expect("wire N");
    let merge = graph.chain(n, "Next", Step::merge()).expect("wire Merge");
    let z = graph.chain(merge, "Next", Step::text("Z")).expect("wire Z");
    graph.chain(z, "Next", Step::finish()).expect("wire Finish");

    let items = nested_groups(&graph, Some(root));
    assert_eq!(
        items,
        vec![
            GroupItem::Sequence(vec![GroupItem::Step(m), GroupItem::Step(n)]),
            GroupItem::Step(z),
        ]
    );
}

#[test]
fn test_grouping_drops_empty_branch() {
    // One split edge wired straight into the merge renders nothing for
    // that branch.
    let mut graph = StepGraph::new();
    let root = graph.root();
    let split = graph.chain(root, "Next", Step::split()).expect("wire Split");
    let a = graph.chain(split, "A", Step::text("A")).expect("wire A");
    let merge = graph.chain(a, "Next", Step::merge()).expect("wire Merge");
    wire(&mut graph, split, "Shortcut", merge);
    graph
        .chain(merge, "Next", Step::finish())
        .expect("wire Finish");

    let items = nested_groups(&graph, Some(root));
    assert_eq!(items, vec![GroupItem::Step(a)]);
}

#[test]
fn test_grouping_terminates_on_cycle() {
    let mut graph = StepGraph::new();
    let root = graph.root();
    let a = graph.chain(root, "Next", Step::text("A")).expect("wire A");
    let b = graph.chain(a, "Next", Step::text("B")).expect("wire B");
    wire(&mut graph, b, "Back", a);

    let items = nested_groups(&graph, Some(root));
    assert_eq!(items, vec![GroupItem::Step(a), GroupItem::Step(b)]);
}
