//! Tests for parent-mapping and junction elision.
mod common;
use common::*;
use souschef::prelude::*;

/// Sorted predecessor list for one step, for stable comparisons.
fn preds(map: &ParentMap, id: StepId) -> Vec<StepId> {
    let mut list: Vec<StepId> = map
        .get(&id)
        .map(|set| set.iter().copied().collect())
        .unwrap_or_default();
    list.sort();
    list
}

#[test]
fn test_parent_map_linear_chain() {
    let (graph, ids) = linear_chain();
    let (root, step1, step2, finish) = (ids[0], ids[1], ids[2], ids[3]);

    let parents = parent_map(&graph, root);
    assert_eq!(parents.len(), 4);
    assert_eq!(preds(&parents, root), vec![]);
    assert_eq!(preds(&parents, step1), vec![root]);
    assert_eq!(preds(&parents, step2), vec![step1]);
    assert_eq!(preds(&parents, finish), vec![step2]);
}

#[test]
fn test_parent_map_root_without_edges() {
    let graph = StepGraph::new();
    let parents = parent_map(&graph, graph.root());
    assert_eq!(parents.len(), 1);
    assert_eq!(preds(&parents, graph.root()), vec![]);
}

#[test]
fn test_parent_map_merge_has_both_predecessors() {
    let d = diamond();
    let parents = parent_map(&d.graph, d.root);

    let mut expected = vec![d.a, d.b];
    expected.sort();
    assert_eq!(preds(&parents, d.merge), expected);
}

#[test]
fn test_parent_map_edge_count_property() {
    // Summed predecessor-set sizes equal the number of attached edges.
    for graph in [
        linear_chain().0,
        diamond().graph,
        worked_example().graph,
    ] {
        let attached_edges: usize = graph
            .steps()
            .map(|(_, step)| {
                step.out_edges()
                    .iter()
                    .filter(|edge| edge.target.is_some())
                    .count()
            })
            .sum();
        let parents = parent_map(&graph, graph.root());
        let summed: usize = parents.values().map(|set| set.len()).sum();
        assert_eq!(summed, attached_edges);
    }
}

#[test]
fn test_parent_map_terminates_on_cycle() {
    let mut graph = StepGraph::new();
    let root = graph.root();
    let a = graph.chain(root, "Next", Step::text("A")).expect("wire A");
    let b = graph.chain(a, "Next", Step::text("B")).expect("wire B");
    wire(&mut graph, b, "Back", a);

    let parents = parent_map(&graph, root);
    let mut expected = vec![root, b];
    expected.sort();
    assert_eq!(preds(&parents, a), expected);
}

#[test]
fn test_elision_removes_junctions_from_diamond() {
    let d = diamond();
    let parents = parent_map(&d.graph, d.root);
    let elided = elide_junctions(&d.graph, &parents);

    assert!(!elided.contains_key(&d.split));
    assert!(!elided.contains_key(&d.merge));

    // Finish is now fed directly by A and B, not by the merge.
    let mut expected = vec![d.a, d.b];
    expected.sort();
    assert_eq!(preds(&elided, d.finish), expected);

    // A and B short-circuit past the split to the root.
    assert_eq!(preds(&elided, d.a), vec![d.root]);
    assert_eq!(preds(&elided, d.b), vec![d.root]);
}

#[test]
fn test_elision_collapses_merge_chains() {
    // In the worked example Merge1 feeds Merge2 feeds Merge3, so Z's
    // elided predecessors are the real steps behind all three.
    let w = worked_example();
    let parents = parent_map(&w.graph, w.graph.root());
    let elided = elide_junctions(&w.graph, &parents);

    let mut expected = vec![w.t_h, w.d, w.t_e, w.f, w.g];
    expected.sort();
    assert_eq!(preds(&elided, w.z), expected);
}

#[test]
fn test_elision_is_idempotent() {
    let w = worked_example();
    let parents = parent_map(&w.graph, w.graph.root());
    let once = elide_junctions(&w.graph, &parents);
    let twice = elide_junctions(&w.graph, &once);

    assert_eq!(once.len(), twice.len());
    for (&step, set) in once.iter() {
        assert_eq!(preds(&twice, step), {
            let mut list: Vec<StepId> = set.iter().copied().collect();
            list.sort();
            list
        });
    }
}

#[test]
fn test_elision_preserves_non_junction_reachability() {
    let w = worked_example();
    let parents = parent_map(&w.graph, w.graph.root());
    let elided = elide_junctions(&w.graph, &parents);

    for (&step, _) in parents.iter() {
        if w.graph[step].is_junction() {
            assert!(!elided.contains_key(&step));
        } else {
            assert!(elided.contains_key(&step));
        }
    }
}

#[test]
fn test_elision_tolerates_orphan_merge() {
    let mut graph = StepGraph::new();
    let root = graph.root();
    let x = graph.chain(root, "Next", Step::text("X")).expect("wire X");
    graph.chain(x, "Next", Step::finish()).expect("wire Finish");

    // Fabricate the map a half-edited graph would produce: a merge with no
    // predecessors wired into X.
    let orphan = graph.add(Step::merge());
    let mut parents = parent_map(&graph, root);
    parents.entry(orphan).or_default();
    parents
        .get_mut(&x)
        .expect("X is mapped")
        .insert(orphan);

    let elided = elide_junctions(&graph, &parents);
    // The orphan contributes nothing; X keeps only its real predecessor.
    assert_eq!(preds(&elided, x), vec![root]);
}
