//! Common test utilities for building step graphs.
use souschef::prelude::*;

/// Wires a labeled edge from `from` to an existing step, regardless of the
/// source kind: single-edge kinds reuse their fixed edge, the rest get a
/// new one appended.
#[allow(dead_code)]
pub fn wire(graph: &mut StepGraph, from: StepId, label: &str, to: StepId) {
    let single = matches!(
        graph[from].kind,
        StepKind::Timer { .. } | StepKind::Merge { .. }
    );
    if single {
        graph
            .set_edge_target(from, 0, Some(to))
            .expect("retarget fixed edge");
    } else {
        let edge = graph.push_edge(from, label).expect("append edge");
        graph
            .set_edge_target(from, edge, Some(to))
            .expect("attach edge");
    }
}

/// `root --Next--> Step1 --Next--> Step2 --Next--> Finish`
///
/// Returns the graph plus the four ids in path order.
#[allow(dead_code)]
pub fn linear_chain() -> (StepGraph, Vec<StepId>) {
    let mut graph = StepGraph::new();
    let root = graph.root();
    let step1 = graph
        .chain(root, "Next", Step::text("Step1").taking_minutes(5.0))
        .expect("wire Step1");
    let step2 = graph
        .chain(step1, "Next", Step::text("Step2").taking_minutes(7.0))
        .expect("wire Step2");
    let finish = graph
        .chain(step2, "Next", Step::finish().taking_minutes(3.0))
        .expect("wire Finish");
    (graph, vec![root, step1, step2, finish])
}

/// The split/merge diamond:
/// `root --> Split{A, B}; A --> Merge; B --> Merge; Merge --> Finish`
#[allow(dead_code)]
pub struct Diamond {
    pub graph: StepGraph,
    pub root: StepId,
    pub split: StepId,
    pub a: StepId,
    pub b: StepId,
    pub merge: StepId,
    pub finish: StepId,
}

#[allow(dead_code)]
pub fn diamond() -> Diamond {
    let mut graph = StepGraph::new();
    let root = graph.root();
    let split = graph.chain(root, "Next", Step::split()).expect("wire Split");
    let a = graph.chain(split, "A", Step::text("A")).expect("wire A");
    let b = graph.chain(split, "B", Step::text("B")).expect("wire B");
    let merge = graph.chain(a, "Next", Step::merge()).expect("wire Merge");
    wire(&mut graph, b, "Next", merge);
    let finish = graph
        .chain(merge, "Next", Step::finish())
        .expect("wire Finish");
    Diamond {
        graph,
        root,
        split,
        a,
        b,
        merge,
        finish,
    }
}

/// The full worked grouping example:
///
/// ```text
/// Start -> X -> Split1{ A -> tH -> Merge3,
///                       B -> Split2{ D -> Merge2,
///                                    tE -> Merge2,
///                                    C -> Split3{F, G} -> Merge1 -> Merge2 } -> Merge3 }
/// Merge3 -> Z -> Finish
/// ```
#[allow(dead_code)]
pub struct WorkedExample {
    pub graph: StepGraph,
    pub x: StepId,
    pub a: StepId,
    pub t_h: StepId,
    pub b: StepId,
    pub d: StepId,
    pub t_e: StepId,
    pub c: StepId,
    pub f: StepId,
    pub g: StepId,
    pub z: StepId,
    pub split1: StepId,
    pub split2: StepId,
    pub split3: StepId,
    pub merge1: StepId,
    pub merge2: StepId,
    pub merge3: StepId,
}

#[allow(dead_code)]
pub fn worked_example() -> WorkedExample {
    let mut graph = StepGraph::new();
    let root = graph.root();

    let x = graph.chain(root, "Next", Step::text("X")).expect("wire X");
    let split1 = graph.chain(x, "Next", Step::split()).expect("wire Split1");

    // Upper track: A -> tH -> Merge3
    let a = graph.chain(split1, "A", Step::text("A")).expect("wire A");
    let t_h = graph.chain(a, "Next", Step::timer(10.0)).expect("wire tH");
    let merge3 = graph
        .chain(t_h, "Next", Step::merge())
        .expect("wire Merge3");

    // Lower track: B -> Split2{D, tE, C -> Split3{F, G}}
    let b = graph.chain(split1, "B", Step::text("B")).expect("wire B");
    let split2 = graph.chain(b, "Next", Step::split()).expect("wire Split2");

    let d = graph.chain(split2, "D", Step::text("D")).expect("wire D");
    let t_e = graph
        .chain(split2, "E", Step::timer(5.0))
        .expect("wire tE");
    let c = graph.chain(split2, "C", Step::text("C")).expect("wire C");

    let split3 = graph.chain(c, "Next", Step::split()).expect("wire Split3");
    let f = graph.chain(split3, "F", Step::text("F")).expect("wire F");
    let g = graph.chain(split3, "G", Step::text("G")).expect("wire G");

    let merge1 = graph.chain(f, "Next", Step::merge()).expect("wire Merge1");
    wire(&mut graph, g, "Next", merge1);
    let merge2 = graph
        .chain(merge1, "Next", Step::merge())
        .expect("wire Merge2");
    wire(&mut graph, d, "Next", merge2);
    wire(&mut graph, t_e, "Next", merge2);
    wire(&mut graph, merge2, "Next", merge3);

    let z = graph.chain(merge3, "Next", Step::text("Z")).expect("wire Z");
    graph.chain(z, "Next", Step::finish()).expect("wire Finish");

    WorkedExample {
        graph,
        x,
        a,
        t_h,
        b,
        d,
        t_e,
        c,
        f,
        g,
        z,
        split1,
        split2,
        split3,
        merge1,
        merge2,
        merge3,
    }
}

/// Normalizes a grouping so parallel members compare order-independently.
#[allow(dead_code)]
pub fn normalize_items(items: &[GroupItem]) -> Vec<GroupItem> {
    items.iter().map(normalize_item).collect()
}

#[allow(dead_code)]
pub fn normalize_item(item: &GroupItem) -> GroupItem {
    match item {
        GroupItem::Step(id) => GroupItem::Step(*id),
        GroupItem::Sequence(inner) => GroupItem::Sequence(normalize_items(inner)),
        GroupItem::Parallel(branches) => {
            let mut normalized = normalize_items(branches);
            normalized.sort_by_key(|branch| format!("{:?}", branch));
            GroupItem::Parallel(normalized)
        }
    }
}
