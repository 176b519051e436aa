use majorize::{Edge, Error, Graph, Node, StressOptions};

fn node(id: &str, x: f64, y: f64) -> Node {
    Node {
        id: id.to_string(),
        width: 10.0,
        height: 10.0,
        x,
        y,
        fixed: false,
    }
}

fn edge(source: &str, target: &str, ideal_length: Option<f64>) -> Edge {
    Edge {
        id: format!("{source}-{target}"),
        source: source.to_string(),
        target: target.to_string(),
        ideal_length,
    }
}

fn precise() -> StressOptions {
    StressOptions {
        max_iterations: 2000,
        tolerance: 1e-12,
        default_edge_length: 100.0,
        node_spacing: 0.0,
        remove_overlaps: false,
    }
}

fn dist(result: &majorize::LayoutResult, a: &str, b: &str) -> f64 {
    let pa = result.positions[a];
    let pb = result.positions[b];
    ((pa.x - pb.x).powi(2) + (pa.y - pb.y).powi(2)).sqrt()
}

#[test]
fn empty_graph_yields_empty_result() {
    let result = majorize::layout(&Graph::default(), &StressOptions::default()).unwrap();
    assert!(result.positions.is_empty());
    assert_eq!(result.iterations, 0);
}

#[test]
fn single_node_keeps_its_position() {
    let graph = Graph {
        nodes: vec![node("a", 12.0, -4.0)],
        edges: Vec::new(),
    };
    let result = majorize::layout(&graph, &StressOptions::default()).unwrap();
    assert_eq!(result.positions["a"].x, 12.0);
    assert_eq!(result.positions["a"].y, -4.0);
}

#[test]
fn triangle_converges_to_ideal_edge_lengths() {
    let graph = Graph {
        nodes: vec![node("a", 0.0, 0.0), node("b", 10.0, 0.0), node("c", 0.0, 10.0)],
        edges: vec![edge("a", "b", None), edge("b", "c", None), edge("c", "a", None)],
    };
    let result = majorize::layout(&graph, &precise()).unwrap();
    for (a, b) in [("a", "b"), ("b", "c"), ("c", "a")] {
        let d = dist(&result, a, b);
        assert!((d - 100.0).abs() < 1.0, "{a}-{b} distance {d}");
    }
    assert!(result.stress < 1e-3);
}

#[test]
fn path_distances_follow_graph_distance() {
    let graph = Graph {
        nodes: vec![node("a", 0.0, 0.0), node("b", 50.0, 5.0), node("c", 100.0, 0.0)],
        edges: vec![edge("a", "b", None), edge("b", "c", None)],
    };
    let result = majorize::layout(&graph, &precise()).unwrap();
    assert!((dist(&result, "a", "c") - 200.0).abs() < 2.0);
}

#[test]
fn per_edge_ideal_length_overrides_default() {
    let graph = Graph {
        nodes: vec![node("a", 0.0, 0.0), node("b", 1.0, 1.0)],
        edges: vec![edge("a", "b", Some(320.0))],
    };
    let result = majorize::layout(&graph, &precise()).unwrap();
    assert!((dist(&result, "a", "b") - 320.0).abs() < 1.0);
}

#[test]
fn fixed_nodes_never_move() {
    let mut anchor = node("a", 0.0, 0.0);
    anchor.fixed = true;
    let graph = Graph {
        nodes: vec![anchor, node("b", 5.0, 0.0)],
        edges: vec![edge("a", "b", None)],
    };
    let result = majorize::layout(&graph, &precise()).unwrap();
    assert_eq!(result.positions["a"].x, 0.0);
    assert_eq!(result.positions["a"].y, 0.0);
    assert!((dist(&result, "a", "b") - 100.0).abs() < 1.0);
}

#[test]
fn coincident_seed_positions_are_spread_out() {
    let graph = Graph {
        nodes: vec![node("a", 0.0, 0.0), node("b", 0.0, 0.0), node("c", 0.0, 0.0)],
        edges: vec![edge("a", "b", None), edge("b", "c", None)],
    };
    let result = majorize::layout(&graph, &precise()).unwrap();
    assert!(dist(&result, "a", "b") > 50.0);
    assert!(dist(&result, "b", "c") > 50.0);
}

#[test]
fn overlap_removal_separates_rectangles() {
    let mut a = node("a", 0.0, 0.0);
    let mut b = node("b", 0.0, 0.0);
    a.width = 150.0;
    a.height = 50.0;
    b.width = 150.0;
    b.height = 50.0;
    let graph = Graph {
        nodes: vec![a, b],
        edges: vec![edge("a", "b", Some(10.0))],
    };
    let opts = StressOptions {
        default_edge_length: 10.0,
        node_spacing: 20.0,
        ..StressOptions::default()
    };
    let result = majorize::layout(&graph, &opts).unwrap();
    let pa = result.positions["a"];
    let pb = result.positions["b"];
    let clear_x = (pa.x - pb.x).abs() >= 150.0 + 20.0 - 1e-6;
    let clear_y = (pa.y - pb.y).abs() >= 50.0 + 20.0 - 1e-6;
    assert!(clear_x || clear_y, "still overlapping: {pa:?} {pb:?}");
}

#[test]
fn missing_endpoint_is_rejected() {
    let graph = Graph {
        nodes: vec![node("a", 0.0, 0.0)],
        edges: vec![edge("a", "ghost", None)],
    };
    let err = majorize::layout(&graph, &StressOptions::default()).unwrap_err();
    assert!(matches!(err, Error::MissingEndpoint { edge_id } if edge_id == "a-ghost"));
}

#[test]
fn invalid_edge_length_is_rejected() {
    let opts = StressOptions {
        default_edge_length: 0.0,
        ..StressOptions::default()
    };
    let graph = Graph {
        nodes: vec![node("a", 0.0, 0.0)],
        edges: Vec::new(),
    };
    let err = majorize::layout(&graph, &opts).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidOption {
            name: "default_edge_length",
            ..
        }
    ));
}
