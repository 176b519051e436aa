use futures::FutureExt;
use futures::channel::oneshot;
use futures::executor::block_on;
use mapgraph_core::{Concept, Position, Relationship, VisualGraph, map_to_visual};
use mapgraph_layout::stress::{SolveFuture, SolvedPosition};
use mapgraph_layout::{
    LayoutError, LayoutOptions, LayoutScope, LayoutSession, LayoutStrategyKind, SolverError,
    SolverRequest, SolverResponse, StrategyRegistry, StressSolver,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

fn graph(ids: &[&str], links: &[(&str, &str)]) -> VisualGraph {
    let concepts: Vec<Concept> = ids
        .iter()
        .map(|id| Concept::new(*id, id.to_uppercase(), Position::new(0.0, 0.0)))
        .collect();
    let rels: Vec<Relationship> = links
        .iter()
        .enumerate()
        .map(|(i, (a, b))| Relationship::new(format!("r{i}"), *a, *b, ""))
        .collect();
    map_to_visual(&concepts, &rels, &[], None, false)
}

fn solved(entries: &[(&str, f64, f64)]) -> SolverResponse {
    SolverResponse {
        positions: entries
            .iter()
            .map(|(id, x, y)| (id.to_string(), SolvedPosition { x: *x, y: *y }))
            .collect(),
    }
}

/// Each solve call waits on the next queued gate, so tests decide when results arrive.
struct GatedSolver {
    gates: Mutex<VecDeque<oneshot::Receiver<SolverResponse>>>,
}

impl GatedSolver {
    fn new(gates: Vec<oneshot::Receiver<SolverResponse>>) -> Arc<Self> {
        Arc::new(Self {
            gates: Mutex::new(gates.into()),
        })
    }
}

impl StressSolver for GatedSolver {
    fn supports_fixed_nodes(&self) -> bool {
        true
    }

    fn solve(&self, _request: SolverRequest) -> SolveFuture {
        let gate = self.gates.lock().unwrap().pop_front();
        async move {
            let gate = gate.ok_or_else(|| SolverError::new("no gate queued"))?;
            gate.await.map_err(|_| SolverError::new("gate dropped"))
        }
        .boxed()
    }
}

struct FailingSolver;

impl StressSolver for FailingSolver {
    fn supports_fixed_nodes(&self) -> bool {
        true
    }

    fn solve(&self, _request: SolverRequest) -> SolveFuture {
        futures::future::ready(Err(SolverError::new("solver unavailable"))).boxed()
    }
}

fn session_with(solver: Arc<dyn StressSolver>) -> LayoutSession {
    LayoutSession::with_registry(Arc::new(StrategyRegistry::with_stress_solver(solver)))
}

fn tracked(session: &LayoutSession) -> Vec<String> {
    let mut ids: Vec<String> = session.tracker().iter().map(String::from).collect();
    ids.sort();
    ids
}

#[test]
fn empty_map_returns_empty() {
    let session = LayoutSession::new();
    let opts = LayoutOptions::default();
    for kind in LayoutStrategyKind::ALL {
        session.with_tracker(|t| t.replace(["a", "b"]));
        let out = block_on(session.apply_layout(&[], &[], kind, &opts, LayoutScope::All));
        assert_eq!(out, Ok(Vec::new()));
    }
    assert!(session.tracker().is_empty());
}

#[test]
fn only_the_latest_request_wins() {
    let (tx1, rx1) = oneshot::channel();
    let (tx2, rx2) = oneshot::channel();
    let session = session_with(GatedSolver::new(vec![rx1, rx2]));
    let g = graph(&["a", "b"], &[("a", "b")]);
    let opts = LayoutOptions::default();

    let first = session.apply_layout(
        &g.nodes,
        &g.edges,
        LayoutStrategyKind::Stress,
        &opts,
        LayoutScope::All,
    );
    let second = session.apply_layout(
        &g.nodes,
        &g.edges,
        LayoutStrategyKind::Stress,
        &opts,
        LayoutScope::All,
    );
    let release = async {
        tx2.send(solved(&[("a", 175.0, 125.0), ("b", 475.0, 125.0)]))
            .unwrap();
        tx1.send(solved(&[("a", 75.0, 25.0), ("b", 75.0, 925.0)]))
            .unwrap();
    };
    let (first, second, ()) = block_on(async { futures::join!(first, second, release) });

    assert_eq!(
        first,
        Err(LayoutError::Superseded {
            generation: 1,
            latest: 2
        })
    );
    let stale = first.unwrap_err();
    assert!(stale.is_recoverable());
    assert!(stale.is_transient());
    let second = second.unwrap();
    assert_eq!(second[0].position, Position::new(100.0, 100.0));
    assert_eq!(second[1].position, Position::new(400.0, 100.0));
    assert_eq!(tracked(&session), vec!["a", "b"]);
    assert_eq!(session.generation(), 2);
}

#[test]
fn switching_maps_discards_in_flight_results() {
    let (tx, rx) = oneshot::channel();
    let session = session_with(GatedSolver::new(vec![rx]));
    session.switch_map("map-1");
    let g = graph(&["a"], &[]);
    let opts = LayoutOptions::default();

    let pending = session.apply_layout(
        &g.nodes,
        &g.edges,
        LayoutStrategyKind::Stress,
        &opts,
        LayoutScope::All,
    );
    let switch = async {
        session.switch_map("map-2");
        tx.send(solved(&[("a", 75.0, 25.0)])).unwrap();
    };
    let (result, ()) = block_on(async { futures::join!(pending, switch) });

    assert!(result.unwrap_err().is_superseded());
    assert!(session.tracker().is_empty());
    assert_eq!(session.map_id().as_deref(), Some("map-2"));
}

#[test]
fn switch_map_clears_the_tracker_only_on_change() {
    let session = LayoutSession::new();
    session.switch_map("map-1");
    let g = graph(&["a", "b"], &[]);
    let opts = LayoutOptions::default();
    block_on(session.apply_layout(
        &g.nodes,
        &g.edges,
        LayoutStrategyKind::Circular,
        &opts,
        LayoutScope::All,
    ))
    .unwrap();

    let generation = session.generation();
    session.switch_map("map-1");
    assert_eq!(tracked(&session), vec!["a", "b"]);
    assert_eq!(session.generation(), generation);

    session.switch_map("map-2");
    assert!(session.tracker().is_empty());
    assert_eq!(session.generation(), generation + 1);
}

#[test]
fn new_only_keeps_previously_placed_nodes() {
    let session = LayoutSession::new();
    let opts = LayoutOptions::default();
    let first = graph(&["a", "b"], &[("a", "b")]);
    let placed = block_on(session.apply_layout(
        &first.nodes,
        &first.edges,
        LayoutStrategyKind::Circular,
        &opts,
        LayoutScope::All,
    ))
    .unwrap();

    let grown = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
    let mut nodes = placed.clone();
    nodes.push(grown.nodes[2].clone());

    for kind in LayoutStrategyKind::ALL {
        session.with_tracker(|t| t.replace(["a", "b"]));
        let out = block_on(session.apply_layout(
            &nodes,
            &grown.edges,
            kind,
            &opts,
            LayoutScope::NewOnly,
        ))
        .unwrap();
        assert_eq!(out[0].position, placed[0].position, "{kind}");
        assert_eq!(out[1].position, placed[1].position, "{kind}");
        assert!(out[2].position.is_finite(), "{kind}");
    }
    assert_eq!(tracked(&session), vec!["a", "b", "c"]);
}

#[test]
fn new_only_without_tracked_nodes_is_a_full_pass() {
    let session = LayoutSession::new();
    let opts = LayoutOptions::default();
    let g = graph(&["a", "b", "c"], &[("a", "b")]);

    let all = block_on(session.apply_layout(
        &g.nodes,
        &g.edges,
        LayoutStrategyKind::Circular,
        &opts,
        LayoutScope::All,
    ))
    .unwrap();
    session.with_tracker(|t| t.clear());
    let new_only = block_on(session.apply_layout(
        &g.nodes,
        &g.edges,
        LayoutStrategyKind::Circular,
        &opts,
        LayoutScope::NewOnly,
    ))
    .unwrap();

    assert_eq!(all, new_only);
    assert_eq!(tracked(&session), vec!["a", "b", "c"]);
}

#[test]
fn failed_pass_leaves_the_tracker_untouched() {
    let session = session_with(Arc::new(FailingSolver));
    let opts = LayoutOptions::default();
    let g = graph(&["a", "b"], &[]);
    block_on(session.apply_layout(
        &g.nodes,
        &g.edges,
        LayoutStrategyKind::Circular,
        &opts,
        LayoutScope::All,
    ))
    .unwrap();

    let more = graph(&["a", "b", "c"], &[]);
    let err = block_on(session.apply_layout(
        &more.nodes,
        &more.edges,
        LayoutStrategyKind::Stress,
        &opts,
        LayoutScope::All,
    ))
    .unwrap_err();

    assert_eq!(
        err,
        LayoutError::Solver {
            message: "solver unavailable".to_string()
        }
    );
    assert!(err.is_recoverable());
    assert_eq!(tracked(&session), vec!["a", "b"]);
}

#[test]
fn missing_registration_and_bad_options_are_rejected() {
    let session = LayoutSession::with_registry(Arc::new(StrategyRegistry::new()));
    let g = graph(&["a"], &[]);
    let err = block_on(session.apply_layout(
        &g.nodes,
        &g.edges,
        LayoutStrategyKind::Hierarchical,
        &LayoutOptions::default(),
        LayoutScope::All,
    ))
    .unwrap_err();
    assert_eq!(
        err,
        LayoutError::UnknownStrategy {
            kind: LayoutStrategyKind::Hierarchical
        }
    );
    assert!(err.is_recoverable());
    assert!(!err.is_transient());

    let session = LayoutSession::new();
    let err = block_on(session.apply_layout(
        &g.nodes,
        &g.edges,
        LayoutStrategyKind::Circular,
        &LayoutOptions::with_canvas(0.0, 100.0),
        LayoutScope::All,
    ))
    .unwrap_err();
    assert!(matches!(err, LayoutError::InvalidOptions { .. }));
    assert!(err.is_recoverable());
    assert!(!err.is_transient());
}
