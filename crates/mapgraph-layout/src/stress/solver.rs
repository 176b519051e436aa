//! The seam between the stress strategy and the optimizer that actually places nodes.

use futures::FutureExt;
use futures::future::BoxFuture;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct SolverNode {
    pub id: String,
    pub width: f64,
    pub height: f64,
    /// Center-anchored starting position.
    pub x: f64,
    pub y: f64,
    pub fixed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolverEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub ideal_length: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    pub node_node: f64,
    pub edge_node: f64,
    pub edge_edge: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolverRequest {
    pub nodes: Vec<SolverNode>,
    pub edges: Vec<SolverEdge>,
    pub spacing: Spacing,
    pub iterations: usize,
    pub tolerance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolvedPosition {
    pub x: f64,
    pub y: f64,
}

/// Center-anchored positions keyed by node id. Ids may be missing or unknown; the strategy
/// tolerates both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverResponse {
    pub positions: FxHashMap<String, SolvedPosition>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SolverError {
    pub message: String,
}

impl SolverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub type SolveFuture = BoxFuture<'static, Result<SolverResponse, SolverError>>;

pub trait StressSolver: Send + Sync {
    /// Whether [`SolverNode::fixed`] is honoured. Solvers that return `false` get every node
    /// unpinned and the strategy falls back to a full re-layout.
    fn supports_fixed_nodes(&self) -> bool;

    fn solve(&self, request: SolverRequest) -> SolveFuture;
}

/// Default solver backed by the `majorize` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct MajorizeSolver;

impl StressSolver for MajorizeSolver {
    fn supports_fixed_nodes(&self) -> bool {
        true
    }

    fn solve(&self, request: SolverRequest) -> SolveFuture {
        async move {
            let graph = majorize::Graph {
                nodes: request
                    .nodes
                    .into_iter()
                    .map(|n| majorize::Node {
                        id: n.id,
                        width: n.width,
                        height: n.height,
                        x: n.x,
                        y: n.y,
                        fixed: n.fixed,
                    })
                    .collect(),
                edges: request
                    .edges
                    .into_iter()
                    .map(|e| majorize::Edge {
                        id: e.id,
                        source: e.source,
                        target: e.target,
                        ideal_length: Some(e.ideal_length),
                    })
                    .collect(),
            };
            let options = majorize::StressOptions {
                max_iterations: request.iterations,
                tolerance: request.tolerance,
                default_edge_length: request.spacing.node_node.max(1.0),
                node_spacing: request.spacing.node_node,
                remove_overlaps: true,
            };
            let result = majorize::layout(&graph, &options)
                .map_err(|e| SolverError::new(format!("majorize layout failed: {e}")))?;
            tracing::debug!(
                iterations = result.iterations,
                stress = result.stress,
                "stress majorization finished"
            );
            Ok::<_, SolverError>(SolverResponse {
                positions: result
                    .positions
                    .into_iter()
                    .map(|(id, p)| (id, SolvedPosition { x: p.x, y: p.y }))
                    .collect(),
            })
        }
        .boxed()
    }
}
