//! Stress-majorization strategy.
//!
//! The optimizer itself sits behind [`StressSolver`]; this module owns everything around it:
//! node size estimates, label-aware ideal edge lengths, anchor pinning, the
//! center/top-left conversion, and tolerance of incomplete solver output.

mod solver;

pub use solver::{
    MajorizeSolver, SolveFuture, SolvedPosition, SolverEdge, SolverError, SolverNode,
    SolverRequest, SolverResponse, Spacing, StressSolver,
};

use crate::error::{LayoutError, Result};
use crate::geometry;
use crate::options::StressLayoutOptions;
use crate::strategy::{LayoutRequest, LayoutStrategy, LayoutStrategyKind};
use futures::FutureExt;
use futures::future::BoxFuture;
use mapgraph_core::{Size, VisualEdge, VisualNode};
use rustc_hash::FxHashMap;
use std::sync::Arc;

#[derive(Clone)]
pub struct StressLayout {
    solver: Arc<dyn StressSolver>,
}

impl Default for StressLayout {
    fn default() -> Self {
        Self::new(Arc::new(MajorizeSolver))
    }
}

impl std::fmt::Debug for StressLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StressLayout")
            .field("supports_fixed_nodes", &self.solver.supports_fixed_nodes())
            .finish()
    }
}

impl StressLayout {
    pub fn new(solver: Arc<dyn StressSolver>) -> Self {
        Self { solver }
    }

    pub async fn run(&self, request: LayoutRequest<'_>) -> Result<Vec<VisualNode>> {
        let nodes = request.nodes;
        if nodes.is_empty() {
            return Ok(Vec::new());
        }

        let mut pin = !request.anchors.is_empty();
        if pin && !self.solver.supports_fixed_nodes() {
            tracing::warn!(
                anchors = request.anchors.len(),
                "stress solver cannot pin nodes; falling back to a full re-layout"
            );
            pin = false;
        }

        let sizes: Vec<Size> = nodes.iter().map(geometry::estimate_node_size).collect();
        let solver_request = build_request(&request, &sizes, pin);
        let pinned: Vec<bool> = solver_request.nodes.iter().map(|n| n.fixed).collect();
        let response = self
            .solver
            .solve(solver_request)
            .await
            .map_err(|e| LayoutError::Solver { message: e.message })?;

        Ok(apply_response(nodes, &sizes, &pinned, &response))
    }
}

impl LayoutStrategy for StressLayout {
    fn kind(&self) -> LayoutStrategyKind {
        LayoutStrategyKind::Stress
    }

    fn layout<'a>(&'a self, request: LayoutRequest<'a>) -> BoxFuture<'a, Result<Vec<VisualNode>>> {
        self.run(request).boxed()
    }
}

fn build_request(request: &LayoutRequest<'_>, sizes: &[Size], pin: bool) -> SolverRequest {
    let opts = &request.options.stress;
    let nodes: Vec<SolverNode> = request
        .nodes
        .iter()
        .zip(sizes)
        .map(|(n, size)| {
            let (x, y) = size.center_of(n.position);
            SolverNode {
                id: n.id.clone(),
                width: size.width,
                height: size.height,
                x,
                y,
                fixed: pin && request.is_anchored(n),
            }
        })
        .collect();

    let size_by_id: FxHashMap<&str, Size> = request
        .nodes
        .iter()
        .zip(sizes)
        .map(|(n, s)| (n.id.as_str(), *s))
        .collect();
    let multiplicity = pair_multiplicity(request.edges);

    let edges = request
        .edges
        .iter()
        .filter(|e| e.source != e.target)
        .filter_map(|e| {
            let a = size_by_id.get(e.source.as_str())?;
            let b = size_by_id.get(e.target.as_str())?;
            let parallel = multiplicity
                .get(&unordered(&e.source, &e.target))
                .copied()
                .unwrap_or(1);
            Some(SolverEdge {
                id: e.id.clone(),
                source: e.source.clone(),
                target: e.target.clone(),
                ideal_length: ideal_edge_length(e, *a, *b, parallel, opts),
            })
        })
        .collect();

    SolverRequest {
        nodes,
        edges,
        spacing: Spacing {
            node_node: opts.node_node_spacing,
            edge_node: opts.edge_node_spacing,
            edge_edge: opts.edge_edge_spacing,
        },
        iterations: opts.iterations,
        tolerance: opts.tolerance,
    }
}

/// Center-to-center length an edge should get: clear both node boxes, leave room for the label
/// and fan out parallel edges.
pub fn ideal_edge_length(
    edge: &VisualEdge,
    source: Size,
    target: Size,
    parallel: usize,
    opts: &StressLayoutOptions,
) -> f64 {
    let mut len = (source.width + target.width) / 2.0 + opts.node_node_spacing;
    let label = edge.label().trim();
    if !label.is_empty() {
        len += 2.0 * opts.edge_node_spacing;
        if opts.consider_labels {
            len += geometry::estimate_label_width(label);
        }
    }
    len + opts.edge_edge_spacing * parallel.saturating_sub(1) as f64
}

fn unordered<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b { (a, b) } else { (b, a) }
}

fn pair_multiplicity(edges: &[VisualEdge]) -> FxHashMap<(&str, &str), usize> {
    let mut out: FxHashMap<(&str, &str), usize> = FxHashMap::default();
    for e in edges {
        *out.entry(unordered(&e.source, &e.target)).or_default() += 1;
    }
    out
}

/// Converts solver centers back to top-left positions. Pinned nodes keep their exact input
/// position; nodes the solver did not report (or reported with non-finite coordinates) keep
/// their previous position.
fn apply_response(
    nodes: &[VisualNode],
    sizes: &[Size],
    pinned: &[bool],
    response: &SolverResponse,
) -> Vec<VisualNode> {
    let mut missing = 0usize;
    let out = nodes
        .iter()
        .zip(sizes)
        .zip(pinned)
        .map(|((n, size), &pinned)| {
            let mut n = n.clone();
            if pinned {
                return n;
            }
            match response.positions.get(n.id.as_str()) {
                Some(p) if p.x.is_finite() && p.y.is_finite() => {
                    n.position = size.top_left_from_center(p.x, p.y);
                }
                _ => missing += 1,
            }
            n
        })
        .collect();
    if missing > 0 {
        tracing::debug!(missing, "stress solver omitted nodes; kept their previous positions");
    }
    out
}
