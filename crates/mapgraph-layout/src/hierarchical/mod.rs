//! Layered (Sugiyama-style) placement.
//!
//! Pipeline: break cycles, rank by longest path, reduce crossings with barycenter sweeps, then
//! assign coordinates rank by rank.

mod acyclic;
mod order;
mod position;
mod rank;

use crate::error::Result;
use crate::geometry::{self, Bounds};
use crate::options::{Direction, HierarchicalOptions};
use crate::strategy::{LayoutRequest, LayoutStrategy, LayoutStrategyKind};
use futures::FutureExt;
use futures::future::BoxFuture;
use mapgraph_core::{Size, VisualEdge, VisualNode};
use order::Layering;
use position::Placement;
use rustc_hash::{FxHashMap, FxHashSet};

pub fn layout(
    nodes: &[VisualNode],
    edges: &[VisualEdge],
    width: f64,
    height: f64,
    opts: &HierarchicalOptions,
) -> Vec<VisualNode> {
    let mut out = nodes.to_vec();
    if out.is_empty() {
        return out;
    }
    let all: Vec<usize> = (0..nodes.len()).collect();
    let placement = place(nodes, edges, &all, opts);
    apply(&mut out, &all, &placement, (width / 2.0, height / 2.0));
    out
}

/// `new-only` variant: anchored nodes stay put; the remaining nodes are layered among
/// themselves and placed past the anchors' bounding box in the flow direction.
pub fn layout_around(
    nodes: &[VisualNode],
    edges: &[VisualEdge],
    anchors: &FxHashSet<String>,
    width: f64,
    height: f64,
    opts: &HierarchicalOptions,
) -> Vec<VisualNode> {
    let (anchored, fresh): (Vec<usize>, Vec<usize>) =
        (0..nodes.len()).partition(|&i| anchors.contains(nodes[i].id.as_str()));
    if fresh.is_empty() {
        return nodes.to_vec();
    }
    let Some(bounds) = Bounds::of(anchored.iter().map(|&i| &nodes[i])) else {
        return layout(nodes, edges, width, height, opts);
    };

    let placement = place(nodes, edges, &fresh, opts);
    let (bx, by) = bounds.center();
    let offset = match opts.direction {
        Direction::TB => (bx, bounds.max_y + opts.rank_sep - placement.min.1),
        Direction::LR => (bounds.max_x + opts.rank_sep - placement.min.0, by),
    };

    let mut out = nodes.to_vec();
    apply(&mut out, &fresh, &placement, offset);
    out
}

/// Lays out the subgraph induced by `subset` (indices into `nodes`). Placement indices are
/// positions within `subset`.
fn place(
    nodes: &[VisualNode],
    edges: &[VisualEdge],
    subset: &[usize],
    opts: &HierarchicalOptions,
) -> Placement {
    let mut local: FxHashMap<&str, usize> = FxHashMap::default();
    for (li, &i) in subset.iter().enumerate() {
        local.entry(nodes[i].id.as_str()).or_insert(li);
    }
    let links: Vec<(usize, usize)> = edges
        .iter()
        .filter_map(|e| Some((*local.get(e.source.as_str())?, *local.get(e.target.as_str())?)))
        .collect();

    let dag = acyclic::break_cycles(subset.len(), &links);
    let ranks = rank::longest_path(subset.len(), &dag);
    let mut layering = Layering::build(&ranks, &dag);
    let crossings = layering.reduce_crossings(opts.sweeps);

    let sizes: Vec<Size> = subset
        .iter()
        .map(|&i| geometry::estimate_node_size(&nodes[i]))
        .collect();
    let layers = layering.real_layers();
    tracing::debug!(
        nodes = subset.len(),
        ranks = layers.len(),
        crossings,
        "hierarchical layout placed"
    );
    position::assign(&layers, &sizes, opts)
}

fn apply(out: &mut [VisualNode], subset: &[usize], placement: &Placement, (ox, oy): (f64, f64)) {
    for (li, &i) in subset.iter().enumerate() {
        let (cx, cy) = placement.centers[li];
        let size = geometry::estimate_node_size(&out[i]);
        out[i].position = size.top_left_from_center(cx + ox, cy + oy);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HierarchicalLayout;

impl LayoutStrategy for HierarchicalLayout {
    fn kind(&self) -> LayoutStrategyKind {
        LayoutStrategyKind::Hierarchical
    }

    fn layout<'a>(&'a self, request: LayoutRequest<'a>) -> BoxFuture<'a, Result<Vec<VisualNode>>> {
        let opts = request.options;
        let nodes = if request.anchors.is_empty() {
            layout(
                request.nodes,
                request.edges,
                opts.width,
                opts.height,
                &opts.hierarchical,
            )
        } else {
            layout_around(
                request.nodes,
                request.edges,
                request.anchors,
                opts.width,
                opts.height,
                &opts.hierarchical,
            )
        };
        futures::future::ready(Ok(nodes)).boxed()
    }
}
