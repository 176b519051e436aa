//! Nodes on a ring around the canvas center, highest degree first.

use crate::error::Result;
use crate::geometry::{self, Bounds, DEFAULT_NODE_SIZE};
use crate::options::CircularOptions;
use crate::strategy::{LayoutRequest, LayoutStrategy, LayoutStrategyKind};
use futures::FutureExt;
use futures::future::BoxFuture;
use mapgraph_core::{Size, VisualEdge, VisualNode};
use rustc_hash::FxHashSet;
use std::f64::consts::{PI, TAU};

/// Ring radius used when none is configured: grows with node count but never leaves the canvas.
pub fn default_radius(width: f64, height: f64, node_count: usize) -> f64 {
    let side = width.min(height);
    let max_radius = 0.4 * side;
    let base_radius = 0.3 * side + 5.0 * node_count as f64;
    max_radius.min(base_radius)
}

pub fn layout(
    nodes: &[VisualNode],
    edges: &[VisualEdge],
    width: f64,
    height: f64,
    opts: &CircularOptions,
) -> Vec<VisualNode> {
    let mut out = nodes.to_vec();
    if out.is_empty() {
        return out;
    }

    let (cx, cy) = (width / 2.0, height / 2.0);
    if out.len() == 1 {
        out[0].position = geometry::top_left_from_center(cx, cy);
        return out;
    }

    let all: Vec<usize> = (0..nodes.len()).collect();
    let radius = opts
        .radius
        .unwrap_or_else(|| default_radius(width, height, nodes.len()));
    place_on_ring(&mut out, edges, &all, (cx, cy), radius, opts, |_| DEFAULT_NODE_SIZE);
    out
}

/// `new-only` variant: anchored nodes stay put and the remaining nodes are arranged on a ring
/// just outside the anchored arrangement.
///
/// Both sides are sized with [`geometry::estimate_node_size`]. Every anchor box fits in the disk
/// spanned by the anchors' bounding box, and the ring radius keeps each new box at least
/// `ring_gap` away from that disk and clear of its neighbours on the ring.
pub fn layout_around(
    nodes: &[VisualNode],
    edges: &[VisualEdge],
    anchors: &FxHashSet<String>,
    width: f64,
    height: f64,
    opts: &CircularOptions,
) -> Vec<VisualNode> {
    let (anchored, fresh): (Vec<usize>, Vec<usize>) =
        (0..nodes.len()).partition(|&i| anchors.contains(nodes[i].id.as_str()));
    if fresh.is_empty() {
        return nodes.to_vec();
    }
    let Some(bounds) = Bounds::of(anchored.iter().map(|&i| &nodes[i])) else {
        return layout(nodes, edges, width, height, opts);
    };

    let anchor_reach = bounds.width().hypot(bounds.height()) / 2.0;
    let fresh_reach = fresh
        .iter()
        .map(|&i| half_diagonal(geometry::estimate_node_size(&nodes[i])))
        .fold(0.0_f64, f64::max);
    let mut radius = anchor_reach + opts.ring_gap + fresh_reach;
    if fresh.len() > 1 {
        // Adjacent centers are a chord of 2r·sin(π/m) apart.
        radius = radius.max(fresh_reach / (PI / fresh.len() as f64).sin());
    }

    let mut out = nodes.to_vec();
    place_on_ring(
        &mut out,
        edges,
        &fresh,
        bounds.center(),
        radius,
        opts,
        geometry::estimate_node_size,
    );
    out
}

fn half_diagonal(size: Size) -> f64 {
    size.half_width().hypot(size.half_height())
}

fn place_on_ring(
    out: &mut [VisualNode],
    edges: &[VisualEdge],
    indices: &[usize],
    (cx, cy): (f64, f64),
    radius: f64,
    opts: &CircularOptions,
    size_of: fn(&VisualNode) -> Size,
) {
    let order = if opts.sort_by_degree {
        geometry::degree_order(out, edges, indices)
    } else {
        indices.to_vec()
    };
    let step = TAU / order.len() as f64;
    for (slot, &idx) in order.iter().enumerate() {
        let angle = opts.start_angle + slot as f64 * step;
        let size = size_of(&out[idx]);
        out[idx].position =
            size.top_left_from_center(cx + radius * angle.cos(), cy + radius * angle.sin());
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CircularLayout;

impl LayoutStrategy for CircularLayout {
    fn kind(&self) -> LayoutStrategyKind {
        LayoutStrategyKind::Circular
    }

    fn layout<'a>(&'a self, request: LayoutRequest<'a>) -> BoxFuture<'a, Result<Vec<VisualNode>>> {
        let opts = request.options;
        let nodes = if request.anchors.is_empty() {
            layout(
                request.nodes,
                request.edges,
                opts.width,
                opts.height,
                &opts.circular,
            )
        } else {
            layout_around(
                request.nodes,
                request.edges,
                request.anchors,
                opts.width,
                opts.height,
                &opts.circular,
            )
        };
        futures::future::ready(Ok(nodes)).boxed()
    }
}
