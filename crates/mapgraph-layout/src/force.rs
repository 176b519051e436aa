//! Bounded Fruchterman–Reingold simulation.
//!
//! Runs a fixed number of cooling steps and stops; there is no continuous animation. Output is a
//! pure function of the input, so repeated runs on the same map give the same picture.

use crate::circular::default_radius;
use crate::error::Result;
use crate::geometry;
use crate::options::ForceOptions;
use crate::strategy::{LayoutRequest, LayoutStrategy, LayoutStrategyKind};
use futures::FutureExt;
use futures::future::BoxFuture;
use mapgraph_core::{Size, VisualEdge, VisualNode};
use rustc_hash::{FxHashMap, FxHashSet};
use std::f64::consts::TAU;

const MIN_DISTANCE: f64 = 0.01;

pub fn layout(
    nodes: &[VisualNode],
    edges: &[VisualEdge],
    anchors: &FxHashSet<String>,
    width: f64,
    height: f64,
    opts: &ForceOptions,
) -> Vec<VisualNode> {
    let mut out = nodes.to_vec();
    let n = out.len();
    if n == 0 {
        return out;
    }

    let fixed: Vec<bool> = nodes
        .iter()
        .map(|node| anchors.contains(node.id.as_str()))
        .collect();
    if fixed.iter().all(|&f| f) {
        return out;
    }

    let sizes: Vec<Size> = nodes.iter().map(geometry::estimate_node_size).collect();
    let center = [width / 2.0, height / 2.0];
    if n == 1 {
        out[0].position = sizes[0].top_left_from_center(center[0], center[1]);
        return out;
    }

    let mut pos: Vec<[f64; 2]> = nodes
        .iter()
        .zip(&sizes)
        .map(|(node, size)| {
            let (x, y) = size.center_of(node.position);
            [x, y]
        })
        .collect();
    if needs_seed(&pos, &fixed) {
        seed_on_circle(&mut pos, &fixed, center, default_radius(width, height, n));
    }

    let index: FxHashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (node.id.as_str(), i))
        .collect();
    let links: Vec<(usize, usize)> = edges
        .iter()
        .filter_map(|e| Some((*index.get(e.source.as_str())?, *index.get(e.target.as_str())?)))
        .filter(|(u, v)| u != v)
        .collect();

    let k = (width * height / n as f64).sqrt();
    let t0 = opts
        .initial_temperature
        .unwrap_or(0.1 * width.min(height));
    let mut disp = vec![[0.0_f64; 2]; n];

    for step in 0..opts.iterations {
        let temperature = t0 * (1.0 - step as f64 / opts.iterations as f64);
        disp.iter_mut().for_each(|d| *d = [0.0, 0.0]);

        for i in 0..n {
            for j in i + 1..n {
                let (dir, dist) = direction(pos[i], pos[j], i, j);
                let force = k * k / dist;
                for axis in 0..2 {
                    disp[i][axis] += dir[axis] * force;
                    disp[j][axis] -= dir[axis] * force;
                }
            }
        }

        for &(u, v) in &links {
            let (dir, dist) = direction(pos[v], pos[u], v, u);
            let force = dist * dist / k;
            for axis in 0..2 {
                disp[v][axis] -= dir[axis] * force;
                disp[u][axis] += dir[axis] * force;
            }
        }

        for i in (0..n).filter(|&i| !fixed[i]) {
            for axis in 0..2 {
                disp[i][axis] += (center[axis] - pos[i][axis]) * opts.gravity;
            }
            let len = (disp[i][0] * disp[i][0] + disp[i][1] * disp[i][1]).sqrt();
            if len > 0.0 {
                let limited = len.min(temperature);
                pos[i][0] += disp[i][0] / len * limited;
                pos[i][1] += disp[i][1] / len * limited;
            }
            pos[i] = clamp(pos[i], sizes[i], width, height);
        }
    }

    for (i, node) in out.iter_mut().enumerate() {
        if !fixed[i] {
            node.position = sizes[i].top_left_from_center(pos[i][0], pos[i][1]);
        }
    }
    tracing::debug!(
        nodes = n,
        anchors = fixed.iter().filter(|&&f| f).count(),
        iterations = opts.iterations,
        "force-directed layout finished"
    );
    out
}

/// Unit vector from `b` to `a` and their distance. Coincident points get a deterministic
/// direction derived from their indices.
fn direction(a: [f64; 2], b: [f64; 2], ia: usize, ib: usize) -> ([f64; 2], f64) {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dist = (dx * dx + dy * dy).sqrt();
    if dist < MIN_DISTANCE {
        let angle = (ia * 31 + ib * 17) as f64;
        return ([angle.cos(), angle.sin()], MIN_DISTANCE);
    }
    ([dx / dist, dy / dist], dist)
}

fn clamp(p: [f64; 2], size: Size, width: f64, height: f64) -> [f64; 2] {
    let fit = |v: f64, half: f64, extent: f64| {
        if 2.0 * half >= extent {
            extent / 2.0
        } else {
            v.clamp(half, extent - half)
        }
    };
    [
        fit(p[0], size.half_width(), width),
        fit(p[1], size.half_height(), height),
    ]
}

/// True when two movable nodes share a center, in which case the simulation cannot separate
/// them reproducibly.
fn needs_seed(pos: &[[f64; 2]], fixed: &[bool]) -> bool {
    let mut seen: FxHashSet<(u64, u64)> = FxHashSet::default();
    pos.iter()
        .zip(fixed)
        .filter(|(_, f)| !**f)
        .any(|(p, _)| !seen.insert((p[0].to_bits(), p[1].to_bits())))
}

fn seed_on_circle(pos: &mut [[f64; 2]], fixed: &[bool], center: [f64; 2], radius: f64) {
    let free: Vec<usize> = (0..pos.len()).filter(|&i| !fixed[i]).collect();
    let step = TAU / free.len() as f64;
    for (slot, &i) in free.iter().enumerate() {
        let angle = slot as f64 * step;
        pos[i] = [
            center[0] + radius * angle.cos(),
            center[1] + radius * angle.sin(),
        ];
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ForceDirectedLayout;

impl LayoutStrategy for ForceDirectedLayout {
    fn kind(&self) -> LayoutStrategyKind {
        LayoutStrategyKind::ForceDirected
    }

    fn layout<'a>(&'a self, request: LayoutRequest<'a>) -> BoxFuture<'a, Result<Vec<VisualNode>>> {
        let opts = request.options;
        let nodes = layout(
            request.nodes,
            request.edges,
            request.anchors,
            opts.width,
            opts.height,
            &opts.force,
        );
        futures::future::ready(Ok(nodes)).boxed()
    }
}
