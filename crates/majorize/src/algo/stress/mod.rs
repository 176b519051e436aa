use crate::algo::StressOptions;
use crate::algo::overlap;
use crate::error::Result;
use crate::graph::{Graph, LayoutResult, Point};
use nalgebra as na;
use rustc_hash::FxHashMap;

mod paths;

type Vec2 = na::Vector2<f64>;

const EPSILON: f64 = 1e-9;

pub fn layout(graph: &Graph, opts: &StressOptions) -> Result<LayoutResult> {
    graph.validate()?;
    opts.validate()?;

    let n = graph.nodes.len();
    if n == 0 {
        return Ok(LayoutResult::default());
    }

    let index: FxHashMap<&str, usize> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (node.id.as_str(), i))
        .collect();
    let fixed: Vec<bool> = graph.nodes.iter().map(|node| node.fixed).collect();
    let mut pos = seed_positions(graph, opts.default_edge_length);

    let mut iterations = 0;
    let mut stress = 0.0;
    if n > 1 {
        let adj = paths::adjacency(graph, &index, opts.default_edge_length);
        let dist = paths::all_pairs(&adj, opts.default_edge_length);

        let orig_center = centroid(&pos);
        stress = weighted_stress(&pos, &dist);
        while iterations < opts.max_iterations {
            iterations += 1;
            sweep(&mut pos, &dist, &fixed);
            let next = weighted_stress(&pos, &dist);
            let improvement = if stress > EPSILON {
                (stress - next) / stress
            } else {
                0.0
            };
            stress = next;
            if improvement.abs() < opts.tolerance {
                break;
            }
        }

        // Without pinned nodes the solution is only defined up to translation; keep it where the
        // caller's initial arrangement was.
        if !fixed.iter().any(|f| *f) {
            let delta = orig_center - centroid(&pos);
            for p in &mut pos {
                *p += delta;
            }
        }
    }

    if opts.remove_overlaps && n > 1 {
        let sizes: Vec<(f64, f64)> = graph
            .nodes
            .iter()
            .map(|node| (node.width.max(0.0), node.height.max(0.0)))
            .collect();
        overlap::separate(&mut pos, &sizes, &fixed, opts.node_spacing);
    }

    let positions = graph
        .nodes
        .iter()
        .zip(&pos)
        .map(|(node, p)| (node.id.clone(), Point { x: p.x, y: p.y }))
        .collect();

    Ok(LayoutResult {
        positions,
        stress,
        iterations,
    })
}

/// One Gauss-Seidel majorization sweep. Each free node moves to the weighted average of the
/// positions its neighbours "want" it at; weights are `d_ij^-2`.
fn sweep(pos: &mut [Vec2], dist: &na::DMatrix<f64>, fixed: &[bool]) {
    let n = pos.len();
    for i in 0..n {
        if fixed[i] {
            continue;
        }
        let mut num = Vec2::zeros();
        let mut denom = 0.0;
        for j in 0..n {
            if i == j {
                continue;
            }
            let d = dist[(i, j)];
            if d <= EPSILON {
                continue;
            }
            let w = 1.0 / (d * d);
            let delta = pos[i] - pos[j];
            let norm = delta.norm();
            let target = if norm > EPSILON {
                pos[j] + delta * (d / norm)
            } else {
                pos[j]
            };
            num += target * w;
            denom += w;
        }
        if denom > 0.0 {
            pos[i] = num / denom;
        }
    }
}

fn weighted_stress(pos: &[Vec2], dist: &na::DMatrix<f64>) -> f64 {
    let n = pos.len();
    let mut total = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            let d = dist[(i, j)];
            if d <= EPSILON {
                continue;
            }
            let diff = (pos[i] - pos[j]).norm() - d;
            total += diff * diff / (d * d);
        }
    }
    total
}

fn centroid(pos: &[Vec2]) -> Vec2 {
    if pos.is_empty() {
        return Vec2::zeros();
    }
    let sum = pos.iter().fold(Vec2::zeros(), |acc, p| acc + p);
    sum / pos.len() as f64
}

/// Uses the caller's positions, spreading out free nodes that coincide with an earlier node.
/// Coincident nodes give the majorization update no direction to move in.
fn seed_positions(graph: &Graph, edge_length: f64) -> Vec<Vec2> {
    let n = graph.nodes.len();
    let mut pos: Vec<Vec2> = graph
        .nodes
        .iter()
        .map(|node| {
            let x = if node.x.is_finite() { node.x } else { 0.0 };
            let y = if node.y.is_finite() { node.y } else { 0.0 };
            Vec2::new(x, y)
        })
        .collect();

    let center = centroid(&pos);
    let radius = edge_length * (n as f64).sqrt() / 2.0;
    let step = std::f64::consts::TAU / n as f64;
    for i in 0..n {
        if graph.nodes[i].fixed {
            continue;
        }
        let collides = (0..i).any(|j| (pos[i] - pos[j]).norm() <= EPSILON);
        if collides {
            let angle = step * i as f64;
            pos[i] = center + Vec2::new(radius * angle.cos(), radius * angle.sin());
        }
    }
    pos
}
