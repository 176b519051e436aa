//! All-pairs graph distances for the stress model.

use crate::graph::Graph;
use indexmap::IndexMap;
use nalgebra as na;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    dist: f64,
    node: usize,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    // Reversed so `BinaryHeap` pops the closest node first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.node.cmp(&self.node))
    }
}

/// Builds the undirected adjacency list. Parallel edges collapse to their shortest ideal length;
/// self loops are ignored.
pub(crate) fn adjacency(
    graph: &Graph,
    index: &FxHashMap<&str, usize>,
    default_edge_length: f64,
) -> Vec<Vec<(usize, f64)>> {
    let mut collapsed: IndexMap<(usize, usize), f64> = IndexMap::new();
    for e in &graph.edges {
        let (Some(&a), Some(&b)) = (index.get(e.source.as_str()), index.get(e.target.as_str()))
        else {
            continue;
        };
        if a == b {
            continue;
        }
        let len = e
            .ideal_length
            .filter(|l| l.is_finite() && *l > 0.0)
            .unwrap_or(default_edge_length);
        let key = (a.min(b), a.max(b));
        collapsed
            .entry(key)
            .and_modify(|cur| *cur = cur.min(len))
            .or_insert(len);
    }

    let mut adj: Vec<Vec<(usize, f64)>> = vec![Vec::new(); graph.nodes.len()];
    for (&(a, b), &len) in &collapsed {
        adj[a].push((b, len));
        adj[b].push((a, len));
    }
    adj
}

/// Dijkstra from every node. Unreachable pairs are assigned `max finite distance +
/// default_edge_length` so disconnected components settle next to each other instead of drifting
/// apart.
pub(crate) fn all_pairs(adj: &[Vec<(usize, f64)>], default_edge_length: f64) -> na::DMatrix<f64> {
    let n = adj.len();
    let mut dist = na::DMatrix::<f64>::from_element(n, n, f64::INFINITY);

    for source in 0..n {
        dist[(source, source)] = 0.0;
        let mut heap = BinaryHeap::new();
        heap.push(HeapEntry {
            dist: 0.0,
            node: source,
        });
        while let Some(HeapEntry { dist: d, node }) = heap.pop() {
            if d > dist[(source, node)] {
                continue;
            }
            for &(next, len) in &adj[node] {
                let candidate = d + len;
                if candidate < dist[(source, next)] {
                    dist[(source, next)] = candidate;
                    heap.push(HeapEntry {
                        dist: candidate,
                        node: next,
                    });
                }
            }
        }
    }

    let max_finite = dist
        .iter()
        .copied()
        .filter(|d| d.is_finite())
        .fold(0.0_f64, f64::max);
    let unreachable = max_finite + default_edge_length;
    for d in dist.iter_mut() {
        if !d.is_finite() {
            *d = unreachable;
        }
    }
    dist
}
