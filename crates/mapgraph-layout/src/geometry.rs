//! Shared size estimates and coordinate helpers.
//!
//! Visual nodes are positioned by their top-left corner; layout math works on centers.

use mapgraph_core::{Position, Size, VisualEdge, VisualNode};
use rustc_hash::FxHashMap;

/// Approximate half extents of a concept node before the renderer has measured it.
pub const NODE_HALF_WIDTH: f64 = 75.0;
pub const NODE_HALF_HEIGHT: f64 = 25.0;
pub const DEFAULT_NODE_SIZE: Size = Size::new(NODE_HALF_WIDTH * 2.0, NODE_HALF_HEIGHT * 2.0);

const CHAR_WIDTH: f64 = 8.0;
const LABEL_PADDING: f64 = 32.0;

pub fn estimate_label_width(label: &str) -> f64 {
    label.chars().count() as f64 * CHAR_WIDTH + LABEL_PADDING
}

/// Renderer-measured size when available, otherwise a label-based estimate that never drops
/// below [`DEFAULT_NODE_SIZE`].
pub fn estimate_node_size(node: &VisualNode) -> Size {
    if let Some(m) = node.measured {
        if m.width.is_finite() && m.height.is_finite() && m.width > 0.0 && m.height > 0.0 {
            return m;
        }
    }
    Size::new(
        estimate_label_width(node.label()).max(DEFAULT_NODE_SIZE.width),
        DEFAULT_NODE_SIZE.height,
    )
}

/// Top-left position for a default-sized node centered on `(cx, cy)`.
pub fn top_left_from_center(cx: f64, cy: f64) -> Position {
    DEFAULT_NODE_SIZE.top_left_from_center(cx, cy)
}

/// Number of edge endpoints touching each node. Self loops count twice.
pub fn degrees<'a>(nodes: &'a [VisualNode], edges: &[VisualEdge]) -> FxHashMap<&'a str, usize> {
    let mut out: FxHashMap<&'a str, usize> =
        nodes.iter().map(|n| (n.id.as_str(), 0usize)).collect();
    for e in edges {
        for end in [e.source.as_str(), e.target.as_str()] {
            if let Some(d) = out.get_mut(end) {
                *d += 1;
            }
        }
    }
    out
}

/// Indices of `nodes`, sorted by descending degree. The sort is stable, so ties keep their input
/// order.
pub fn degree_order(nodes: &[VisualNode], edges: &[VisualEdge], indices: &[usize]) -> Vec<usize> {
    let deg = degrees(nodes, edges);
    let mut order = indices.to_vec();
    order.sort_by_key(|&i| {
        std::cmp::Reverse(deg.get(nodes[i].id.as_str()).copied().unwrap_or(0))
    });
    order
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Bounding box of the given nodes' rectangles. `None` for an empty selection.
    pub fn of<'a>(nodes: impl IntoIterator<Item = &'a VisualNode>) -> Option<Self> {
        let mut out: Option<Self> = None;
        for n in nodes {
            let size = estimate_node_size(n);
            let rect = Self {
                min_x: n.position.x,
                min_y: n.position.y,
                max_x: n.position.x + size.width,
                max_y: n.position.y + size.height,
            };
            out = Some(match out {
                None => rect,
                Some(b) => Self {
                    min_x: b.min_x.min(rect.min_x),
                    min_y: b.min_y.min(rect.min_y),
                    max_x: b.max_x.max(rect.max_x),
                    max_y: b.max_y.max(rect.max_y),
                },
            });
        }
        out
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}
