//! Coordinate assignment for ordered ranks.

use crate::options::{Direction, HierarchicalOptions};
use mapgraph_core::Size;

/// Node centers of a layered block, centered on the origin.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Placement {
    pub(crate) centers: Vec<(f64, f64)>,
    pub(crate) min: (f64, f64),
    pub(crate) max: (f64, f64),
}

/// Ranks are stacked along the direction axis, `rank_sep` apart; within a rank nodes follow the
/// given order, `node_sep` apart, and every rank is centered on the block's center line.
pub(crate) fn assign(
    layers: &[Vec<usize>],
    sizes: &[Size],
    opts: &HierarchicalOptions,
) -> Placement {
    type Extent = fn(&Size) -> f64;
    let (rank_extent, slot_extent): (Extent, Extent) = match opts.direction {
        Direction::TB => (|s: &Size| s.height, |s: &Size| s.width),
        Direction::LR => (|s: &Size| s.width, |s: &Size| s.height),
    };

    let thickness: Vec<f64> = layers
        .iter()
        .map(|layer| {
            layer
                .iter()
                .map(|&v| rank_extent(&sizes[v]))
                .fold(0.0, f64::max)
        })
        .collect();
    let total = thickness.iter().sum::<f64>()
        + opts.rank_sep * layers.len().saturating_sub(1) as f64;

    let mut centers = vec![(0.0, 0.0); sizes.len()];
    let mut rank_cursor = -total / 2.0;
    for (layer, &thick) in layers.iter().zip(&thickness) {
        let rank_center = rank_cursor + thick / 2.0;
        rank_cursor += thick + opts.rank_sep;

        let span = layer.iter().map(|&v| slot_extent(&sizes[v])).sum::<f64>()
            + opts.node_sep * layer.len().saturating_sub(1) as f64;
        let mut slot_cursor = -span / 2.0;
        for &v in layer {
            let ext = slot_extent(&sizes[v]);
            let slot_center = slot_cursor + ext / 2.0;
            slot_cursor += ext + opts.node_sep;
            centers[v] = match opts.direction {
                Direction::TB => (slot_center, rank_center),
                Direction::LR => (rank_center, slot_center),
            };
        }
    }

    let mut min = (f64::INFINITY, f64::INFINITY);
    let mut max = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for layer in layers {
        for &v in layer {
            let (cx, cy) = centers[v];
            let size = sizes[v];
            min.0 = min.0.min(cx - size.half_width());
            min.1 = min.1.min(cy - size.half_height());
            max.0 = max.0.max(cx + size.half_width());
            max.1 = max.1.max(cy + size.half_height());
        }
    }
    if !min.0.is_finite() {
        min = (0.0, 0.0);
        max = (0.0, 0.0);
    }

    Placement { centers, min, max }
}
