//! Connector slot assignment for relationships that share an ordered endpoint pair.
//!
//! Every concept exposes `MAX_HANDLES` slots along its bottom (outgoing) and top (incoming)
//! edges. A lone relationship attaches at the center slot; parallel relationships spread
//! symmetrically around it and are compressed toward the outer slots as the group grows.

use crate::model::Relationship;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;

pub const MAX_HANDLES: usize = 5;
pub const CENTER_HANDLE: usize = MAX_HANDLES / 2;

/// Slot index for the `i`-th member (0-based, input order) of a group of `n` parallel
/// relationships. Always within `0..MAX_HANDLES`.
pub fn handle_index(i: usize, n: usize) -> usize {
    match n {
        0 | 1 => CENTER_HANDLE,
        2 => {
            if i == 0 {
                CENTER_HANDLE - 1
            } else {
                CENTER_HANDLE + 1
            }
        }
        3 => (CENTER_HANDLE - 1 + i).min(CENTER_HANDLE + 1),
        _ => {
            let offset = i as f64 - (n - 1) as f64 / 2.0;
            let half_slots = (MAX_HANDLES / 2) as f64;
            let scale = (half_slots / n.div_ceil(2) as f64).min(1.0);
            let index = CENTER_HANDLE as f64 + (offset * scale).round();
            index.clamp(0.0, (MAX_HANDLES - 1) as f64) as usize
        }
    }
}

pub fn source_handle_id(index: usize) -> String {
    format!("bottom-{index}")
}

pub fn target_handle_id(index: usize) -> String {
    format!("top-{index}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleAssignment {
    pub index: usize,
    pub group_size: usize,
    /// 0-based position within the group, in input order.
    pub position_in_group: usize,
}

impl HandleAssignment {
    pub fn source_handle(&self) -> String {
        source_handle_id(self.index)
    }

    pub fn target_handle(&self) -> String {
        target_handle_id(self.index)
    }

    pub fn has_multiple_edges(&self) -> bool {
        self.group_size > 1
    }
}

/// Groups relationships by `(from_concept_id, to_concept_id)` and assigns slots within each
/// group. Grouping is direction-sensitive: `A -> B` and `B -> A` are separate groups.
///
/// Callers are expected to pass already-validated relationships; the result is keyed by
/// relationship id.
pub fn distribute_handles<'a, I>(relationships: I) -> FxHashMap<&'a str, HandleAssignment>
where
    I: IntoIterator<Item = &'a Relationship>,
{
    let mut groups: IndexMap<(&'a str, &'a str), Vec<&'a str>> = IndexMap::new();
    for rel in relationships {
        groups
            .entry((rel.from_concept_id.as_str(), rel.to_concept_id.as_str()))
            .or_default()
            .push(rel.id.as_str());
    }

    let mut out: FxHashMap<&'a str, HandleAssignment> = FxHashMap::default();
    for ids in groups.values() {
        let n = ids.len();
        for (i, &id) in ids.iter().enumerate() {
            out.insert(
                id,
                HandleAssignment {
                    index: handle_index(i, n),
                    group_size: n,
                    position_in_group: i,
                },
            );
        }
    }
    out
}
