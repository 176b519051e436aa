//! Domain entities to visual nodes/edges, and back.

use crate::handles::{self, HandleAssignment};
use crate::is_blank_id;
use crate::model::{Comment, Concept, Perspective, Relationship};
use crate::perspective::{PerspectiveFilter, filter_for_render};
use crate::visual::{
    EdgeData, EdgeKind, NodeData, NodeKind, NodePosition, NodeSource, VisualEdge, VisualGraph,
    VisualNode,
};
use rustc_hash::{FxHashMap, FxHashSet};

/// Maps concepts, relationships and comments 1:1 onto visual nodes and edges.
///
/// Entities with blank ids, soft-deleted entities, duplicate ids (first occurrence wins) and
/// relationships whose endpoints are not mapped concepts are skipped. Every emitted element
/// carries `is_in_perspective` (`None` without a perspective) and the editing flag.
pub fn map_to_visual(
    concepts: &[Concept],
    relationships: &[Relationship],
    comments: &[Comment],
    perspective: Option<&Perspective>,
    editing: bool,
) -> VisualGraph {
    let filter = PerspectiveFilter::new(perspective);

    let mut node_ids: FxHashSet<&str> = FxHashSet::default();
    let mut nodes: Vec<VisualNode> = Vec::with_capacity(concepts.len() + comments.len());
    for concept in concepts {
        if is_blank_id(&concept.id) || concept.is_deleted() {
            continue;
        }
        if !node_ids.insert(concept.id.as_str()) {
            tracing::debug!(id = %concept.id, "skipping duplicate concept id");
            continue;
        }
        nodes.push(concept_to_node(
            concept,
            filter.concept_flag(&concept.id),
            editing,
        ));
    }
    let concept_ids = node_ids.clone();

    let mut relationship_ids: FxHashSet<&str> = FxHashSet::default();
    let mut valid: Vec<&Relationship> = Vec::with_capacity(relationships.len());
    for rel in relationships {
        if is_blank_id(&rel.id) || rel.is_deleted() {
            continue;
        }
        if !concept_ids.contains(rel.from_concept_id.as_str())
            || !concept_ids.contains(rel.to_concept_id.as_str())
        {
            tracing::debug!(
                id = %rel.id,
                from = %rel.from_concept_id,
                to = %rel.to_concept_id,
                "skipping relationship with unmapped endpoint"
            );
            continue;
        }
        if !relationship_ids.insert(rel.id.as_str()) {
            tracing::debug!(id = %rel.id, "skipping duplicate relationship id");
            continue;
        }
        valid.push(rel);
    }

    for comment in comments {
        if is_blank_id(&comment.id) {
            continue;
        }
        if !node_ids.insert(comment.id.as_str()) {
            tracing::debug!(id = %comment.id, "skipping comment with an already used node id");
            continue;
        }
        nodes.push(comment_to_node(comment, editing));
    }

    let assignments = handles::distribute_handles(valid.iter().copied());
    let edges = valid
        .iter()
        .map(|rel| {
            let assignment = assignments
                .get(rel.id.as_str())
                .copied()
                .unwrap_or(HandleAssignment {
                    index: handles::CENTER_HANDLE,
                    group_size: 1,
                    position_in_group: 0,
                });
            relationship_to_edge(rel, assignment, filter.relationship_flag(rel))
        })
        .collect();

    VisualGraph { nodes, edges }
}

/// [`map_to_visual`] followed by the view-mode perspective filter: outside editing mode,
/// excluded elements are not emitted at all.
pub fn map_for_render(
    concepts: &[Concept],
    relationships: &[Relationship],
    comments: &[Comment],
    perspective: Option<&Perspective>,
    editing: bool,
) -> VisualGraph {
    filter_for_render(
        map_to_visual(concepts, relationships, comments, perspective, editing),
        editing,
    )
}

pub fn concept_to_node(
    concept: &Concept,
    is_in_perspective: Option<bool>,
    editing: bool,
) -> VisualNode {
    VisualNode {
        id: concept.id.clone(),
        kind: NodeKind::Concept,
        position: concept.position,
        data: NodeData {
            label: concept.label.clone(),
            source: NodeSource::Concept(concept.clone()),
            is_in_perspective,
            is_editing_perspective: editing,
        },
        measured: None,
    }
}

/// Comments are never perspective members, so their flag is always `None`.
pub fn comment_to_node(comment: &Comment, editing: bool) -> VisualNode {
    VisualNode {
        id: comment.id.clone(),
        kind: NodeKind::Comment,
        position: comment.position,
        data: NodeData {
            label: comment.text.clone(),
            source: NodeSource::Comment(comment.clone()),
            is_in_perspective: None,
            is_editing_perspective: editing,
        },
        measured: None,
    }
}

pub fn relationship_to_edge(
    relationship: &Relationship,
    assignment: HandleAssignment,
    is_in_perspective: Option<bool>,
) -> VisualEdge {
    VisualEdge {
        id: relationship.id.clone(),
        source: relationship.from_concept_id.clone(),
        target: relationship.to_concept_id.clone(),
        source_handle: assignment.source_handle(),
        target_handle: assignment.target_handle(),
        kind: if relationship.is_self_loop() {
            EdgeKind::SelfLoop
        } else {
            EdgeKind::Relationship
        },
        data: EdgeData {
            label: relationship.primary_label.clone(),
            relationship: relationship.clone(),
            is_in_perspective,
            has_multiple_edges: assignment.has_multiple_edges(),
            edge_index: assignment.position_in_group,
        },
    }
}

/// Current node positions, for persisting drag or layout results.
pub fn extract_positions(nodes: &[VisualNode]) -> Vec<NodePosition> {
    nodes
        .iter()
        .map(|n| NodePosition {
            id: n.id.clone(),
            position: n.position,
        })
        .collect()
}

/// Writes positions back onto the matching concepts. Returns how many concepts changed.
pub fn apply_positions(concepts: &mut [Concept], positions: &[NodePosition]) -> usize {
    let by_id: FxHashMap<&str, &NodePosition> =
        positions.iter().map(|p| (p.id.as_str(), p)).collect();
    let mut updated = 0;
    for concept in concepts.iter_mut() {
        let Some(p) = by_id.get(concept.id.as_str()) else {
            continue;
        };
        if !p.position.is_finite() || concept.position == p.position {
            continue;
        }
        concept.position = p.position;
        updated += 1;
    }
    updated
}
