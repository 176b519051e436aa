use crate::model::{Perspective, Relationship};
use crate::visual::VisualGraph;
use rustc_hash::{FxHashMap, FxHashSet};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PerspectiveError {
    #[error(
        "relationship {relationship_id} cannot be added to perspective {perspective_id}: endpoint concept {concept_id} is not included"
    )]
    EndpointNotIncluded {
        perspective_id: String,
        relationship_id: String,
        concept_id: String,
    },

    #[error("perspective {perspective_id} includes relationships with excluded endpoints: {}", .relationship_ids.join(", "))]
    InvariantViolated {
        perspective_id: String,
        relationship_ids: Vec<String>,
    },
}

/// Outcome of a toggle operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toggle {
    Added,
    /// The entity was removed; `cascaded` lists relationship ids that had to leave with it.
    Removed { cascaded: Vec<String> },
}

/// How a visual element should be presented for a given inclusion flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualStyle {
    Normal,
    Dimmed,
    Hidden,
}

impl VisualStyle {
    pub fn for_flag(is_in_perspective: Option<bool>, editing: bool) -> Self {
        match (is_in_perspective, editing) {
            (Some(false), true) => Self::Dimmed,
            (Some(false), false) => Self::Hidden,
            _ => Self::Normal,
        }
    }
}

/// Inclusion lookup for an (optional) active perspective. Without a perspective every flag is
/// `None`, which renderers treat as "no filter".
#[derive(Debug, Clone, Default)]
pub struct PerspectiveFilter {
    sets: Option<(FxHashSet<String>, FxHashSet<String>)>,
}

impl PerspectiveFilter {
    pub fn new(perspective: Option<&Perspective>) -> Self {
        Self {
            sets: perspective.map(|p| {
                (
                    p.concept_ids.iter().cloned().collect(),
                    p.relationship_ids.iter().cloned().collect(),
                )
            }),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.sets.is_some()
    }

    pub fn concept_flag(&self, concept_id: &str) -> Option<bool> {
        self.sets
            .as_ref()
            .map(|(concepts, _)| concepts.contains(concept_id))
    }

    /// A relationship only counts as included when both endpoints are, even if the stored
    /// perspective says otherwise.
    pub fn relationship_flag(&self, relationship: &Relationship) -> Option<bool> {
        self.sets.as_ref().map(|(concepts, relationships)| {
            relationships.contains(relationship.id.as_str())
                && concepts.contains(relationship.from_concept_id.as_str())
                && concepts.contains(relationship.to_concept_id.as_str())
        })
    }
}

/// Drops perspective-excluded elements in view mode. Editing mode keeps everything; excluded
/// elements are already flagged for dimmed styling.
pub fn filter_for_render(mut graph: VisualGraph, editing: bool) -> VisualGraph {
    if editing {
        return graph;
    }
    graph.nodes.retain(|n| n.data.is_in_perspective != Some(false));
    let visible: FxHashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    let edges = std::mem::take(&mut graph.edges);
    graph.edges = edges
        .into_iter()
        .filter(|e| {
            e.data.is_in_perspective != Some(false)
                && visible.contains(e.source.as_str())
                && visible.contains(e.target.as_str())
        })
        .collect();
    graph
}

impl Perspective {
    /// Adds the concept, or removes it together with every included relationship touching it.
    pub fn toggle_concept(&mut self, concept_id: &str, relationships: &[Relationship]) -> Toggle {
        if !self.concept_ids.contains(concept_id) {
            self.concept_ids.insert(concept_id.to_string());
            return Toggle::Added;
        }

        self.concept_ids.shift_remove(concept_id);
        let mut cascaded = Vec::new();
        for rel in relationships {
            let touches = rel.from_concept_id == concept_id || rel.to_concept_id == concept_id;
            if touches && self.relationship_ids.shift_remove(rel.id.as_str()) {
                cascaded.push(rel.id.clone());
            }
        }
        if !cascaded.is_empty() {
            tracing::debug!(
                perspective = %self.id,
                concept = concept_id,
                count = cascaded.len(),
                "removed relationships with the concept"
            );
        }
        Toggle::Removed { cascaded }
    }

    /// Removes the relationship if present; otherwise adds it when both endpoints are included.
    /// A rejected add leaves the perspective unchanged.
    pub fn toggle_relationship(
        &mut self,
        relationship: &Relationship,
    ) -> Result<Toggle, PerspectiveError> {
        if self.relationship_ids.shift_remove(relationship.id.as_str()) {
            return Ok(Toggle::Removed {
                cascaded: Vec::new(),
            });
        }

        for endpoint in [&relationship.from_concept_id, &relationship.to_concept_id] {
            if !self.concept_ids.contains(endpoint.as_str()) {
                return Err(PerspectiveError::EndpointNotIncluded {
                    perspective_id: self.id.clone(),
                    relationship_id: relationship.id.clone(),
                    concept_id: endpoint.clone(),
                });
            }
        }
        self.relationship_ids.insert(relationship.id.clone());
        Ok(Toggle::Added)
    }

    /// Relationship ids that break the endpoint-inclusion invariant. Ids that name no known
    /// relationship are reported too, since their endpoints cannot be checked.
    pub fn violations(&self, relationships: &[Relationship]) -> Vec<String> {
        let by_id: FxHashMap<&str, &Relationship> =
            relationships.iter().map(|r| (r.id.as_str(), r)).collect();
        self.relationship_ids
            .iter()
            .filter(|id| match by_id.get(id.as_str()) {
                Some(rel) => {
                    !self.concept_ids.contains(rel.from_concept_id.as_str())
                        || !self.concept_ids.contains(rel.to_concept_id.as_str())
                }
                None => true,
            })
            .cloned()
            .collect()
    }

    pub fn validate(&self, relationships: &[Relationship]) -> Result<(), PerspectiveError> {
        let relationship_ids = self.violations(relationships);
        if relationship_ids.is_empty() {
            Ok(())
        } else {
            Err(PerspectiveError::InvariantViolated {
                perspective_id: self.id.clone(),
                relationship_ids,
            })
        }
    }

    /// Drops every violating relationship id and returns them.
    pub fn repair(&mut self, relationships: &[Relationship]) -> Vec<String> {
        let removed = self.violations(relationships);
        for id in &removed {
            self.relationship_ids.shift_remove(id.as_str());
        }
        if !removed.is_empty() {
            tracing::warn!(
                perspective = %self.id,
                count = removed.len(),
                "dropped relationships with excluded endpoints"
            );
        }
        removed
    }
}
