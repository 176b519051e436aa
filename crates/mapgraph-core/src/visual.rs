//! Renderable projection of the domain graph.

use crate::geom::{Position, Size};
use crate::model::{Comment, Concept, Relationship};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Concept,
    Comment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    Relationship,
    /// A relationship whose endpoints are the same concept.
    SelfLoop,
}

/// The entity a visual node was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "entity", rename_all = "lowercase")]
pub enum NodeSource {
    Concept(Concept),
    Comment(Comment),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    pub label: String,
    pub source: NodeSource,
    /// `None` when no perspective filter is active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_in_perspective: Option<bool>,
    #[serde(default)]
    pub is_editing_perspective: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualNode {
    pub id: String,
    pub kind: NodeKind,
    pub position: Position,
    pub data: NodeData,
    /// Size reported by the renderer once the node has been drawn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measured: Option<Size>,
}

impl VisualNode {
    pub fn label(&self) -> &str {
        &self.data.label
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeData {
    pub label: String,
    pub relationship: Relationship,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_in_perspective: Option<bool>,
    pub has_multiple_edges: bool,
    /// Position of this edge among relationships sharing its ordered endpoint pair.
    pub edge_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub source_handle: String,
    pub target_handle: String,
    pub kind: EdgeKind,
    pub data: EdgeData,
}

impl VisualEdge {
    pub fn label(&self) -> &str {
        &self.data.label
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualGraph {
    pub nodes: Vec<VisualNode>,
    pub edges: Vec<VisualEdge>,
}

impl VisualGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&VisualNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&VisualEdge> {
        self.edges.iter().find(|e| e.id == id)
    }
}

/// A node position as handed back to the persistence layer after a drag or layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePosition {
    pub id: String,
    pub position: Position,
}
