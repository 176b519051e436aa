//! Persisted domain entities, as delivered by the (permission-filtered) persistence layer.

use crate::geom::Position;
use crate::metadata::Metadata;
use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concept {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Soft-delete marker; deleted concepts are never mapped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Concept {
    pub fn new(id: impl Into<String>, label: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            position,
            notes: None,
            metadata: None,
            created_at: None,
            updated_at: None,
            deleted_at: None,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub id: String,
    pub from_concept_id: String,
    pub to_concept_id: String,
    #[serde(default)]
    pub primary_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Relationship {
    pub fn new(
        id: impl Into<String>,
        from_concept_id: impl Into<String>,
        to_concept_id: impl Into<String>,
        primary_label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            from_concept_id: from_concept_id.into(),
            to_concept_id: to_concept_id.into(),
            primary_label: primary_label.into(),
            reverse_label: None,
            notes: None,
            metadata: None,
            created_at: None,
            updated_at: None,
            deleted_at: None,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn is_self_loop(&self) -> bool {
        self.from_concept_id == self.to_concept_id
    }
}

/// Free-floating canvas annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn new(id: impl Into<String>, text: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            position,
            author: None,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Named subset of a map. Every relationship id must name a relationship whose endpoints are both
/// in `concept_ids`; see [`crate::perspective`] for the operations that keep this true.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Perspective {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub concept_ids: IndexSet<String>,
    #[serde(default)]
    pub relationship_ids: IndexSet<String>,
}

impl Perspective {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn includes_concept(&self, concept_id: &str) -> bool {
        self.concept_ids.contains(concept_id)
    }

    pub fn includes_relationship(&self, relationship_id: &str) -> bool {
        self.relationship_ids.contains(relationship_id)
    }
}
