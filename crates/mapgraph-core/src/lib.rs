#![forbid(unsafe_code)]

//! Concept-map domain model and visual mapping (headless).
//!
//! Design goals:
//! - pure, deterministic conversion from persisted entities to renderable nodes and edges
//! - symmetric connector placement for parallel relationships
//! - perspective filtering that never breaks the endpoint-inclusion invariant

pub mod config;
pub mod error;
pub mod geom;
pub mod handles;
pub mod mapper;
pub mod metadata;
pub mod model;
pub mod perspective;
pub mod visual;

pub use config::LayoutConfig;
pub use error::{Error, Result};
pub use geom::{Position, Size};
pub use handles::{CENTER_HANDLE, HandleAssignment, MAX_HANDLES, distribute_handles, handle_index};
pub use mapper::{apply_positions, extract_positions, map_for_render, map_to_visual};
pub use metadata::Metadata;
pub use model::{Comment, Concept, Perspective, Relationship};
pub use perspective::{PerspectiveError, PerspectiveFilter, Toggle, VisualStyle};
pub use visual::{
    EdgeData, EdgeKind, NodeData, NodeKind, NodePosition, NodeSource, VisualEdge, VisualGraph,
    VisualNode,
};

/// Entity ids that are empty or whitespace-only are treated as absent.
pub fn is_blank_id(id: &str) -> bool {
    id.trim().is_empty()
}
