#![forbid(unsafe_code)]

//! `mapgraph` is a headless concept-map engine.
//!
//! It turns persisted concepts, relationships, and comments into renderable nodes and edges,
//! applies perspective filters, and positions nodes with interchangeable layout strategies.
//!
//! # Features
//!
//! - `layout` (default): layout strategies and per-map sessions (`mapgraph::layout`)

pub use mapgraph_core::*;

#[cfg(feature = "layout")]
pub mod layout {
    pub use mapgraph_layout::*;

    use mapgraph_core::{VisualEdge, VisualNode};

    /// One-shot layout without incremental state: every node may move.
    ///
    /// Use a [`LayoutSession`] when results of overlapping requests must be discarded or when
    /// `new-only` passes are needed.
    pub async fn apply_layout(
        nodes: &[VisualNode],
        edges: &[VisualEdge],
        kind: LayoutStrategyKind,
        options: &LayoutOptions,
    ) -> Result<Vec<VisualNode>> {
        LayoutSession::new()
            .apply_layout(nodes, edges, kind, options, LayoutScope::All)
            .await
    }

    /// Synchronous wrapper around [`apply_layout`] for callers without an executor.
    pub fn apply_layout_sync(
        nodes: &[VisualNode],
        edges: &[VisualEdge],
        kind: LayoutStrategyKind,
        options: &LayoutOptions,
    ) -> Result<Vec<VisualNode>> {
        futures::executor::block_on(apply_layout(nodes, edges, kind, options))
    }
}
