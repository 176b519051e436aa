#![forbid(unsafe_code)]

//! Headless stress-majorization layout.
//!
//! `majorize` is used by `mapgraph-layout` as its default stress solver. It is runtime-agnostic
//! and synchronous; callers that need a suspending API wrap it themselves.

pub mod algo;
pub mod error;
pub mod graph;

pub use algo::StressOptions;
pub use error::{Error, Result};
pub use graph::{Edge, Graph, LayoutResult, Node, Point};

/// Headless layout entry point.
pub fn layout(graph: &Graph, options: &StressOptions) -> Result<LayoutResult> {
    algo::stress::layout(graph, options)
}
