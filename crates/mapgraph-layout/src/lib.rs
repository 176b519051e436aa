#![forbid(unsafe_code)]

//! Layout strategies for mapgraph visual graphs.
//!
//! Every strategy implements the same contract, `(nodes, edges, options) -> nodes'`, and is
//! looked up through a [`StrategyRegistry`]. A [`LayoutSession`] ties the registry to one open
//! map: it remembers which nodes were already placed (for `new-only` passes) and discards results
//! of layout requests that were overtaken by a newer one.
//!
//! All APIs are runtime-agnostic; only the stress strategy actually suspends.

pub mod circular;
pub mod error;
pub mod force;
pub mod geometry;
pub mod hierarchical;
pub mod options;
pub mod registry;
pub mod session;
pub mod strategy;
pub mod stress;
pub mod tracker;

pub use circular::CircularLayout;
pub use error::{LayoutError, Result};
pub use force::ForceDirectedLayout;
pub use hierarchical::HierarchicalLayout;
pub use options::{
    CircularOptions, Direction, ForceOptions, HierarchicalOptions, LayoutOptions,
    StressLayoutOptions,
};
pub use registry::StrategyRegistry;
pub use session::LayoutSession;
pub use strategy::{LayoutRequest, LayoutScope, LayoutStrategy, LayoutStrategyKind};
pub use stress::{
    MajorizeSolver, SolveFuture, SolvedPosition, SolverError, SolverRequest, SolverResponse,
    StressLayout, StressSolver,
};
pub use tracker::LaidOutSet;
