use crate::error::{LayoutError, Result};
use crate::options::LayoutOptions;
use futures::future::BoxFuture;
use mapgraph_core::{VisualEdge, VisualNode};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutStrategyKind {
    Circular,
    Stress,
    Hierarchical,
    ForceDirected,
}

impl LayoutStrategyKind {
    pub const ALL: [Self; 4] = [
        Self::Circular,
        Self::Stress,
        Self::Hierarchical,
        Self::ForceDirected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Circular => "circular",
            Self::Stress => "stress",
            Self::Hierarchical => "hierarchical",
            Self::ForceDirected => "force-directed",
        }
    }
}

impl std::fmt::Display for LayoutStrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LayoutStrategyKind {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == name)
            .ok_or(LayoutError::UnknownStrategyName { name })
    }
}

/// Which nodes a layout pass may move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutScope {
    #[default]
    All,
    /// Only nodes not placed by an earlier pass move; the others act as fixed anchors.
    NewOnly,
}

impl std::str::FromStr for LayoutScope {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "new-only" | "new_only" => Ok(Self::NewOnly),
            other => Err(LayoutError::UnknownScope {
                name: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LayoutRequest<'a> {
    pub nodes: &'a [VisualNode],
    pub edges: &'a [VisualEdge],
    pub options: &'a LayoutOptions,
    /// Ids of nodes that must keep their current position. Empty for a full pass.
    pub anchors: &'a FxHashSet<String>,
}

impl<'a> LayoutRequest<'a> {
    pub fn is_anchored(&self, node: &VisualNode) -> bool {
        self.anchors.contains(node.id.as_str())
    }
}

/// The uniform layout contract. Implementations return one node per input node, in input order,
/// with only `position` changed.
pub trait LayoutStrategy: Send + Sync {
    fn kind(&self) -> LayoutStrategyKind;

    fn layout<'a>(&'a self, request: LayoutRequest<'a>) -> BoxFuture<'a, Result<Vec<VisualNode>>>;
}
