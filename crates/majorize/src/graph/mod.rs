use crate::error::{Error, Result};
use rustc_hash::FxHashSet;

#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn validate(&self) -> Result<()> {
        let mut node_exists: FxHashSet<&str> = FxHashSet::default();
        for n in &self.nodes {
            if !node_exists.insert(n.id.as_str()) {
                return Err(Error::DuplicateNode {
                    node_id: n.id.clone(),
                });
            }
        }
        for e in &self.edges {
            if !node_exists.contains(e.source.as_str()) || !node_exists.contains(e.target.as_str())
            {
                return Err(Error::MissingEndpoint {
                    edge_id: e.id.clone(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub id: String,
    pub width: f64,
    pub height: f64,
    /// Initial position (center). Nodes that share a position are spread out before iterating.
    pub x: f64,
    pub y: f64,
    /// Fixed nodes contribute to the stress of their neighbours but are never moved.
    pub fixed: bool,
}

#[derive(Debug, Clone)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    /// Ideal rendered length; falls back to [`crate::StressOptions::default_edge_length`].
    pub ideal_length: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default)]
pub struct LayoutResult {
    /// Center-anchored node positions keyed by node id.
    pub positions: std::collections::BTreeMap<String, Point>,
    /// Final weighted stress value.
    pub stress: f64,
    pub iterations: usize,
}
