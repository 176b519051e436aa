use crate::error::{LayoutError, Result};
use mapgraph_core::LayoutConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutOptions {
    pub width: f64,
    pub height: f64,
    pub circular: CircularOptions,
    pub stress: StressLayoutOptions,
    pub hierarchical: HierarchicalOptions,
    pub force: ForceOptions,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 1000.0,
            circular: CircularOptions::default(),
            stress: StressLayoutOptions::default(),
            hierarchical: HierarchicalOptions::default(),
            force: ForceOptions::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CircularOptions {
    /// Explicit ring radius; derived from canvas size and node count when unset.
    pub radius: Option<f64>,
    /// Angle (radians) of the first placed node.
    pub start_angle: f64,
    pub sort_by_degree: bool,
    /// Minimum clearance between the anchored arrangement and the boxes of new nodes.
    pub ring_gap: f64,
}

impl Default for CircularOptions {
    fn default() -> Self {
        Self {
            radius: None,
            start_angle: 0.0,
            sort_by_degree: true,
            ring_gap: 150.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StressLayoutOptions {
    pub iterations: usize,
    pub node_node_spacing: f64,
    pub edge_node_spacing: f64,
    pub edge_edge_spacing: f64,
    /// Lengthen labeled edges by their estimated label width.
    pub consider_labels: bool,
    pub tolerance: f64,
}

impl Default for StressLayoutOptions {
    fn default() -> Self {
        Self {
            iterations: 300,
            node_node_spacing: 80.0,
            edge_node_spacing: 40.0,
            edge_edge_spacing: 20.0,
            consider_labels: true,
            tolerance: 1e-4,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Ranks flow top to bottom.
    #[default]
    TB,
    /// Ranks flow left to right.
    LR,
}

impl std::str::FromStr for Direction {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TB" | "TD" => Ok(Self::TB),
            "LR" => Ok(Self::LR),
            other => Err(LayoutError::InvalidOptions {
                message: format!("unknown hierarchical direction `{other}`"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HierarchicalOptions {
    pub direction: Direction,
    pub rank_sep: f64,
    pub node_sep: f64,
    /// Number of barycenter sweeps used for crossing reduction.
    pub sweeps: usize,
}

impl Default for HierarchicalOptions {
    fn default() -> Self {
        Self {
            direction: Direction::TB,
            rank_sep: 120.0,
            node_sep: 60.0,
            sweeps: 8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForceOptions {
    pub iterations: usize,
    /// Pull toward the canvas center, as a fraction of the distance per step.
    pub gravity: f64,
    /// Maximum step length of the first iteration; defaults to a tenth of the smaller canvas
    /// side.
    pub initial_temperature: Option<f64>,
}

impl Default for ForceOptions {
    fn default() -> Self {
        Self {
            iterations: 300,
            gravity: 0.05,
            initial_temperature: None,
        }
    }
}

impl LayoutOptions {
    pub fn with_canvas(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Resolves a [`LayoutConfig`] on top of the defaults. Missing keys keep their default; keys
    /// of the wrong type are reported.
    pub fn from_config(config: &LayoutConfig) -> Result<Self> {
        let mut out = Self::default();

        if let Some(v) = config.require_f64("width")? {
            out.width = v;
        }
        if let Some(v) = config.require_f64("height")? {
            out.height = v;
        }

        if let Some(v) = config.require_f64("circular.radius")? {
            out.circular.radius = Some(v);
        }
        if let Some(v) = config.require_f64("circular.startAngle")? {
            out.circular.start_angle = v;
        }
        if let Some(v) = config.require_bool("circular.sortByDegree")? {
            out.circular.sort_by_degree = v;
        }
        if let Some(v) = config.require_f64("circular.ringGap")? {
            out.circular.ring_gap = v;
        }

        if let Some(v) = config.require_u64("stress.iterations")? {
            out.stress.iterations = v as usize;
        }
        if let Some(v) = config.require_f64("stress.nodeNodeSpacing")? {
            out.stress.node_node_spacing = v;
        }
        if let Some(v) = config.require_f64("stress.edgeNodeSpacing")? {
            out.stress.edge_node_spacing = v;
        }
        if let Some(v) = config.require_f64("stress.edgeEdgeSpacing")? {
            out.stress.edge_edge_spacing = v;
        }
        if let Some(v) = config.require_bool("stress.considerLabels")? {
            out.stress.consider_labels = v;
        }
        if let Some(v) = config.require_f64("stress.tolerance")? {
            out.stress.tolerance = v;
        }

        if let Some(v) = config.require_str("hierarchical.direction")? {
            out.hierarchical.direction = v.parse()?;
        }
        if let Some(v) = config.require_f64("hierarchical.rankSep")? {
            out.hierarchical.rank_sep = v;
        }
        if let Some(v) = config.require_f64("hierarchical.nodeSep")? {
            out.hierarchical.node_sep = v;
        }
        if let Some(v) = config.require_u64("hierarchical.sweeps")? {
            out.hierarchical.sweeps = v as usize;
        }

        if let Some(v) = config.require_u64("force.iterations")? {
            out.force.iterations = v as usize;
        }
        if let Some(v) = config.require_f64("force.gravity")? {
            out.force.gravity = v;
        }
        if let Some(v) = config.require_f64("force.initialTemperature")? {
            out.force.initial_temperature = Some(v);
        }

        out.validate()?;
        Ok(out)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [("width", self.width), ("height", self.height)];
        for (name, v) in positive {
            if !(v.is_finite() && v > 0.0) {
                return Err(invalid(name, v));
            }
        }
        if let Some(r) = self.circular.radius {
            if !(r.is_finite() && r >= 0.0) {
                return Err(invalid("circular.radius", r));
            }
        }
        let non_negative = [
            ("circular.ringGap", self.circular.ring_gap),
            ("stress.nodeNodeSpacing", self.stress.node_node_spacing),
            ("stress.edgeNodeSpacing", self.stress.edge_node_spacing),
            ("stress.edgeEdgeSpacing", self.stress.edge_edge_spacing),
            ("stress.tolerance", self.stress.tolerance),
            ("hierarchical.rankSep", self.hierarchical.rank_sep),
            ("hierarchical.nodeSep", self.hierarchical.node_sep),
            ("force.gravity", self.force.gravity),
        ];
        for (name, v) in non_negative {
            if !(v.is_finite() && v >= 0.0) {
                return Err(invalid(name, v));
            }
        }
        if !self.circular.start_angle.is_finite() {
            return Err(invalid("circular.startAngle", self.circular.start_angle));
        }
        if let Some(t) = self.force.initial_temperature {
            if !(t.is_finite() && t > 0.0) {
                return Err(invalid("force.initialTemperature", t));
            }
        }
        Ok(())
    }
}

fn invalid(name: &str, value: f64) -> LayoutError {
    LayoutError::InvalidOptions {
        message: format!("`{name}` is out of range: {value}"),
    }
}
