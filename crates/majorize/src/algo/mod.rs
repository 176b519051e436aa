pub mod overlap;
pub mod stress;

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct StressOptions {
    /// Upper bound on majorization sweeps.
    pub max_iterations: usize,
    /// Stop once the relative stress improvement of a sweep drops below this value.
    pub tolerance: f64,
    /// Ideal length for edges that do not carry their own.
    pub default_edge_length: f64,
    /// Minimum gap kept between node rectangles by the overlap-removal pass.
    pub node_spacing: f64,
    pub remove_overlaps: bool,
}

impl Default for StressOptions {
    fn default() -> Self {
        Self {
            max_iterations: 300,
            tolerance: 1e-4,
            default_edge_length: 200.0,
            node_spacing: 40.0,
            remove_overlaps: true,
        }
    }
}

impl StressOptions {
    pub fn validate(&self) -> Result<()> {
        if !(self.default_edge_length.is_finite() && self.default_edge_length > 0.0) {
            return Err(Error::InvalidOption {
                name: "default_edge_length",
                message: format!("expected a positive length, got {}", self.default_edge_length),
            });
        }
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(Error::InvalidOption {
                name: "tolerance",
                message: format!("expected a non-negative value, got {}", self.tolerance),
            });
        }
        if !(self.node_spacing.is_finite() && self.node_spacing >= 0.0) {
            return Err(Error::InvalidOption {
                name: "node_spacing",
                message: format!("expected a non-negative spacing, got {}", self.node_spacing),
            });
        }
        Ok(())
    }
}
