use serde::{Deserialize, Serialize};

/// Top-left anchored canvas position, the convention used by the renderer and persistence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    pub fn half_height(&self) -> f64 {
        self.height / 2.0
    }

    /// Converts a center-anchored point into the top-left corner of a box of this size.
    pub fn top_left_from_center(&self, cx: f64, cy: f64) -> Position {
        Position::new(cx - self.half_width(), cy - self.half_height())
    }

    /// Center of a box of this size whose top-left corner sits at `pos`.
    pub fn center_of(&self, pos: Position) -> (f64, f64) {
        (pos.x + self.half_width(), pos.y + self.half_height())
    }
}
