//! Layout geometry primitives
//!
//! Everything is measured in host-independent layout units. The host decides
//! what a unit is (pixels, logical points, terminal cells).

use serde::{Deserialize, Serialize};

/// A point in layout space
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component of this point along an axis
    #[inline]
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }
}

/// Rectangle for layout calculations
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }

    pub fn contains_point(&self, point: Point) -> bool {
        self.contains(point.x, point.y)
    }

    /// Size along the given axis (width for horizontal, height for vertical)
    #[inline]
    pub fn extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Sub-rectangle starting `offset` units along `axis`, `size` units long,
    /// spanning the full cross extent
    pub fn slice(&self, axis: Axis, offset: f32, size: f32) -> Rect {
        match axis {
            Axis::Horizontal => Rect::new(self.x + offset, self.y, size, self.height),
            Axis::Vertical => Rect::new(self.x, self.y + offset, self.width, size),
        }
    }

    /// The centered rectangle covering `fraction` of this one on both axes.
    ///
    /// `inset(0.8)` leaves a 10% margin on every side.
    pub fn inset(&self, fraction: f32) -> Rect {
        let margin_x = self.width * (1.0 - fraction) / 2.0;
        let margin_y = self.height * (1.0 - fraction) / 2.0;
        Rect::new(
            self.x + margin_x,
            self.y + margin_y,
            self.width - 2.0 * margin_x,
            self.height - 2.0 * margin_y,
        )
    }

    /// Whether the point is inside this rect but within `threshold` of an edge
    pub fn near_edge(&self, point: Point, threshold: f32) -> bool {
        if !self.contains_point(point) {
            return false;
        }
        let dist_x = (point.x - self.x).min(self.right() - point.x);
        let dist_y = (point.y - self.y).min(self.bottom() - point.y);
        dist_x <= threshold || dist_y <= threshold
    }
}

/// Main axis of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Children arranged left-to-right
    #[serde(alias = "row")]
    Horizontal,
    /// Children arranged top-to-bottom
    #[serde(alias = "column")]
    Vertical,
}

impl Axis {
    /// Parse user input such as `h`, `horizontal`, `v`, `vertical`
    pub fn parse(input: &str) -> Option<Axis> {
        match input.trim().to_ascii_lowercase().as_str() {
            "h" | "horizontal" | "row" => Some(Axis::Horizontal),
            "v" | "vertical" | "column" => Some(Axis::Vertical),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Axis::Horizontal => "horizontal",
            Axis::Vertical => "vertical",
        }
    }
}
