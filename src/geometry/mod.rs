//! Typed geometry for the supported shape kinds.

mod extract;
mod path_data;

pub use extract::extract;
pub use path_data::{parse_path_data, segment_data};

use serde::Serialize;

use crate::rules::ShapeKind;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RectGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RectGeometry {
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Elliptical arc as described by Inkscape's `sodipodi:*` attributes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArcGeometry {
    pub center_x: f64,
    pub center_y: f64,
    pub radius_x: f64,
    pub radius_y: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl ArcGeometry {
    #[must_use]
    pub fn diameter_x(&self) -> f64 {
        self.radius_x * 2.0
    }

    #[must_use]
    pub fn diameter_y(&self) -> f64 {
        self.radius_y * 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PathGeometry {
    pub start: Point,
    pub end: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ShapeGeometry {
    Rect(RectGeometry),
    Arc(ArcGeometry),
    Path(PathGeometry),
}

impl ShapeGeometry {
    #[must_use]
    pub const fn kind(&self) -> ShapeKind {
        match self {
            Self::Rect(_) => ShapeKind::Rect,
            Self::Arc(_) => ShapeKind::Arc,
            Self::Path(_) => ShapeKind::Path,
        }
    }
}

/// Values at or above this magnitude are printed without rounding.
const ROUNDING_LIMIT: f64 = 1e5;

/// Format a coordinate for writing back into a document.
///
/// Values are rounded to 10 decimal places so that float noise such as
/// `3.8100000000000005` prints as `3.81`. Negative zero prints as `0`.
#[must_use]
pub fn format_number(value: f64) -> String {
    let rounded = if value.abs() < ROUNDING_LIMIT {
        (value * 1e10).round() / 1e10
    } else {
        value
    };
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{rounded}")
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
