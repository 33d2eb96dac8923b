use std::fmt;

use serde::Serialize;

use super::classify::{Classification, classify, grid_deviation, snap_to_grid};
use crate::geometry::{ArcGeometry, PathGeometry, RectGeometry, ShapeGeometry};
use crate::rules::{GroupRule, Tolerance};

/// A measured quantity of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckName {
    Width,
    Height,
    StartAngle,
    EndAngle,
    DiameterX,
    DiameterY,
    CenterX,
    CenterY,
    StartX,
    StartY,
    EndX,
    EndY,
}

impl CheckName {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Width => "width",
            Self::Height => "height",
            Self::StartAngle => "start_angle",
            Self::EndAngle => "end_angle",
            Self::DiameterX => "diameter_x",
            Self::DiameterY => "diameter_y",
            Self::CenterX => "center_x",
            Self::CenterY => "center_y",
            Self::StartX => "start_x",
            Self::StartY => "start_y",
            Self::EndX => "end_x",
            Self::EndY => "end_y",
        }
    }
}

impl fmt::Display for CheckName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict for one quantity of one element.
///
/// For position checks `expected` is the snapped coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CheckOutcome {
    pub check: CheckName,
    pub actual: f64,
    pub expected: f64,
    pub deviation: f64,
    pub classification: Classification,
}

impl CheckOutcome {
    /// Compare a size or angle against its nominal value.
    #[must_use]
    pub fn nominal(check: CheckName, actual: f64, expected: f64, tolerance: &Tolerance) -> Self {
        let deviation = (actual - expected).abs();
        Self {
            check,
            actual,
            expected,
            deviation,
            classification: classify(deviation, expected, tolerance),
        }
    }

    /// Compare a coordinate against the nearest grid line.
    #[must_use]
    pub fn grid(check: CheckName, actual: f64, grid: f64, tolerance: &Tolerance) -> Self {
        let deviation = grid_deviation(actual, grid);
        Self {
            check,
            actual,
            expected: snap_to_grid(actual, grid),
            deviation,
            classification: classify(deviation, grid, tolerance),
        }
    }
}

/// Evaluate every quantity the group rule constrains, in a fixed order per
/// shape kind.
#[must_use]
pub fn evaluate(
    geometry: &ShapeGeometry,
    rule: &GroupRule,
    tolerance: &Tolerance,
) -> Vec<CheckOutcome> {
    match geometry {
        ShapeGeometry::Rect(rect) => evaluate_rect(rect, rule, tolerance),
        ShapeGeometry::Arc(arc) => evaluate_arc(arc, rule, tolerance),
        ShapeGeometry::Path(path) => evaluate_path(path, rule, tolerance),
    }
}

fn evaluate_rect(rect: &RectGeometry, rule: &GroupRule, tol: &Tolerance) -> Vec<CheckOutcome> {
    let mut outcomes = Vec::with_capacity(4);
    if let Some(size) = rule.size {
        outcomes.push(CheckOutcome::nominal(CheckName::Width, rect.width, size.width, tol));
        outcomes.push(CheckOutcome::nominal(CheckName::Height, rect.height, size.height, tol));
    }
    if let Some(grid) = rule.grid {
        let center = rect.center();
        outcomes.push(CheckOutcome::grid(CheckName::CenterX, center.x, grid.x, tol));
        outcomes.push(CheckOutcome::grid(CheckName::CenterY, center.y, grid.y, tol));
    }
    outcomes
}

fn evaluate_arc(arc: &ArcGeometry, rule: &GroupRule, tol: &Tolerance) -> Vec<CheckOutcome> {
    let angles = rule.arc_spec().unwrap_or_default();
    let mut outcomes = vec![
        CheckOutcome::nominal(CheckName::StartAngle, arc.start_angle, angles.start, tol),
        CheckOutcome::nominal(CheckName::EndAngle, arc.end_angle, angles.end, tol),
    ];
    if let Some(size) = rule.size {
        outcomes.push(CheckOutcome::nominal(
            CheckName::DiameterX,
            arc.diameter_x(),
            size.width,
            tol,
        ));
        outcomes.push(CheckOutcome::nominal(
            CheckName::DiameterY,
            arc.diameter_y(),
            size.height,
            tol,
        ));
    }
    if let Some(grid) = rule.grid {
        outcomes.push(CheckOutcome::grid(CheckName::CenterX, arc.center_x, grid.x, tol));
        outcomes.push(CheckOutcome::grid(CheckName::CenterY, arc.center_y, grid.y, tol));
    }
    outcomes
}

fn evaluate_path(path: &PathGeometry, rule: &GroupRule, tol: &Tolerance) -> Vec<CheckOutcome> {
    let Some(grid) = rule.grid else {
        return Vec::new();
    };
    vec![
        CheckOutcome::grid(CheckName::StartX, path.start.x, grid.x, tol),
        CheckOutcome::grid(CheckName::StartY, path.start.y, grid.y, tol),
        CheckOutcome::grid(CheckName::EndX, path.end.x, grid.x, tol),
        CheckOutcome::grid(CheckName::EndY, path.end.y, grid.y, tol),
    ]
}

/// Worst classification among `outcomes`, or `Ok` when empty.
#[must_use]
pub fn worst(outcomes: &[CheckOutcome]) -> Classification {
    outcomes
        .iter()
        .map(|o| o.classification)
        .max()
        .unwrap_or(Classification::Ok)
}

#[cfg(test)]
#[path = "checks_tests.rs"]
mod tests;
