//! Correction of FIXABLE deviations.
//!
//! [`correct`] derives new geometry from the check outcomes without touching
//! the document; [`write_back`] turns the difference between the original and
//! corrected geometry into attribute edits.

use serde::Serialize;

use crate::checker::{CheckName, CheckOutcome};
use crate::document::{AttrName, AttributeEdit, ShapeElement};
use crate::geometry::{
    ArcGeometry, PathGeometry, Point, RectGeometry, ShapeGeometry, format_number, segment_data,
};

/// Geometry after correction, plus the quantities that were rewritten.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrectedGeometry {
    pub geometry: ShapeGeometry,
    pub corrected: Vec<CheckName>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Correction {
    /// Every quantity is within the acceptable tolerance.
    Unchanged,
    /// At least one quantity is an ERROR; the element must not be touched.
    Vetoed,
    Corrected(CorrectedGeometry),
}

/// Target value for `check` if it was classified FIXABLE.
fn fixable_target(outcomes: &[CheckOutcome], check: CheckName) -> Option<f64> {
    outcomes
        .iter()
        .find(|o| o.check == check && o.classification.is_fixable())
        .map(|o| o.expected)
}

/// Compute corrected geometry for one element.
///
/// Sizes and angles are fixed before positions, so a rectangle's new anchor
/// is derived from its corrected size. Quantities that are already OK keep
/// their exact values.
#[must_use]
pub fn correct(geometry: &ShapeGeometry, outcomes: &[CheckOutcome]) -> Correction {
    if outcomes.iter().any(|o| o.classification.is_error()) {
        return Correction::Vetoed;
    }
    let corrected: Vec<CheckName> = outcomes
        .iter()
        .filter(|o| o.classification.is_fixable())
        .map(|o| o.check)
        .collect();
    if corrected.is_empty() {
        return Correction::Unchanged;
    }

    let target = |check| fixable_target(outcomes, check);
    let geometry = match geometry {
        ShapeGeometry::Rect(rect) => ShapeGeometry::Rect(correct_rect(rect, target)),
        ShapeGeometry::Arc(arc) => ShapeGeometry::Arc(correct_arc(arc, target)),
        ShapeGeometry::Path(path) => ShapeGeometry::Path(correct_path(path, target)),
    };
    Correction::Corrected(CorrectedGeometry {
        geometry,
        corrected,
    })
}

fn correct_rect(rect: &RectGeometry, target: impl Fn(CheckName) -> Option<f64>) -> RectGeometry {
    let width = target(CheckName::Width).unwrap_or(rect.width);
    let height = target(CheckName::Height).unwrap_or(rect.height);
    let center = rect.center();

    let anchor = |origin: f64, old_size: f64, new_size: f64, center: f64, check| {
        let snapped = target(check);
        if snapped.is_none() && old_size.to_bits() == new_size.to_bits() {
            return origin;
        }
        snapped.unwrap_or(center) - new_size / 2.0
    };

    RectGeometry {
        x: anchor(rect.x, rect.width, width, center.x, CheckName::CenterX),
        y: anchor(rect.y, rect.height, height, center.y, CheckName::CenterY),
        width,
        height,
    }
}

fn correct_arc(arc: &ArcGeometry, target: impl Fn(CheckName) -> Option<f64>) -> ArcGeometry {
    ArcGeometry {
        start_angle: target(CheckName::StartAngle).unwrap_or(arc.start_angle),
        end_angle: target(CheckName::EndAngle).unwrap_or(arc.end_angle),
        radius_x: target(CheckName::DiameterX).map_or(arc.radius_x, |d| d / 2.0),
        radius_y: target(CheckName::DiameterY).map_or(arc.radius_y, |d| d / 2.0),
        center_x: target(CheckName::CenterX).unwrap_or(arc.center_x),
        center_y: target(CheckName::CenterY).unwrap_or(arc.center_y),
    }
}

fn correct_path(path: &PathGeometry, target: impl Fn(CheckName) -> Option<f64>) -> PathGeometry {
    PathGeometry {
        start: Point::new(
            target(CheckName::StartX).unwrap_or(path.start.x),
            target(CheckName::StartY).unwrap_or(path.start.y),
        ),
        end: Point::new(
            target(CheckName::EndX).unwrap_or(path.end.x),
            target(CheckName::EndY).unwrap_or(path.end.y),
        ),
    }
}

/// Translate corrected geometry into edits on `element`.
///
/// Only attributes whose value changed are emitted. Paths are rewritten as a
/// single normalized segment; `axis_tolerance` decides when that segment is
/// written as vertical or horizontal.
#[must_use]
pub fn write_back(
    element: &ShapeElement,
    original: &ShapeGeometry,
    corrected: &ShapeGeometry,
    axis_tolerance: f64,
) -> Vec<AttributeEdit> {
    if let (ShapeGeometry::Path(before), ShapeGeometry::Path(after)) = (original, corrected) {
        if before == after {
            return Vec::new();
        }
        let data = segment_data(after.start, after.end, axis_tolerance);
        return vec![element.set_attribute(AttrName::plain("d"), data)];
    }

    let mut edits = Vec::new();
    let mut set = |name: AttrName, before: f64, after: f64| {
        if before.to_bits() != after.to_bits() {
            edits.push(element.set_attribute(name, format_number(after)));
        }
    };
    match (original, corrected) {
        (ShapeGeometry::Rect(before), ShapeGeometry::Rect(after)) => {
            set(AttrName::plain("x"), before.x, after.x);
            set(AttrName::plain("y"), before.y, after.y);
            set(AttrName::plain("width"), before.width, after.width);
            set(AttrName::plain("height"), before.height, after.height);
        }
        (ShapeGeometry::Arc(before), ShapeGeometry::Arc(after)) => {
            set(AttrName::sodipodi("cx"), before.center_x, after.center_x);
            set(AttrName::sodipodi("cy"), before.center_y, after.center_y);
            set(AttrName::sodipodi("rx"), before.radius_x, after.radius_x);
            set(AttrName::sodipodi("ry"), before.radius_y, after.radius_y);
            set(AttrName::sodipodi("start"), before.start_angle, after.start_angle);
            set(AttrName::sodipodi("end"), before.end_angle, after.end_angle);
        }
        _ => {
            tracing::warn!(
                element = %element.id,
                "corrected geometry kind does not match original"
            );
        }
    }
    edits
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
