use super::{ArcGeometry, PathGeometry, RectGeometry, ShapeGeometry, parse_path_data};
use crate::document::{AttrName, ShapeElement};
use crate::error::{Result, SvgAlignError};
use crate::rules::{DEFAULT_ARC_END, DEFAULT_ARC_START, ShapeKind};

/// Convert a located element into geometry of the given kind.
///
/// # Errors
/// Returns `MalformedShape` when a required attribute is missing or not a
/// number, and `UnsupportedPathCommand` for curved path data.
pub fn extract(element: &ShapeElement, kind: ShapeKind) -> Result<ShapeGeometry> {
    match kind {
        ShapeKind::Rect => extract_rect(element).map(ShapeGeometry::Rect),
        ShapeKind::Arc => extract_arc(element).map(ShapeGeometry::Arc),
        ShapeKind::Path => extract_path(element).map(ShapeGeometry::Path),
    }
}

fn number(
    element: &ShapeElement,
    kind: ShapeKind,
    name: AttrName,
    default: Option<f64>,
) -> Result<f64> {
    let label = || match name.namespace {
        Some(_) => format!("sodipodi:{}", name.local),
        None => name.local.to_string(),
    };
    let Some(raw) = element.attribute(name) else {
        return default.ok_or_else(|| {
            SvgAlignError::malformed(
                &element.id,
                kind.as_str(),
                format!("missing '{}' attribute", label()),
            )
        });
    };
    let raw = raw.trim();
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            SvgAlignError::malformed(
                &element.id,
                kind.as_str(),
                format!("'{}' is not a number: '{raw}'", label()),
            )
        })
}

fn extract_rect(element: &ShapeElement) -> Result<RectGeometry> {
    let get =
        |local, default| number(element, ShapeKind::Rect, AttrName::plain(local), default);
    Ok(RectGeometry {
        x: get("x", Some(0.0))?,
        y: get("y", Some(0.0))?,
        width: get("width", None)?,
        height: get("height", None)?,
    })
}

fn extract_arc(element: &ShapeElement) -> Result<ArcGeometry> {
    let get =
        |local, default| number(element, ShapeKind::Arc, AttrName::sodipodi(local), default);
    Ok(ArcGeometry {
        center_x: get("cx", None)?,
        center_y: get("cy", None)?,
        radius_x: get("rx", None)?,
        radius_y: get("ry", None)?,
        start_angle: get("start", Some(DEFAULT_ARC_START))?,
        end_angle: get("end", Some(DEFAULT_ARC_END))?,
    })
}

fn extract_path(element: &ShapeElement) -> Result<PathGeometry> {
    let data = element
        .attribute(AttrName::plain("d"))
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| SvgAlignError::malformed(&element.id, "path", "missing 'd' attribute"))?;
    parse_path_data(&element.id, data)
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;
