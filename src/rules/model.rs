use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default absolute deviation treated as "no issue" (mm or rad).
pub const DEFAULT_ACCEPTABLE: f64 = 0.001;

/// Default ratio of the expected value beyond which a deviation is uncorrectable.
pub const DEFAULT_ERROR_THRESHOLD: f64 = 0.1;

pub const DEFAULT_ARC_START: f64 = 0.0;
pub const DEFAULT_ARC_END: f64 = std::f64::consts::TAU;

// ============================================================================
// Validated rule model
// ============================================================================

/// The closed set of shape kinds a group rule can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rect,
    Arc,
    Path,
}

impl ShapeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Arc => "arc",
            Self::Path => "path",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "rect" => Ok(Self::Rect),
            "arc" => Ok(Self::Arc),
            "path" => Ok(Self::Path),
            _ => Err(format!(
                "unsupported shape type '{s}' (expected rect, arc or path)"
            )),
        }
    }
}

/// Grid spacing in physical units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub x: f64,
    pub y: f64,
}

/// Expected width/height. For arcs these are diameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeSpec {
    pub width: f64,
    pub height: f64,
}

/// Expected arc angles in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcSpec {
    pub start: f64,
    pub end: f64,
}

impl Default for ArcSpec {
    fn default() -> Self {
        Self {
            start: DEFAULT_ARC_START,
            end: DEFAULT_ARC_END,
        }
    }
}

/// Tolerance pair shared by every group.
///
/// `acceptable` is an absolute bound; `error_threshold` is a ratio of the
/// expected value (or grid unit).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    pub acceptable: f64,
    pub error_threshold: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            acceptable: DEFAULT_ACCEPTABLE,
            error_threshold: DEFAULT_ERROR_THRESHOLD,
        }
    }
}

/// Validation rules for one named group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRule {
    pub name: String,
    pub shape: ShapeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<SizeSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arc: Option<ArcSpec>,
}

impl GroupRule {
    #[must_use]
    pub fn new(name: impl Into<String>, shape: ShapeKind) -> Self {
        Self {
            name: name.into(),
            shape,
            grid: None,
            size: None,
            arc: None,
        }
    }

    #[must_use]
    pub const fn with_grid(mut self, x: f64, y: f64) -> Self {
        self.grid = Some(GridSpec { x, y });
        self
    }

    #[must_use]
    pub const fn with_size(mut self, width: f64, height: f64) -> Self {
        self.size = Some(SizeSpec { width, height });
        self
    }

    #[must_use]
    pub const fn with_arc(mut self, start: f64, end: f64) -> Self {
        self.arc = Some(ArcSpec { start, end });
        self
    }

    /// Expected angles for arc groups. Falls back to the full-ellipse default.
    ///
    /// Returns `None` for non-arc groups.
    #[must_use]
    pub fn arc_spec(&self) -> Option<ArcSpec> {
        match self.shape {
            ShapeKind::Arc => Some(self.arc.unwrap_or_default()),
            ShapeKind::Rect | ShapeKind::Path => None,
        }
    }
}

/// Complete, validated rule set. Read-only after load.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlignmentRule {
    pub groups: Vec<GroupRule>,
    pub tolerance: Tolerance,
}

// ============================================================================
// On-disk representation
// ============================================================================
//
// Every field is optional so that missing fields surface as rule format
// errors with a precise location instead of generic deserialization errors.

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleFile {
    #[serde(default)]
    pub groups: Vec<RawGroupRule>,
    #[serde(default)]
    pub tolerance: Option<RawTolerance>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawGroupRule {
    pub name: Option<String>,
    pub shape: Option<String>,
    pub grid: Option<RawGrid>,
    pub size: Option<RawSize>,
    pub arc: Option<RawArc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawGrid {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSize {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawArc {
    pub start: Option<f64>,
    pub end: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawTolerance {
    pub acceptable: Option<f64>,
    pub error_threshold: Option<f64>,
}
