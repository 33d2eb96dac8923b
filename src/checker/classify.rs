use std::fmt;

use serde::Serialize;

use crate::rules::Tolerance;

/// Three-tier verdict for a single measured quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Ok,
    Fixable,
    Error,
}

impl Classification {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Fixable => "FIXABLE",
            Self::Error => "ERROR",
        }
    }

    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(self, Self::Error)
    }

    #[must_use]
    pub const fn is_fixable(self) -> bool {
        matches!(self, Self::Fixable)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a deviation against the tolerance pair.
///
/// `expected` is the nominal value for size and angle checks, or the grid
/// unit for position checks. The ERROR bound is `|expected| * error_threshold`;
/// when `expected` is zero the bound collapses to `acceptable`, so any
/// deviation above `acceptable` is an error.
#[must_use]
pub fn classify(deviation: f64, expected: f64, tolerance: &Tolerance) -> Classification {
    if deviation <= tolerance.acceptable {
        return Classification::Ok;
    }
    let bound = if expected == 0.0 {
        tolerance.acceptable
    } else {
        expected.abs() * tolerance.error_threshold
    };
    if deviation > bound {
        Classification::Error
    } else {
        Classification::Fixable
    }
}

/// Distance from `value` to the nearest multiple of `grid`.
#[must_use]
pub fn grid_deviation(value: f64, grid: f64) -> f64 {
    let remainder = value.rem_euclid(grid);
    remainder.min(grid - remainder)
}

/// Nearest multiple of `grid`.
#[must_use]
pub fn snap_to_grid(value: f64, grid: f64) -> f64 {
    (value / grid).round() * grid
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
