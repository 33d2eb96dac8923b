//! Rule semantic validation.
//!
//! Converts the on-disk [`RuleFile`] into a validated [`AlignmentRule`],
//! applying defaults and rejecting missing, invalid or contradictory fields.

use crate::{Result, SvgAlignError};

use super::model::{
    AlignmentRule, ArcSpec, DEFAULT_ARC_END, DEFAULT_ARC_START, GridSpec, GroupRule, RawGroupRule,
    RawTolerance, RuleFile, ShapeKind, SizeSpec, Tolerance,
};

/// Build a validated rule set from a parsed rule file.
///
/// # Errors
/// Returns `RuleFormat` if a group lacks `name`/`shape`, names an unknown
/// shape, carries a section that contradicts its shape, or if any numeric
/// value is out of range.
pub fn build_rule(file: RuleFile) -> Result<AlignmentRule> {
    let tolerance = build_tolerance(file.tolerance);
    let groups = file
        .groups
        .into_iter()
        .enumerate()
        .map(|(i, raw)| build_group(i, raw))
        .collect::<Result<Vec<_>>>()?;

    let rule = AlignmentRule { groups, tolerance };
    validate_rule_semantics(&rule)?;
    Ok(rule)
}

/// Validate an already-constructed rule set.
///
/// # Errors
/// Returns `RuleFormat` describing the first violated constraint.
pub fn validate_rule_semantics(rule: &AlignmentRule) -> Result<()> {
    validate_tolerance(&rule.tolerance)?;
    for (i, group) in rule.groups.iter().enumerate() {
        validate_group(i, group)?;
    }
    Ok(())
}

fn build_tolerance(raw: Option<RawTolerance>) -> Tolerance {
    let defaults = Tolerance::default();
    raw.map_or(defaults, |raw| Tolerance {
        acceptable: raw.acceptable.unwrap_or(defaults.acceptable),
        error_threshold: raw.error_threshold.unwrap_or(defaults.error_threshold),
    })
}

fn build_group(index: usize, raw: RawGroupRule) -> Result<GroupRule> {
    let (Some(name), Some(shape)) = (raw.name, raw.shape) else {
        return Err(rule_error(format!(
            "groups[{index}]: each group must have 'name' and 'shape' fields"
        )));
    };
    let shape: ShapeKind = shape
        .parse()
        .map_err(|e: String| rule_error(format!("groups[{index}] ('{name}'): {e}")))?;

    let grid = raw
        .grid
        .map(|g| match (g.x, g.y) {
            (Some(x), Some(y)) => Ok(GridSpec { x, y }),
            _ => Err(rule_error(format!(
                "groups[{index}] ('{name}'): grid requires both 'x' and 'y'"
            ))),
        })
        .transpose()?;

    let size = raw
        .size
        .map(|s| match (s.width, s.height) {
            (Some(width), Some(height)) => Ok(SizeSpec { width, height }),
            _ => Err(rule_error(format!(
                "groups[{index}] ('{name}'): size requires both 'width' and 'height'"
            ))),
        })
        .transpose()?;

    let arc = raw.arc.map(|a| ArcSpec {
        start: a.start.unwrap_or(DEFAULT_ARC_START),
        end: a.end.unwrap_or(DEFAULT_ARC_END),
    });

    Ok(GroupRule {
        name,
        shape,
        grid,
        size,
        arc,
    })
}

fn validate_tolerance(tolerance: &Tolerance) -> Result<()> {
    if !tolerance.acceptable.is_finite() || tolerance.acceptable < 0.0 {
        return Err(rule_error(format!(
            "tolerance.acceptable must be a finite value >= 0, got {}",
            tolerance.acceptable
        )));
    }
    if !tolerance.error_threshold.is_finite() || tolerance.error_threshold <= 0.0 {
        return Err(rule_error(format!(
            "tolerance.error_threshold must be a finite value > 0, got {}",
            tolerance.error_threshold
        )));
    }
    Ok(())
}

fn validate_group(index: usize, group: &GroupRule) -> Result<()> {
    let name = &group.name;
    if name.trim().is_empty() {
        return Err(rule_error(format!("groups[{index}]: name must not be empty")));
    }

    if let Some(grid) = group.grid
        && !(is_positive(grid.x) && is_positive(grid.y))
    {
        return Err(rule_error(format!(
            "groups[{index}] ('{name}'): grid spacing must be finite and > 0, got x={}, y={}",
            grid.x, grid.y
        )));
    }

    if let Some(size) = group.size {
        if group.shape == ShapeKind::Path {
            return Err(rule_error(format!(
                "groups[{index}] ('{name}'): 'size' is not applicable to path groups"
            )));
        }
        if !(is_non_negative(size.width) && is_non_negative(size.height)) {
            return Err(rule_error(format!(
                "groups[{index}] ('{name}'): size must be finite and >= 0, got width={}, height={}",
                size.width, size.height
            )));
        }
    }

    if let Some(arc) = group.arc {
        if group.shape != ShapeKind::Arc {
            return Err(rule_error(format!(
                "groups[{index}] ('{name}'): 'arc' is only valid for arc groups, not {}",
                group.shape
            )));
        }
        if !(arc.start.is_finite() && arc.end.is_finite()) {
            return Err(rule_error(format!(
                "groups[{index}] ('{name}'): arc angles must be finite"
            )));
        }
    }

    Ok(())
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn rule_error(message: String) -> SvgAlignError {
    SvgAlignError::RuleFormat(message)
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
