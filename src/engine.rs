//! Single-document validation pipeline.

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::checker::{Classification, evaluate, worst};
use crate::correction::{CorrectedGeometry, Correction, correct, write_back};
use crate::document::{AttributeEdit, ShapeElement, SvgDocument, locate_group_elements};
use crate::error::Result;
use crate::geometry::{ShapeGeometry, extract};
use crate::report::{
    AlignmentReport, CorrectionConflict, ElementResult, ElementStatus, GroupReport,
};
use crate::rules::{AlignmentRule, GroupRule, Tolerance};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Produce corrected document text when no ERROR is found.
    pub fix: bool,
}

#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    pub report: AlignmentReport,
    /// Corrected source text. `Some` only when fixing was requested and the
    /// document has no ERROR-classified quantity.
    pub corrected: Option<String>,
}

/// An element awaiting correction once the whole document is known to be
/// free of errors.
///
/// One element can be matched by several group rules (nested groups with
/// rules of the same kind); `results` holds every `(group, element)` report
/// slot it occupies. Report groups share their index with `rule.groups`.
struct PendingFix {
    element: ShapeElement,
    geometry: ShapeGeometry,
    results: Vec<(usize, usize)>,
    fixable: bool,
}

/// Validate every group rule against `document`.
///
/// # Errors
/// Returns `XmlParse` if the document is not well-formed. Malformed shapes
/// are reported as skipped elements, not errors.
pub fn validate_document(
    document: &SvgDocument,
    rule: &AlignmentRule,
    options: ValidationOptions,
) -> Result<ValidationOutcome> {
    let tree = document.parse()?;
    let mut report = AlignmentReport::new(document.id());
    let mut pending: IndexMap<usize, PendingFix> = IndexMap::new();

    for (group_index, group_rule) in rule.groups.iter().enumerate() {
        let matched = locate_group_elements(&tree, &group_rule.name, group_rule.shape);
        let found = matched.groups_found > 0;
        if !found {
            warn!(document = document.id(), group = %group_rule.name, "group not found");
            report
                .warnings
                .push(format!("group '{}' not found", group_rule.name));
        }

        let mut elements = Vec::with_capacity(matched.elements.len());
        for element in matched.elements {
            let (result, geometry) = check_element(&element, group_rule, &rule.tolerance);
            if let Some(geometry) = geometry {
                let fix = pending
                    .entry(element.insert_at)
                    .or_insert_with(|| PendingFix {
                        element,
                        geometry,
                        results: Vec::new(),
                        fixable: false,
                    });
                fix.results.push((group_index, elements.len()));
                fix.fixable |= result.status == ElementStatus::Fixable;
            }
            elements.push(result);
        }
        report.groups.push(GroupReport {
            name: group_rule.name.clone(),
            kind: group_rule.shape,
            found,
            elements,
        });
    }

    let corrected = if options.fix && !report.has_errors() {
        report.corrections_applied = true;
        let edits = apply_fixes(&mut report, rule, pending.into_values());
        Some(document.with_edits(&edits))
    } else {
        None
    };

    let counts = report.counts();
    info!(
        document = document.id(),
        elements = counts.total,
        errors = counts.errors,
        fixable = counts.fixable,
        skipped = counts.skipped,
        corrected = corrected.is_some(),
        "validated document"
    );

    Ok(ValidationOutcome { report, corrected })
}

fn check_element(
    element: &ShapeElement,
    rule: &GroupRule,
    tolerance: &Tolerance,
) -> (ElementResult, Option<ShapeGeometry>) {
    let geometry = match extract(element, rule.shape) {
        Ok(geometry) => geometry,
        Err(e) => {
            warn!(element = %element.id, group = %rule.name, error = %e, "skipping element");
            return (ElementResult::skipped(&element.id, rule.shape, e.to_string()), None);
        }
    };

    let checks = evaluate(&geometry, rule, tolerance);
    let result = ElementResult::checked(&element.id, rule.shape, checks);
    debug!(element = %element.id, group = %rule.name, status = ?result.status, "checked element");
    (result, Some(geometry))
}

/// Correct every pending element, record the corrected geometry in the
/// report and return the resulting edits.
///
/// An element matched by several rules is corrected once, and only when the
/// corrected geometry passes every rule that matched it. Otherwise it is left
/// unchanged and recorded as a conflict.
fn apply_fixes(
    report: &mut AlignmentReport,
    rule: &AlignmentRule,
    pending: impl Iterator<Item = PendingFix>,
) -> Vec<AttributeEdit> {
    let mut edits = Vec::new();
    for fix in pending.filter(|f| f.fixable) {
        let Some(corrected) = correct_element(report, &fix) else {
            continue;
        };

        if fix.results.len() > 1 && !satisfies_all(rule, &fix, &corrected.geometry) {
            let groups = fix
                .results
                .iter()
                .map(|&(group, _)| report.groups[group].name.clone())
                .collect();
            warn!(element = %fix.element.id, "conflicting corrections, element left unchanged");
            report.conflicts.push(CorrectionConflict {
                element: fix.element.id.clone(),
                groups,
            });
            continue;
        }

        let element_edits = write_back(
            &fix.element,
            &fix.geometry,
            &corrected.geometry,
            rule.tolerance.acceptable,
        );
        debug!(element = %fix.element.id, edits = element_edits.len(), "corrected element");
        edits.extend(element_edits);
        for &(group, index) in &fix.results {
            let result = &mut report.groups[group].elements[index];
            if result.status == ElementStatus::Fixable {
                result.corrected = Some(corrected.clone());
            }
        }
    }
    edits
}

/// Correction derived from the first rule that found the element FIXABLE.
fn correct_element(report: &AlignmentReport, fix: &PendingFix) -> Option<CorrectedGeometry> {
    let result = fix
        .results
        .iter()
        .map(|&(group, index)| &report.groups[group].elements[index])
        .find(|result| result.status == ElementStatus::Fixable)?;
    match correct(&fix.geometry, &result.checks) {
        Correction::Corrected(corrected) => Some(corrected),
        Correction::Unchanged | Correction::Vetoed => None,
    }
}

fn satisfies_all(rule: &AlignmentRule, fix: &PendingFix, geometry: &ShapeGeometry) -> bool {
    fix.results.iter().all(|&(group, _)| {
        let checks = evaluate(geometry, &rule.groups[group], &rule.tolerance);
        worst(&checks) == Classification::Ok
    })
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
