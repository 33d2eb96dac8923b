use serde::Serialize;

use crate::error::Result;
use crate::report::{
    AlignmentReport, CorrectionConflict, ElementResult, GroupReport, ReportOutcome, StatusCounts,
};
use crate::rules::ShapeKind;

use super::OutputFormatter;

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    summary: Summary,
    documents: Vec<DocumentJson<'a>>,
}

#[derive(Serialize)]
struct Summary {
    documents: usize,
    documents_with_errors: usize,
    elements: StatusCounts,
}

#[derive(Serialize)]
struct DocumentJson<'a> {
    document: &'a str,
    outcome: ReportOutcome,
    corrections_applied: bool,
    counts: StatusCounts,
    warnings: &'a [String],
    conflicts: &'a [CorrectionConflict],
    groups: Vec<GroupJson<'a>>,
}

#[derive(Serialize)]
struct GroupJson<'a> {
    name: &'a str,
    kind: ShapeKind,
    found: bool,
    counts: StatusCounts,
    elements: &'a [ElementResult],
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, reports: &[AlignmentReport]) -> Result<String> {
        let documents: Vec<DocumentJson<'_>> = reports.iter().map(convert_report).collect();
        let elements = documents
            .iter()
            .map(|d| d.counts)
            .fold(StatusCounts::default(), StatusCounts::merge);

        let output = JsonOutput {
            summary: Summary {
                documents: reports.len(),
                documents_with_errors: reports.iter().filter(|r| r.has_errors()).count(),
                elements,
            },
            documents,
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}

fn convert_report(report: &AlignmentReport) -> DocumentJson<'_> {
    DocumentJson {
        document: &report.document,
        outcome: report.outcome(),
        corrections_applied: report.corrections_applied,
        counts: report.counts(),
        warnings: &report.warnings,
        conflicts: &report.conflicts,
        groups: report.groups.iter().map(convert_group).collect(),
    }
}

fn convert_group(group: &GroupReport) -> GroupJson<'_> {
    GroupJson {
        name: &group.name,
        kind: group.kind,
        found: group.found,
        counts: group.counts(),
        elements: &group.elements,
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
