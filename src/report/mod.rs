//! Per-document validation report.

use serde::Serialize;

use crate::checker::{CheckOutcome, Classification, worst};
use crate::correction::CorrectedGeometry;
use crate::rules::ShapeKind;

/// Overall state of one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementStatus {
    Ok,
    Fixable,
    Error,
    /// Geometry could not be extracted.
    Skipped,
}

impl From<Classification> for ElementStatus {
    fn from(classification: Classification) -> Self {
        match classification {
            Classification::Ok => Self::Ok,
            Classification::Fixable => Self::Fixable,
            Classification::Error => Self::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementResult {
    pub id: String,
    pub kind: ShapeKind,
    pub status: ElementStatus,
    pub checks: Vec<CheckOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrected: Option<CorrectedGeometry>,
}

impl ElementResult {
    #[must_use]
    pub fn checked(id: impl Into<String>, kind: ShapeKind, checks: Vec<CheckOutcome>) -> Self {
        Self {
            id: id.into(),
            kind,
            status: worst(&checks).into(),
            checks,
            extraction_error: None,
            corrected: None,
        }
    }

    #[must_use]
    pub fn skipped(id: impl Into<String>, kind: ShapeKind, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            status: ElementStatus::Skipped,
            checks: Vec::new(),
            extraction_error: Some(message.into()),
            corrected: None,
        }
    }

    /// Checks that are not OK.
    pub fn issues(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.checks
            .iter()
            .filter(|c| c.classification != Classification::Ok)
    }
}

/// Element counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub total: usize,
    pub ok: usize,
    pub fixable: usize,
    pub errors: usize,
    pub skipped: usize,
}

impl StatusCounts {
    pub fn record(&mut self, status: ElementStatus) {
        self.total += 1;
        match status {
            ElementStatus::Ok => self.ok += 1,
            ElementStatus::Fixable => self.fixable += 1,
            ElementStatus::Error => self.errors += 1,
            ElementStatus::Skipped => self.skipped += 1,
        }
    }

    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        Self {
            total: self.total + other.total,
            ok: self.ok + other.ok,
            fixable: self.fixable + other.fixable,
            errors: self.errors + other.errors,
            skipped: self.skipped + other.skipped,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupReport {
    pub name: String,
    pub kind: ShapeKind,
    /// Whether any group in the document carried this name.
    pub found: bool,
    pub elements: Vec<ElementResult>,
}

impl GroupReport {
    #[must_use]
    pub fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for element in &self.elements {
            counts.record(element.status);
        }
        counts
    }
}

/// An element matched by several group rules whose corrections disagree.
///
/// The element is left unchanged in the corrected output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorrectionConflict {
    pub element: String,
    pub groups: Vec<String>,
}

/// How a document's run ended, in order of precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportOutcome {
    ErrorsDetected,
    PartiallyCorrected,
    Corrected,
    FixableFound,
    Passed,
}

impl ReportOutcome {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ErrorsDetected => "ERRORS DETECTED — no output produced",
            Self::PartiallyCorrected => "fixable issues corrected except conflicting elements",
            Self::Corrected => "all fixable issues corrected",
            Self::FixableFound => "fixable issues found; pass --output to correct",
            Self::Passed => "all checks passed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignmentReport {
    pub document: String,
    pub groups: Vec<GroupReport>,
    pub warnings: Vec<String>,
    pub conflicts: Vec<CorrectionConflict>,
    /// Set when fixing was requested and no ERROR blocked it.
    pub corrections_applied: bool,
}

impl AlignmentReport {
    #[must_use]
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            groups: Vec::new(),
            warnings: Vec::new(),
            conflicts: Vec::new(),
            corrections_applied: false,
        }
    }

    #[must_use]
    pub fn counts(&self) -> StatusCounts {
        self.groups
            .iter()
            .map(GroupReport::counts)
            .fold(StatusCounts::default(), StatusCounts::merge)
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.counts().errors > 0
    }

    #[must_use]
    pub fn has_fixable(&self) -> bool {
        self.counts().fixable > 0
    }

    #[must_use]
    pub fn outcome(&self) -> ReportOutcome {
        if self.has_errors() {
            ReportOutcome::ErrorsDetected
        } else if self.corrections_applied && !self.conflicts.is_empty() {
            ReportOutcome::PartiallyCorrected
        } else if self.corrections_applied && self.has_fixable() {
            ReportOutcome::Corrected
        } else if self.has_fixable() {
            ReportOutcome::FixableFound
        } else {
            ReportOutcome::Passed
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
