use std::io::Write;

use crate::checker::CheckOutcome;
use crate::error::Result;
use crate::geometry::format_number;
use crate::report::{AlignmentReport, ElementResult, ElementStatus, GroupReport, ReportOutcome};

use super::{ColorMode, OutputFormatter, ansi, is_no_color_set};

pub struct TextFormatter {
    use_colors: bool,
    verbose: u8,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self::with_verbose(mode, 0)
    }

    /// With `verbose >= 1`, OK elements are listed too.
    #[must_use]
    pub fn with_verbose(mode: ColorMode, verbose: u8) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
            verbose,
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                !is_no_color_set() && std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    const fn status_label(status: ElementStatus) -> (&'static str, &'static str) {
        match status {
            ElementStatus::Ok => ("[OK]", ansi::GREEN),
            ElementStatus::Fixable => ("[FIXABLE]", ansi::YELLOW),
            ElementStatus::Error => ("[ERROR]", ansi::RED),
            ElementStatus::Skipped => ("[SKIPPED]", ansi::CYAN),
        }
    }

    fn format_check(check: &CheckOutcome, output: &mut Vec<u8>) {
        writeln!(
            output,
            "    - {}={} (expected: {})",
            check.check,
            format_number(check.actual),
            format_number(check.expected)
        )
        .ok();
    }

    fn format_element(&self, element: &ElementResult, output: &mut Vec<u8>) {
        if element.status == ElementStatus::Ok && self.verbose == 0 {
            return;
        }
        let (label, color) = Self::status_label(element.status);
        let label = self.colorize(label, color);

        if let Some(message) = &element.extraction_error {
            writeln!(output, "  {label} {}: {message}", element.id).ok();
            return;
        }
        writeln!(output, "  {label} {}", element.id).ok();
        for check in element.issues() {
            Self::format_check(check, output);
        }
    }

    fn format_group(&self, group: &GroupReport, output: &mut Vec<u8>) {
        writeln!(output, "Group: {} ({})", group.name, group.kind).ok();
        if !group.found {
            let warning = format!("warning: group '{}' not found", group.name);
            writeln!(output, "  {}", self.colorize(&warning, ansi::YELLOW)).ok();
            return;
        }

        let counts = group.counts();
        write!(
            output,
            "  OK: {}, Fixable: {}, Errors: {}",
            counts.ok, counts.fixable, counts.errors
        )
        .ok();
        if counts.skipped > 0 {
            write!(output, ", Skipped: {}", counts.skipped).ok();
        }
        writeln!(output).ok();

        for element in &group.elements {
            self.format_element(element, output);
        }
    }

    fn format_report(&self, report: &AlignmentReport, output: &mut Vec<u8>) {
        let counts = report.counts();
        writeln!(output, "File: {}", report.document).ok();
        writeln!(output, "Total elements checked: {}", counts.total).ok();
        writeln!(output, "Errors: {}", counts.errors).ok();
        writeln!(output, "Fixable: {}", counts.fixable).ok();

        for group in &report.groups {
            writeln!(output).ok();
            self.format_group(group, output);
        }

        if !report.conflicts.is_empty() {
            writeln!(output).ok();
        }
        for conflict in &report.conflicts {
            let groups: Vec<String> = conflict.groups.iter().map(|g| format!("'{g}'")).collect();
            let message = format!(
                "conflict: element '{}' matched by groups {} has incompatible corrections; left unchanged",
                conflict.element,
                groups.join(", ")
            );
            writeln!(output, "{}", self.colorize(&message, ansi::YELLOW)).ok();
        }

        let outcome = report.outcome();
        let color = match outcome {
            ReportOutcome::ErrorsDetected => ansi::RED,
            ReportOutcome::FixableFound | ReportOutcome::PartiallyCorrected => ansi::YELLOW,
            ReportOutcome::Corrected | ReportOutcome::Passed => ansi::GREEN,
        };
        writeln!(output).ok();
        writeln!(output, "{}", self.colorize(outcome.message(), color)).ok();
    }

    fn format_summary(&self, reports: &[AlignmentReport]) -> String {
        let with_errors = reports.iter().filter(|r| r.has_errors()).count();
        let with_fixable = reports
            .iter()
            .filter(|r| !r.has_errors() && r.has_fixable())
            .count();
        let passed = reports.len() - with_errors - with_fixable;

        let passed_str = self.colorize(&passed.to_string(), ansi::GREEN);
        let fixable_str = self.colorize(&with_fixable.to_string(), ansi::YELLOW);
        let errors_str = self.colorize(&with_errors.to_string(), ansi::RED);
        format!(
            "{}Summary:{} {} documents checked, {passed_str} clean, {fixable_str} fixable, {errors_str} with errors",
            if self.use_colors { ansi::BOLD } else { "" },
            if self.use_colors { ansi::RESET } else { "" },
            reports.len()
        )
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, reports: &[AlignmentReport]) -> Result<String> {
        let mut output = Vec::new();

        for (i, report) in reports.iter().enumerate() {
            if i > 0 {
                writeln!(output).ok();
            }
            self.format_report(report, &mut output);
        }

        if reports.len() > 1 {
            writeln!(output).ok();
            writeln!(output, "{}", self.format_summary(reports)).ok();
        }

        Ok(String::from_utf8_lossy(&output).to_string())
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
