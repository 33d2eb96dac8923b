use std::fmt::Write;
use std::path::Path;

use crate::cli::{Cli, RulesAction, RulesArgs};
use crate::geometry::format_number;
use crate::output::{OutputFormat, print_error};
use crate::rules::{AlignmentRule, LOCAL_RULE_NAME};
use crate::{EXIT_IO_ERROR, EXIT_SUCCESS, Result};

use super::{load_rule, rule_error_hint};

#[must_use]
pub fn run_rules(args: &RulesArgs, _cli: &Cli) -> i32 {
    let result = match &args.action {
        RulesAction::Validate { path } => run_rules_validate(path.as_deref()),
        RulesAction::Show { path, format } => run_rules_show(path.as_deref(), *format),
    };
    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            print_error(&e, rule_error_hint(&e));
            EXIT_IO_ERROR
        }
    }
}

fn run_rules_validate(path: Option<&Path>) -> Result<()> {
    let rule = load_rule(path)?;
    let shown = path.unwrap_or_else(|| Path::new(LOCAL_RULE_NAME));
    println!(
        "Rule file is valid: {} ({} groups)",
        shown.display(),
        rule.groups.len()
    );
    Ok(())
}

fn run_rules_show(path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let rule = load_rule(path)?;
    let output = match format {
        OutputFormat::Text => format_rule_text(&rule),
        OutputFormat::Json => serde_json::to_string_pretty(&rule)? + "\n",
    };
    print!("{output}");
    Ok(())
}

/// Render the effective rule set, with arc defaults filled in.
#[must_use]
pub fn format_rule_text(rule: &AlignmentRule) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Tolerance: acceptable {}, error threshold {}",
        format_number(rule.tolerance.acceptable),
        format_number(rule.tolerance.error_threshold)
    );
    let _ = writeln!(out, "Groups ({}):", rule.groups.len());
    for group in &rule.groups {
        let _ = writeln!(out, "  {} [{}]", group.name, group.shape);
        if let Some(grid) = group.grid {
            let _ = writeln!(
                out,
                "    grid: {} x {}",
                format_number(grid.x),
                format_number(grid.y)
            );
        }
        if let Some(size) = group.size {
            let _ = writeln!(
                out,
                "    size: {} x {}",
                format_number(size.width),
                format_number(size.height)
            );
        }
        if let Some(arc) = group.arc_spec() {
            let _ = writeln!(
                out,
                "    arc: {} .. {}",
                format_number(arc.start),
                format_number(arc.end)
            );
        }
    }
    out
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
