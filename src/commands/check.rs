use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use rayon::prelude::*;

use crate::cli::{CheckArgs, Cli};
use crate::document::{SvgDocument, write_document};
use crate::engine::{ValidationOptions, validate_document};
use crate::output::{print_error, print_warning};
use crate::report::AlignmentReport;
use crate::rules::AlignmentRule;
use crate::scanner::{DirectoryScanner, InputFile, SvgFilter, collect_inputs};
use crate::{EXIT_ALIGNMENT_ERRORS, EXIT_IO_ERROR, EXIT_SUCCESS, Result, SvgAlignError};

use super::{color_choice_to_mode, load_rule, rule_error_hint};

#[must_use]
pub fn run_check(args: &CheckArgs, cli: &Cli) -> i32 {
    match run_check_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            print_error(&e, rule_error_hint(&e));
            EXIT_IO_ERROR
        }
    }
}

/// Outcome of one input document.
struct DocumentRun {
    input: PathBuf,
    result: Result<AlignmentReport>,
}

impl DocumentRun {
    fn exit_code(&self) -> i32 {
        match &self.result {
            Err(_) => EXIT_IO_ERROR,
            Ok(report) if report.has_errors() => EXIT_ALIGNMENT_ERRORS,
            Ok(_) => EXIT_SUCCESS,
        }
    }
}

/// Validate every input and write the report.
///
/// Returns the highest exit code across documents.
///
/// # Errors
/// Returns an error if the rules cannot be loaded, an exclude pattern is
/// invalid, `--output` is used with several inputs, two inputs share an
/// `--output-dir` target, or the report cannot be written. Per-document
/// failures are reported and reflected in the exit code.
pub fn run_check_impl(args: &CheckArgs, cli: &Cli) -> Result<i32> {
    let rule = load_rule(args.rule.as_deref())?;

    let scanner = DirectoryScanner::new(SvgFilter::new(&args.exclude)?);
    let inputs = collect_inputs(&args.inputs, &scanner)?;
    if inputs.is_empty() {
        if !cli.quiet {
            print_warning("no SVG files found");
        }
        return Ok(EXIT_SUCCESS);
    }
    if args.output.is_some() && inputs.len() > 1 {
        return Err(SvgAlignError::InvalidArgument(format!(
            "--output requires exactly one input document, found {}; use --output-dir",
            inputs.len()
        )));
    }
    if args.output_dir.is_some() {
        ensure_distinct_outputs(&inputs)?;
    }

    let options = ValidationOptions {
        fix: args.fix_requested(),
    };
    let runs: Vec<DocumentRun> = inputs
        .par_iter()
        .map(|input| DocumentRun {
            input: input.path.clone(),
            result: process_input(input, &rule, options, args),
        })
        .collect();

    let mut reports = Vec::with_capacity(runs.len());
    let mut exit_code = EXIT_SUCCESS;
    for run in runs {
        exit_code = exit_code.max(run.exit_code());
        match run.result {
            Ok(report) => reports.push(report),
            Err(e) => {
                tracing::error!(input = %run.input.display(), "document failed");
                print_error(&e, None);
            }
        }
    }

    let formatter = args
        .format
        .formatter(color_choice_to_mode(cli.color), cli.verbose);
    let mut output = formatter.format(&reports)?;
    if !output.is_empty() && !output.ends_with('\n') {
        output.push('\n');
    }
    emit_report(&output, args.report.as_deref())?;

    Ok(exit_code)
}

fn process_input(
    input: &InputFile,
    rule: &AlignmentRule,
    options: ValidationOptions,
    args: &CheckArgs,
) -> Result<AlignmentReport> {
    let document = SvgDocument::from_path(&input.path)?;
    let outcome = validate_document(&document, rule, options)?;

    if let Some(corrected) = &outcome.corrected
        && let Some(target) = output_path(input, args)
    {
        write_document(&target, corrected)?;
        tracing::info!(
            input = %input.path.display(),
            output = %target.display(),
            "wrote corrected document"
        );
    }
    Ok(outcome.report)
}

/// Reject inputs that would be written to the same file under `--output-dir`.
fn ensure_distinct_outputs(inputs: &[InputFile]) -> Result<()> {
    let mut seen: IndexMap<&Path, &Path> = IndexMap::with_capacity(inputs.len());
    for input in inputs {
        if let Some(first) = seen.insert(input.relative.as_path(), input.path.as_path()) {
            return Err(SvgAlignError::InvalidArgument(format!(
                "inputs '{}' and '{}' map to the same output path '{}'",
                first.display(),
                input.path.display(),
                input.relative.display()
            )));
        }
    }
    Ok(())
}

fn output_path(input: &InputFile, args: &CheckArgs) -> Option<PathBuf> {
    if let Some(output) = &args.output {
        return Some(output.clone());
    }
    args.output_dir.as_ref().map(|dir| dir.join(&input.relative))
}

fn emit_report(output: &str, report_path: Option<&Path>) -> Result<()> {
    match report_path {
        Some(path) => write_document(path, output),
        None => {
            print!("{output}");
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
