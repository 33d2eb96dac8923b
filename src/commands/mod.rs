pub mod check;
pub mod init;
pub mod rules;

pub use check::{run_check, run_check_impl};
pub use init::{generate_rule_template, run_init, run_init_impl};
pub use rules::{format_rule_text, run_rules};

use std::path::Path;

use crate::Result;
use crate::cli::ColorChoice;
use crate::output::ColorMode;
use crate::rules::{AlignmentRule, FileRuleLoader, RuleLoader};

#[must_use]
pub const fn color_choice_to_mode(choice: ColorChoice) -> ColorMode {
    match choice {
        ColorChoice::Auto => ColorMode::Auto,
        ColorChoice::Always => ColorMode::Always,
        ColorChoice::Never => ColorMode::Never,
    }
}

/// Load the rule file at `path`, or the local `.svg-align.toml`.
///
/// # Errors
/// Returns an error if the file is missing, unreadable or invalid.
pub fn load_rule(path: Option<&Path>) -> Result<AlignmentRule> {
    let loader = FileRuleLoader::new();
    match path {
        Some(path) => loader.load_from_path(path),
        None => loader.load(),
    }
}

/// Hint printed below a rule loading error.
#[must_use]
pub const fn rule_error_hint(error: &crate::SvgAlignError) -> Option<&'static str> {
    match error {
        crate::SvgAlignError::RuleNotFound(_) => {
            Some("run `svg-align init` to create a rule file, or pass --rule")
        }
        _ => None,
    }
}
