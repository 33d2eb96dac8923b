use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::output::OutputFormat;
use crate::rules::LOCAL_RULE_NAME;

/// Color output control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser, Debug)]
#[command(name = "svg-align")]
#[command(author, version, about = "Check SVG shapes against grid and size rules")]
#[command(long_about = "Validates that grouped shapes in SVG drawings sit on a physical grid \
    and have the expected dimensions, and optionally corrects small deviations.\n\n\
    Exit codes:\n  \
    0 - No errors (fixable issues may remain)\n  \
    1 - I/O or configuration error\n  \
    2 - Uncorrectable deviations found, no output produced")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate SVG files and optionally correct fixable deviations
    Check(CheckArgs),

    /// Generate a rule file template
    Init(InitArgs),

    /// Rule file utilities
    Rules(RulesArgs),
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// SVG files or directories to check
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Path to rule file (default: ./.svg-align.toml)
    #[arg(short, long)]
    pub rule: Option<PathBuf>,

    /// Write the corrected SVG here (single input only)
    #[arg(short, long, conflicts_with = "output_dir")]
    pub output: Option<PathBuf>,

    /// Write corrected SVGs into this directory, mirroring input layout
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Report format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Exclude patterns for directory inputs (glob syntax, repeatable)
    #[arg(long, short = 'x')]
    pub exclude: Vec<String>,
}

impl CheckArgs {
    /// Whether corrected output was requested.
    #[must_use]
    pub const fn fix_requested(&self) -> bool {
        self.output.is_some() || self.output_dir.is_some()
    }
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output path for the rule file
    #[arg(short, long, default_value = LOCAL_RULE_NAME)]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

#[derive(Parser, Debug)]
pub struct RulesArgs {
    #[command(subcommand)]
    pub action: RulesAction,
}

#[derive(Subcommand, Debug)]
pub enum RulesAction {
    /// Validate a rule file
    Validate {
        /// Path to rule file (default: ./.svg-align.toml)
        path: Option<PathBuf>,
    },

    /// Print the effective rule set with defaults filled in
    Show {
        /// Path to rule file (default: ./.svg-align.toml)
        path: Option<PathBuf>,

        /// Output format [possible values: text, json]
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
