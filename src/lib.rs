pub mod checker;
pub mod cli;
pub mod commands;
pub mod correction;
pub mod document;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod output;
pub mod report;
pub mod rules;
pub mod scanner;

pub use error::{Result, SvgAlignError};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_IO_ERROR: i32 = 1;
pub const EXIT_ALIGNMENT_ERRORS: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
