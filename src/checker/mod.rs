//! Deviation classification.

mod checks;
mod classify;

pub use checks::{CheckName, CheckOutcome, evaluate, worst};
pub use classify::{Classification, classify, grid_deviation, snap_to_grid};
