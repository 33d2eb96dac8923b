use crate::cli::InitArgs;
use crate::document::write_document;
use crate::output::print_error;
use crate::{EXIT_IO_ERROR, EXIT_SUCCESS, Result, SvgAlignError};

#[must_use]
pub fn run_init(args: &InitArgs) -> i32 {
    match run_init_impl(args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            print_error(&e, None);
            EXIT_IO_ERROR
        }
    }
}

/// Writes a starter rule file.
///
/// # Errors
/// Returns an error if the file already exists (without --force) or cannot be written.
pub fn run_init_impl(args: &InitArgs) -> Result<()> {
    let output_path = &args.output;

    if output_path.exists() && !args.force {
        return Err(SvgAlignError::InvalidArgument(format!(
            "Rule file already exists: {}. Use --force to overwrite.",
            output_path.display()
        )));
    }

    write_document(output_path, &generate_rule_template())?;

    println!("Created rule file: {}", output_path.display());
    Ok(())
}

#[must_use]
pub fn generate_rule_template() -> String {
    r#"# svg-align rule file
#
# Each [[groups]] entry names a layer/group in the drawing (matched against
# inkscape:label, then id) and the shape kind checked inside it.
# All lengths are in document units (usually mm), angles in radians.

[[groups]]
name = "pads"
shape = "rect"
# Shape centers must sit on this grid
grid = { x = 1.27, y = 1.27 }
# Expected width and height
size = { width = 1.27, height = 1.27 }

# Circles and arcs drawn as sodipodi:type="arc" paths.
# size is the diameter; arc defaults to a full ellipse.
# [[groups]]
# name = "holes"
# shape = "arc"
# grid = { x = 1.27, y = 1.27 }
# size = { width = 0.635, height = 0.635 }
# arc = { start = 0.0, end = 6.283185307179586 }

# Straight line paths (M/L/H/V). Endpoints are snapped to the grid.
# [[groups]]
# name = "outline"
# shape = "path"
# grid = { x = 1.27, y = 1.27 }

[tolerance]
# Deviations up to this absolute value are accepted as-is
acceptable = 0.001
# Deviations above this ratio of the expected value are not corrected
error_threshold = 0.1
"#
    .to_string()
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
