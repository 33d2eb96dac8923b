use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::{Result, SvgAlignError};

const SVG_EXTENSION: &str = "svg";

pub trait FileFilter {
    fn should_include(&self, path: &Path) -> bool;
}

/// Accepts `.svg` drawings (any case) not matched by an exclude glob.
pub struct SvgFilter {
    excludes: GlobSet,
}

impl SvgFilter {
    /// # Errors
    /// Returns `InvalidPattern` naming the first exclude glob that does not
    /// compile.
    pub fn new(patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|source| SvgAlignError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }
        let excludes = builder
            .build()
            .map_err(|source| SvgAlignError::InvalidPattern {
                pattern: patterns.join(", "),
                source,
            })?;
        Ok(Self { excludes })
    }
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SVG_EXTENSION))
}

impl FileFilter for SvgFilter {
    fn should_include(&self, path: &Path) -> bool {
        is_svg(path) && !self.excludes.is_match(path)
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
