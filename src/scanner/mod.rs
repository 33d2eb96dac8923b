//! Discovery of input drawings.

mod filter;

pub use filter::{FileFilter, SvgFilter};

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;

/// Trait for scanning directories and finding files.
pub trait FileScanner {
    /// Scan a directory and return all matching file paths in sorted order.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be read.
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>>;
}

pub struct DirectoryScanner<F: FileFilter> {
    filter: F,
}

impl<F: FileFilter> DirectoryScanner<F> {
    #[must_use]
    pub const fn new(filter: F) -> Self {
        Self { filter }
    }

    fn scan_impl(&self, root: &Path) -> Vec<PathBuf> {
        WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file() && self.filter.should_include(e.path()))
            .map(walkdir::DirEntry::into_path)
            .collect()
    }
}

impl<F: FileFilter> FileScanner for DirectoryScanner<F> {
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>> {
        Ok(self.scan_impl(root))
    }
}

/// A document to validate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: PathBuf,
    /// Location of the corrected copy relative to an output directory.
    pub relative: PathBuf,
}

/// Expand command-line inputs into documents, in the order given.
///
/// Directories are scanned recursively; any other path is taken as-is so
/// that unreadable files surface as read errors later.
///
/// # Errors
/// Returns an error if scanning a directory fails.
pub fn collect_inputs<S: FileScanner>(inputs: &[PathBuf], scanner: &S) -> Result<Vec<InputFile>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            for path in scanner.scan(input)? {
                let relative = path.strip_prefix(input).unwrap_or(&path).to_path_buf();
                files.push(InputFile { path, relative });
            }
        } else {
            let relative = input
                .file_name()
                .map_or_else(|| input.clone(), PathBuf::from);
            files.push(InputFile {
                path: input.clone(),
                relative,
            });
        }
    }
    Ok(files)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
