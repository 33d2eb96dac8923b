use std::path::{Path, PathBuf};

use crate::error::{Result, SvgAlignError};

use super::model::{AlignmentRule, RuleFile};
use super::validation::build_rule;

/// Rule file picked up from the working directory when `--rule` is absent.
pub const LOCAL_RULE_NAME: &str = ".svg-align.toml";

/// Trait for loading alignment rules from various sources.
pub trait RuleLoader {
    /// Load rules from the default location.
    ///
    /// # Errors
    /// Returns an error if no rule file exists or it cannot be read or parsed.
    fn load(&self) -> Result<AlignmentRule>;

    /// Load rules from a specific path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    fn load_from_path(&self, path: &Path) -> Result<AlignmentRule>;
}

/// Trait for filesystem operations (for testability).
pub trait FileSystem {
    /// Read file contents as a string.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Get the current working directory.
    ///
    /// # Errors
    /// Returns an error if the current directory cannot be determined.
    fn current_dir(&self) -> std::io::Result<PathBuf>;
}

/// Real filesystem implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn current_dir(&self) -> std::io::Result<PathBuf> {
        std::env::current_dir()
    }
}

/// Rule file syntax, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSyntax {
    Toml,
    Json,
}

impl RuleSyntax {
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// Parse rule content in the given syntax and validate it.
///
/// # Errors
/// Returns a parse error for malformed content or `RuleFormat` for
/// semantically invalid rules.
pub fn parse_rules(content: &str, syntax: RuleSyntax) -> Result<AlignmentRule> {
    let file: RuleFile = match syntax {
        RuleSyntax::Toml => toml::from_str(content)?,
        RuleSyntax::Json => serde_json::from_str(content)?,
    };
    build_rule(file)
}

/// Loads rules from the filesystem.
///
/// Search order when no path is given: `.svg-align.toml` in the current
/// directory. There is no built-in fallback; a run without rules is an error.
#[derive(Debug)]
pub struct FileRuleLoader<F: FileSystem = RealFileSystem> {
    fs: F,
}

impl Default for FileRuleLoader<RealFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl FileRuleLoader<RealFileSystem> {
    #[must_use]
    pub const fn new() -> Self {
        Self { fs: RealFileSystem }
    }
}

impl<F: FileSystem> FileRuleLoader<F> {
    #[must_use]
    pub const fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    fn local_rule_path(&self) -> Option<PathBuf> {
        self.fs
            .current_dir()
            .ok()
            .map(|dir| dir.join(LOCAL_RULE_NAME))
    }
}

impl<F: FileSystem> RuleLoader for FileRuleLoader<F> {
    fn load(&self) -> Result<AlignmentRule> {
        match self.local_rule_path() {
            Some(path) if self.fs.exists(&path) => self.load_from_path(&path),
            Some(path) => Err(SvgAlignError::RuleNotFound(path)),
            None => Err(SvgAlignError::RuleNotFound(PathBuf::from(LOCAL_RULE_NAME))),
        }
    }

    fn load_from_path(&self, path: &Path) -> Result<AlignmentRule> {
        if !self.fs.exists(path) {
            return Err(SvgAlignError::RuleNotFound(path.to_path_buf()));
        }
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|source| SvgAlignError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
        let rule = parse_rules(&content, RuleSyntax::from_path(path))?;
        tracing::debug!(
            path = %path.display(),
            groups = rule.groups.len(),
            "loaded alignment rules"
        );
        Ok(rule)
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
