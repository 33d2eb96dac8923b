use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SvgAlignError {
    #[error("Rule format error: {0}")]
    RuleFormat(String),

    #[error("Rule file not found: {0}")]
    RuleNotFound(PathBuf),

    #[error("Malformed {kind} '{element}': {reason}")]
    MalformedShape {
        element: String,
        kind: &'static str,
        reason: String,
    },

    #[error("Unsupported path command '{command}' in '{element}'")]
    UnsupportedPathCommand { element: String, command: char },

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Invalid SVG document: {0}")]
    XmlParse(#[from] roxmltree::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SvgAlignError {
    /// Short category name used by the CLI error printer.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::RuleFormat(_) | Self::RuleNotFound(_) | Self::TomlParse(_) => "Rule",
            Self::MalformedShape { .. } | Self::UnsupportedPathCommand { .. } => "Shape",
            Self::FileRead { .. } | Self::FileWrite { .. } | Self::Io(_) => "IO",
            Self::InvalidPattern { .. } => "Pattern",
            Self::InvalidArgument(_) => "Usage",
            Self::XmlParse(_) => "Document",
            Self::Json(_) => "JSON",
        }
    }

    /// Build a `MalformedShape` error.
    pub fn malformed(
        element: impl Into<String>,
        kind: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedShape {
            element: element.into(),
            kind,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SvgAlignError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
