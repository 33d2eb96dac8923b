//! SVG document model.
//!
//! The source text is kept verbatim. Lookups parse it with `roxmltree` and
//! return owned [`ShapeElement`] records carrying the byte ranges of their
//! attribute values, so corrections become text splices that leave every
//! other byte of the document unchanged.

mod edit;
mod lookup;

pub use edit::{AttributeEdit, apply_edits};
pub use lookup::{GroupMatch, group_display_name, locate_group_elements};

use std::ops::Range;
use std::path::{Path, PathBuf};

use roxmltree::{Document, ParsingOptions};

use crate::error::{Result, SvgAlignError};

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
pub const INKSCAPE_NS: &str = "http://www.inkscape.org/namespaces/inkscape";
pub const SODIPODI_NS: &str = "http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd";

/// Namespace-qualified attribute name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttrName {
    pub namespace: Option<&'static str>,
    pub local: &'static str,
}

impl AttrName {
    #[must_use]
    pub const fn plain(local: &'static str) -> Self {
        Self {
            namespace: None,
            local,
        }
    }

    #[must_use]
    pub const fn sodipodi(local: &'static str) -> Self {
        Self {
            namespace: Some(SODIPODI_NS),
            local,
        }
    }

    #[must_use]
    pub const fn inkscape(local: &'static str) -> Self {
        Self {
            namespace: Some(INKSCAPE_NS),
            local,
        }
    }

    /// Conventional prefix for a namespace, used when inserting a new attribute
    /// whose namespace has no prefixed attribute on the element yet.
    fn default_prefix(namespace: &str) -> Option<&'static str> {
        match namespace {
            SODIPODI_NS => Some("sodipodi"),
            INKSCAPE_NS => Some("inkscape"),
            _ => None,
        }
    }
}

/// One attribute of a located element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeAttribute {
    pub namespace: Option<String>,
    pub local: String,
    /// The name as written in the source, including any prefix.
    pub qualified_name: String,
    pub value: String,
    /// Byte range of the raw value in the source, excluding quotes.
    pub value_range: Range<usize>,
}

/// Owned snapshot of a drawing element matched by a group rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeElement {
    pub id: String,
    pub tag: String,
    pub attributes: Vec<ShapeAttribute>,
    /// Byte offset right after the tag name, where new attributes are inserted.
    pub insert_at: usize,
}

impl ShapeElement {
    fn find(&self, name: AttrName) -> Option<&ShapeAttribute> {
        self.attributes
            .iter()
            .find(|a| a.local == name.local && a.namespace.as_deref() == name.namespace)
    }

    #[must_use]
    pub fn attribute(&self, name: AttrName) -> Option<&str> {
        self.find(name).map(|a| a.value.as_str())
    }

    /// Build an edit that sets `name` to `value`, replacing the existing value
    /// or inserting a new attribute.
    #[must_use]
    pub fn set_attribute(&self, name: AttrName, value: String) -> AttributeEdit {
        if let Some(existing) = self.find(name) {
            return AttributeEdit::replace(existing.value_range.clone(), value);
        }
        AttributeEdit::insert(self.insert_at, self.qualify(name), value)
    }

    fn qualify(&self, name: AttrName) -> String {
        let Some(namespace) = name.namespace else {
            return name.local.to_string();
        };
        let prefix = self
            .attributes
            .iter()
            .filter(|a| a.namespace.as_deref() == Some(namespace))
            .find_map(|a| a.qualified_name.split_once(':').map(|(p, _)| p.to_string()))
            .or_else(|| AttrName::default_prefix(namespace).map(str::to_string));
        match prefix {
            Some(prefix) => format!("{prefix}:{}", name.local),
            None => name.local.to_string(),
        }
    }
}

/// A drawing document held as its original text.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    id: String,
    source: String,
}

impl SvgDocument {
    #[must_use]
    pub fn from_source(id: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
        }
    }

    /// Read a document from disk. The identifier is the path as given.
    ///
    /// # Errors
    /// Returns `FileRead` if the file cannot be read.
    pub fn from_path(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| SvgAlignError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_source(path.display().to_string(), source))
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Parse the source into a read-only tree.
    ///
    /// # Errors
    /// Returns `XmlParse` if the source is not well-formed XML.
    pub fn parse(&self) -> Result<Document<'_>> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        Ok(Document::parse_with_options(&self.source, options)?)
    }

    /// Return the source text with `edits` applied.
    #[must_use]
    pub fn with_edits(&self, edits: &[AttributeEdit]) -> String {
        apply_edits(&self.source, edits)
    }
}

/// Write document text to `path`.
///
/// # Errors
/// Returns `FileWrite` if the file or its parent directory cannot be written.
pub fn write_document(path: &Path, content: &str) -> Result<()> {
    let to_error = |source| SvgAlignError::FileWrite {
        path: PathBuf::from(path),
        source,
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(to_error)?;
    }
    std::fs::write(path, content).map_err(to_error)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
