use std::ops::Range;

/// A single text splice on the document source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeEdit {
    range: Range<usize>,
    replacement: String,
}

impl AttributeEdit {
    /// Replace an existing attribute value (quotes excluded).
    #[must_use]
    pub const fn replace(value_range: Range<usize>, value: String) -> Self {
        Self {
            range: value_range,
            replacement: value,
        }
    }

    /// Insert a new ` name="value"` attribute at `offset`.
    #[must_use]
    pub fn insert(offset: usize, qualified_name: String, value: String) -> Self {
        Self {
            range: offset..offset,
            replacement: format!(" {qualified_name}=\"{value}\""),
        }
    }

    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    #[must_use]
    pub fn replacement(&self) -> &str {
        &self.replacement
    }
}

/// Apply non-overlapping edits to `source`.
///
/// Edits may be given in any order. Insertions at the same offset keep their
/// relative order.
#[must_use]
pub fn apply_edits(source: &str, edits: &[AttributeEdit]) -> String {
    let mut ordered: Vec<&AttributeEdit> = edits.iter().collect();
    ordered.sort_by_key(|e| (e.range.start, e.range.end));

    let extra: usize = ordered.iter().map(|e| e.replacement.len()).sum();
    let mut output = String::with_capacity(source.len() + extra);
    let mut cursor = 0;
    for edit in ordered {
        // Write-back never targets the same attribute twice.
        if edit.range.start < cursor {
            tracing::warn!(start = edit.range.start, "skipping overlapping edit");
            continue;
        }
        output.push_str(&source[cursor..edit.range.start]);
        output.push_str(&edit.replacement);
        cursor = edit.range.end;
    }
    output.push_str(&source[cursor..]);
    output
}

#[cfg(test)]
#[path = "edit_tests.rs"]
mod tests;
