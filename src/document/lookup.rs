use std::ops::Range;

use indexmap::IndexSet;
use roxmltree::{Document, Node};

use crate::rules::ShapeKind;

use super::{AttrName, SODIPODI_NS, ShapeAttribute, ShapeElement};

const LABEL: AttrName = AttrName::inkscape("label");
const ARC_TYPE: AttrName = AttrName::sodipodi("type");

/// Elements located for one group rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupMatch {
    /// Number of `<g>` nodes whose display name matched.
    pub groups_found: usize,
    /// Matching drawing elements in document order, without duplicates.
    pub elements: Vec<ShapeElement>,
}

/// Display name of a group: `inkscape:label`, falling back to `id`.
///
/// Returns `None` for non-group nodes and for anonymous groups.
#[must_use]
pub fn group_display_name<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    if !node.is_element() || node.tag_name().name() != "g" {
        return None;
    }
    node.attribute((LABEL.namespace.unwrap_or_default(), LABEL.local))
        .filter(|label| !label.is_empty())
        .or_else(|| node.attribute("id"))
}

/// Locate every group named `name` (at any depth) and collect the drawing
/// elements below them that fit `kind`.
///
/// When matched groups nest, shared elements are reported once.
#[must_use]
pub fn locate_group_elements(doc: &Document<'_>, name: &str, kind: ShapeKind) -> GroupMatch {
    let mut groups = Vec::new();
    collect_groups(doc.root(), name, &mut groups);

    let mut seen: IndexSet<usize> = IndexSet::new();
    let mut nodes = Vec::new();
    for group in &groups {
        for node in group.descendants().filter(|n| matches_kind(*n, kind)) {
            if seen.insert(node.range().start) {
                nodes.push(node);
            }
        }
    }
    nodes.sort_by_key(|n| n.range().start);

    let source = doc.input_text();
    let elements = nodes
        .into_iter()
        .enumerate()
        .map(|(i, node)| snapshot(source, node, i + 1))
        .collect();

    GroupMatch {
        groups_found: groups.len(),
        elements,
    }
}

fn collect_groups<'a, 'input>(node: Node<'a, 'input>, name: &str, out: &mut Vec<Node<'a, 'input>>) {
    for child in node.children().filter(Node::is_element) {
        if group_display_name(child) == Some(name) {
            out.push(child);
        }
        collect_groups(child, name, out);
    }
}

fn is_arc(node: Node<'_, '_>) -> bool {
    node.attribute((SODIPODI_NS, ARC_TYPE.local)) == Some("arc")
}

fn matches_kind(node: Node<'_, '_>, kind: ShapeKind) -> bool {
    if !node.is_element() {
        return false;
    }
    match (node.tag_name().name(), kind) {
        ("rect", ShapeKind::Rect) => true,
        ("path", ShapeKind::Arc) => is_arc(node),
        ("path", ShapeKind::Path) => !is_arc(node),
        _ => false,
    }
}

fn snapshot(source: &str, node: Node<'_, '_>, ordinal: usize) -> ShapeElement {
    let tag = node.tag_name().name().to_string();
    let start = node.range().start;
    let raw = scan_start_tag(source, start);

    let attributes = node
        .attributes()
        .zip(raw.attributes)
        .map(|(attr, (qualified_name, value_range))| ShapeAttribute {
            namespace: attr.namespace().map(str::to_string),
            local: attr.name().to_string(),
            qualified_name,
            value: attr.value().to_string(),
            value_range,
        })
        .collect();

    let id = node
        .attribute("id")
        .map_or_else(|| format!("{tag}#{ordinal}"), str::to_string);

    ShapeElement {
        id,
        tag,
        attributes,
        insert_at: raw.name_end,
    }
}

struct RawStartTag {
    name_end: usize,
    /// Non-namespace-declaration attributes as `(qualified name, value range)`.
    attributes: Vec<(String, Range<usize>)>,
}

/// Scan the start tag beginning at `start` (the `<`) in well-formed source.
fn scan_start_tag(source: &str, start: usize) -> RawStartTag {
    let bytes = source.as_bytes();
    let is_name_end = |b: u8| b.is_ascii_whitespace() || b == b'/' || b == b'>' || b == b'=';

    let mut pos = start + 1;
    while pos < bytes.len() && !is_name_end(bytes[pos]) {
        pos += 1;
    }
    let name_end = pos;

    let mut attributes = Vec::new();
    loop {
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if pos >= bytes.len() || bytes[pos] == b'/' || bytes[pos] == b'>' {
            break;
        }

        let name_start = pos;
        while pos < bytes.len() && !is_name_end(bytes[pos]) {
            pos += 1;
        }
        let qualified_name = &source[name_start..pos];

        while pos < bytes.len() && bytes[pos] != b'"' && bytes[pos] != b'\'' {
            pos += 1;
        }
        if pos >= bytes.len() {
            break;
        }
        let quote = bytes[pos];
        let value_start = pos + 1;
        pos = value_start;
        while pos < bytes.len() && bytes[pos] != quote {
            pos += 1;
        }
        let value_range = value_start..pos;
        pos += 1;

        if qualified_name != "xmlns" && !qualified_name.starts_with("xmlns:") {
            attributes.push((qualified_name.to_string(), value_range));
        }
    }

    RawStartTag {
        name_end,
        attributes,
    }
}

#[cfg(test)]
#[path = "lookup_tests.rs"]
mod tests;
