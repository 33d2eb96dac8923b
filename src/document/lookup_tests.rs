use super::*;
use crate::document::SvgDocument;

const DRAWING: &str = r#"<svg xmlns="http://www.w3.org/2000/svg"
     xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape"
     xmlns:sodipodi="http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd">
  <g inkscape:label="pads" id="layer1">
    <rect id="pad1" x="0" y="0" width="1.27" height="1.27"/>
    <g id="inner">
      <rect x="2.54" y="0" width="1.27" height="1.27"/>
      <path id="hole1" sodipodi:type="arc" sodipodi:cx="1" sodipodi:cy="1" d="M 0,0"/>
      <path id="line1" d="M 0,0 L 1,1"/>
    </g>
  </g>
  <g id="pads">
    <rect id="pad3" width="1" height="1"/>
  </g>
  <g inkscape:label="" id="unlabelled">
    <rect id="pad4" width="1" height="1"/>
  </g>
</svg>
"#;

fn locate(name: &str, kind: ShapeKind) -> GroupMatch {
    let doc = SvgDocument::from_source("test.svg", DRAWING);
    let tree = doc.parse().unwrap();
    locate_group_elements(&tree, name, kind)
}

fn ids(found: &GroupMatch) -> Vec<&str> {
    found.elements.iter().map(|e| e.id.as_str()).collect()
}

#[test]
fn pools_all_groups_with_matching_name() {
    let found = locate("pads", ShapeKind::Rect);

    assert_eq!(found.groups_found, 2);
    assert_eq!(ids(&found), ["pad1", "rect#2", "pad3"]);
}

#[test]
fn label_takes_precedence_over_id() {
    let found = locate("layer1", ShapeKind::Rect);
    assert_eq!(found.groups_found, 0);
    assert!(found.elements.is_empty());
}

#[test]
fn empty_label_falls_back_to_id() {
    let found = locate("unlabelled", ShapeKind::Rect);
    assert_eq!(ids(&found), ["pad4"]);
}

#[test]
fn nested_group_elements_are_not_duplicated() {
    let found = locate("inner", ShapeKind::Rect);
    assert_eq!(found.elements.len(), 1);

    let doc = SvgDocument::from_source(
        "nested.svg",
        r#"<svg xmlns="http://www.w3.org/2000/svg"><g id="a"><g id="a"><rect id="r" width="1" height="1"/></g></g></svg>"#,
    );
    let tree = doc.parse().unwrap();
    let found = locate_group_elements(&tree, "a", ShapeKind::Rect);

    assert_eq!(found.groups_found, 2);
    assert_eq!(ids(&found), ["r"]);
}

#[test]
fn arc_kind_matches_only_arc_typed_paths() {
    assert_eq!(ids(&locate("pads", ShapeKind::Arc)), ["hole1"]);
    assert_eq!(ids(&locate("pads", ShapeKind::Path)), ["line1"]);
}

#[test]
fn missing_group_reports_zero_groups() {
    let found = locate("nowhere", ShapeKind::Rect);
    assert_eq!(found, GroupMatch::default());
}

#[test]
fn attributes_carry_value_ranges_and_qualified_names() {
    let found = locate("pads", ShapeKind::Arc);
    let hole = &found.elements[0];
    let cx = hole
        .attributes
        .iter()
        .find(|a| a.local == "cx")
        .unwrap();

    assert_eq!(cx.qualified_name, "sodipodi:cx");
    assert_eq!(cx.namespace.as_deref(), Some(SODIPODI_NS));
    assert_eq!(&DRAWING[cx.value_range.clone()], "1");
    assert_eq!(&DRAWING[hole.insert_at - 5..hole.insert_at], "<path");
}

#[test]
fn namespace_declarations_are_not_attributes() {
    let doc = SvgDocument::from_source(
        "ns.svg",
        r#"<svg xmlns="http://www.w3.org/2000/svg"><g id="g"><rect xmlns:foo="urn:foo" foo:bar='1' width="2" height="3"/></g></svg>"#,
    );
    let tree = doc.parse().unwrap();
    let found = locate_group_elements(&tree, "g", ShapeKind::Rect);
    let rect = &found.elements[0];

    let names: Vec<_> = rect
        .attributes
        .iter()
        .map(|a| a.qualified_name.as_str())
        .collect();
    assert_eq!(names, ["foo:bar", "width", "height"]);
    assert_eq!(rect.attributes[2].value, "3");
    assert_eq!(&doc.source()[rect.attributes[0].value_range.clone()], "1");
}

#[test]
fn group_display_name_ignores_non_groups() {
    let doc = SvgDocument::from_source("x.svg", r#"<svg id="root"/>"#);
    let tree = doc.parse().unwrap();
    assert_eq!(group_display_name(tree.root_element()), None);
}
