use super::*;
use crate::report::{CorrectionConflict, ReportOutcome};
use crate::rules::{RuleSyntax, ShapeKind, parse_rules};

const RULES: &str = r#"
[[groups]]
name = "pads"
shape = "rect"
grid = { x = 1.27, y = 1.27 }
size = { width = 1.27, height = 1.27 }

[[groups]]
name = "holes"
shape = "arc"
grid = { x = 1.27, y = 1.27 }
size = { width = 0.635, height = 0.635 }

[[groups]]
name = "outline"
shape = "path"
grid = { x = 1.27, y = 1.27 }
"#;

fn rules() -> AlignmentRule {
    parse_rules(RULES, RuleSyntax::Toml).unwrap()
}

fn drawing(pads: &str, holes: &str, outline: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg"
     xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape"
     xmlns:sodipodi="http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd">
  <!-- footprint -->
  <g inkscape:label="pads" id="layer1">
    {pads}
  </g>
  <g inkscape:label="holes" id="layer2">
    {holes}
  </g>
  <g inkscape:label="outline" id="layer3">
    {outline}
  </g>
</svg>
"#
    )
}

const CLEAN_PAD: &str = r#"<rect id="p1" x="0.635" y="0.635" width="1.27" height="1.27"/>"#;
const DRIFTED_PAD: &str = r#"<rect id="p2" x="3.2" y="0.64" width="1.2" height="1.2"/>"#;
const BROKEN_PAD: &str = r#"<rect id="p3" x="0.635" y="0.635" width="0.4" height="1.27"/>"#;
const CLEAN_HOLE: &str = r#"<path id="h1" sodipodi:type="arc" sodipodi:cx="1.27" sodipodi:cy="1.27" sodipodi:rx="0.3175" sodipodi:ry="0.3175" d="M 1.5875,1.27 A 0.3175,0.3175 0 1 1 1.5875,1.27 Z"/>"#;
const DRIFTED_HOLE: &str = r#"<path id="h2" sodipodi:type="arc" sodipodi:cx="2.55" sodipodi:cy="1.27" sodipodi:rx="0.33" sodipodi:ry="0.3175" d="M 2.88,1.27 A 0.33,0.3175 0 1 1 2.88,1.27 Z"/>"#;
const CLEAN_LINE: &str = r#"<path id="l1" d="M 0,0 H 5.08" style="stroke:#000"/>"#;
const DRIFTED_LINE: &str = r#"<path id="l2" d="M 0,0 L 5,0.0003"/>"#;

fn run(source: &str, fix: bool) -> ValidationOutcome {
    let document = SvgDocument::from_source("test.svg", source);
    validate_document(&document, &rules(), ValidationOptions { fix }).unwrap()
}

#[test]
fn clean_document_passes_and_round_trips() {
    let source = drawing(CLEAN_PAD, CLEAN_HOLE, CLEAN_LINE);

    let outcome = run(&source, true);

    assert_eq!(outcome.report.outcome(), ReportOutcome::Passed);
    assert_eq!(outcome.report.counts().ok, 3);
    assert_eq!(outcome.corrected.as_deref(), Some(source.as_str()));
}

#[test]
fn fixable_document_is_corrected() {
    let source = drawing(DRIFTED_PAD, DRIFTED_HOLE, DRIFTED_LINE);

    let outcome = run(&source, true);
    let corrected = outcome.corrected.unwrap();

    assert_eq!(outcome.report.outcome(), ReportOutcome::Corrected);
    assert!(corrected.contains(
        r#"<rect id="p2" x="3.175" y="0.635" width="1.27" height="1.27"/>"#
    ));
    assert!(corrected.contains(r#"sodipodi:cx="2.54""#));
    assert!(corrected.contains(r#"sodipodi:rx="0.3175""#));
    assert!(corrected.contains(r#"d="M 2.88,1.27 A 0.33,0.3175 0 1 1 2.88,1.27 Z""#));
    assert!(corrected.contains(r#"<path id="l2" d="M 0,0 H 5.08"/>"#));
    assert!(corrected.contains("<!-- footprint -->"));
}

#[test]
fn corrected_elements_record_new_geometry() {
    let source = drawing(DRIFTED_PAD, CLEAN_HOLE, CLEAN_LINE);

    let outcome = run(&source, true);
    let pad = &outcome.report.groups[0].elements[0];

    let corrected = pad.corrected.as_ref().unwrap();
    assert_eq!(corrected.geometry.kind(), ShapeKind::Rect);
    assert!(outcome.report.groups[1].elements[0].corrected.is_none());
}

#[test]
fn rerun_on_corrected_output_is_idempotent() {
    let source = drawing(DRIFTED_PAD, DRIFTED_HOLE, DRIFTED_LINE);
    let first = run(&source, true).corrected.unwrap();

    let second = run(&first, true);

    assert_eq!(second.report.outcome(), ReportOutcome::Passed);
    assert_eq!(second.report.counts().fixable, 0);
    assert_eq!(second.corrected.as_deref(), Some(first.as_str()));
}

#[test]
fn single_error_blocks_all_output() {
    let pads = format!("{DRIFTED_PAD}\n    {BROKEN_PAD}");
    let source = drawing(&pads, DRIFTED_HOLE, DRIFTED_LINE);

    let outcome = run(&source, true);

    assert!(outcome.report.has_errors());
    assert!(!outcome.report.corrections_applied);
    assert!(outcome.corrected.is_none());
    assert!(
        outcome
            .report
            .groups
            .iter()
            .flat_map(|g| &g.elements)
            .all(|e| e.corrected.is_none())
    );
}

#[test]
fn check_only_run_produces_no_output() {
    let source = drawing(DRIFTED_PAD, CLEAN_HOLE, CLEAN_LINE);

    let outcome = run(&source, false);

    assert_eq!(outcome.report.outcome(), ReportOutcome::FixableFound);
    assert!(outcome.corrected.is_none());
}

#[test]
fn missing_group_is_reported_and_run_continues() {
    let source = r#"<svg xmlns="http://www.w3.org/2000/svg"><g id="pads">
  <rect id="p1" x="0.635" y="0.635" width="1.27" height="1.27"/>
</g></svg>"#;

    let outcome = run(source, true);

    assert_eq!(outcome.report.groups.len(), 3);
    assert!(outcome.report.groups[0].found);
    assert!(!outcome.report.groups[1].found);
    assert_eq!(
        outcome.report.warnings,
        ["group 'holes' not found", "group 'outline' not found"]
    );
    assert!(outcome.corrected.is_some());
}

#[test]
fn malformed_element_is_skipped_without_veto() {
    let lines = format!("{DRIFTED_LINE}\n    <path id=\"c1\" d=\"M 0,0 C 1,1 2,2 3,3\"/>");
    let source = drawing(CLEAN_PAD, CLEAN_HOLE, &lines);

    let outcome = run(&source, true);
    let outline = &outcome.report.groups[2];

    assert_eq!(outline.counts().skipped, 1);
    assert_eq!(
        outline.elements[1].extraction_error.as_deref(),
        Some("Unsupported path command 'C' in 'c1'")
    );
    let corrected = outcome.corrected.unwrap();
    assert!(corrected.contains(r#"d="M 0,0 C 1,1 2,2 3,3""#));
    assert!(corrected.contains(r#"d="M 0,0 H 5.08""#));
}

#[test]
fn malformed_xml_is_an_error() {
    let document = SvgDocument::from_source("bad.svg", "<svg><g></svg>");
    let result = validate_document(&document, &rules(), ValidationOptions::default());
    assert!(matches!(result, Err(crate::SvgAlignError::XmlParse(_))));
}

#[test]
fn multi_segment_paths_are_skipped_and_left_intact() {
    let lines = format!(
        "{DRIFTED_LINE}\n    <path id=\"poly\" d=\"M 0,0 H 5.08 V 5.09\"/>\n    <path id=\"box\" d=\"M 0.01,0 H 5.08 V 5.08 H 0 Z\"/>"
    );
    let source = drawing(CLEAN_PAD, CLEAN_HOLE, &lines);

    let outcome = run(&source, true);
    let outline = &outcome.report.groups[2];

    assert_eq!(outline.counts().skipped, 2);
    assert_eq!(outline.elements[1].status, ElementStatus::Skipped);
    assert_eq!(outline.elements[2].status, ElementStatus::Skipped);
    let corrected = outcome.corrected.unwrap();
    assert!(corrected.contains(r#"d="M 0,0 H 5.08 V 5.09""#));
    assert!(corrected.contains(r#"d="M 0.01,0 H 5.08 V 5.08 H 0 Z""#));
    assert!(corrected.contains(r#"<path id="l2" d="M 0,0 H 5.08"/>"#));
}

fn nested_rules(inner_grid_y: f64) -> AlignmentRule {
    let source = format!(
        r#"
[[groups]]
name = "outer"
shape = "rect"
grid = {{ x = 1.0, y = 1.0 }}

[[groups]]
name = "inner"
shape = "rect"
grid = {{ x = 1.0, y = {inner_grid_y:?} }}
"#
    );
    parse_rules(&source, RuleSyntax::Toml).unwrap()
}

const NESTED: &str = r#"<svg xmlns="http://www.w3.org/2000/svg">
  <g id="outer">
    <g id="inner">
      <rect id="r" width="2" height="2.1"/>
    </g>
  </g>
</svg>
"#;

#[test]
fn element_matched_by_two_rules_is_corrected_once() {
    let document = SvgDocument::from_source("nested.svg", NESTED);
    let outcome =
        validate_document(&document, &nested_rules(1.0), ValidationOptions { fix: true }).unwrap();

    assert_eq!(outcome.report.outcome(), ReportOutcome::Corrected);
    assert!(outcome.report.conflicts.is_empty());
    let corrected = outcome.corrected.unwrap();
    assert_eq!(corrected.matches("y=").count(), 1);
    assert!(corrected.contains(r#"y="-0.05""#));
    assert!(SvgDocument::from_source("nested.svg", corrected.as_str()).parse().is_ok());
    for group in &outcome.report.groups {
        assert_eq!(group.elements[0].status, ElementStatus::Fixable);
        assert!(group.elements[0].corrected.is_some());
    }
}

#[test]
fn conflicting_rules_leave_element_unchanged() {
    let document = SvgDocument::from_source("nested.svg", NESTED);
    let outcome =
        validate_document(&document, &nested_rules(1.1), ValidationOptions { fix: true }).unwrap();

    assert_eq!(outcome.report.outcome(), ReportOutcome::PartiallyCorrected);
    assert_eq!(
        outcome.report.conflicts,
        vec![CorrectionConflict {
            element: "r".to_string(),
            groups: vec!["outer".to_string(), "inner".to_string()],
        }]
    );
    assert_eq!(outcome.corrected.as_deref(), Some(NESTED));
    assert!(outcome.report.groups.iter().all(|g| g.elements[0].corrected.is_none()));
}
