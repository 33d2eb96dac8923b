use clap::Parser;
use tempfile::TempDir;

use super::*;
use crate::cli::Commands;
use crate::rules::{GroupRule, ShapeKind, Tolerance};

fn run(argv: &[&str]) -> i32 {
    let cli = Cli::parse_from(argv);
    match &cli.command {
        Commands::Rules(args) => run_rules(args, &cli),
        _ => unreachable!(),
    }
}

#[test]
fn text_lists_groups_in_order() {
    let rule = AlignmentRule {
        groups: vec![
            GroupRule::new("pads", ShapeKind::Rect)
                .with_grid(1.27, 1.27)
                .with_size(1.27, 0.635),
            GroupRule::new("outline", ShapeKind::Path),
        ],
        tolerance: Tolerance::default(),
    };

    let text = format_rule_text(&rule);

    assert!(text.starts_with("Tolerance: acceptable 0.001, error threshold 0.1\n"));
    assert!(text.contains("Groups (2):"));
    assert!(text.contains("  pads [rect]\n    grid: 1.27 x 1.27\n    size: 1.27 x 0.635\n"));
    assert!(text.find("pads").unwrap() < text.find("outline").unwrap());
    assert!(!text.contains("arc:"));
}

#[test]
fn text_fills_in_default_arc_angles() {
    let rule = AlignmentRule {
        groups: vec![GroupRule::new("holes", ShapeKind::Arc)],
        tolerance: Tolerance::default(),
    };

    let text = format_rule_text(&rule);

    assert!(text.contains("  holes [arc]\n    arc: 0 .. 6.2831853072\n"));
}

#[test]
fn validate_accepts_valid_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rules.toml");
    std::fs::write(&path, "[[groups]]\nname = \"pads\"\nshape = \"rect\"\n").unwrap();

    let code = run(&["svg-align", "rules", "validate", path.to_str().unwrap()]);

    assert_eq!(code, EXIT_SUCCESS);
}

#[test]
fn validate_rejects_invalid_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rules.toml");
    std::fs::write(&path, "[[groups]]\nname = \"pads\"\nshape = \"hexagon\"\n").unwrap();

    let code = run(&["svg-align", "rules", "validate", path.to_str().unwrap()]);

    assert_eq!(code, EXIT_IO_ERROR);
}

#[test]
fn show_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.toml");

    let code = run(&["svg-align", "rules", "show", path.to_str().unwrap(), "-f", "json"]);

    assert_eq!(code, EXIT_IO_ERROR);
}
