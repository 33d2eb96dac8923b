#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the svg-align binary.
#[macro_export]
macro_rules! svg_align {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("svg-align"))
    };
}

/// Rule file used by most tests: 1.27mm pads on a 1.27mm grid.
pub const PAD_RULES: &str = r#"
[[groups]]
name = "pads"
shape = "rect"
grid = { x = 1.27, y = 1.27 }
size = { width = 1.27, height = 1.27 }
"#;

/// Creates a temporary directory with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a new test fixture with an empty temp directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Joins `relative_path` onto the temp directory.
    pub fn join(&self, relative_path: &str) -> PathBuf {
        self.dir.path().join(relative_path)
    }

    pub fn read(&self, relative_path: &str) -> String {
        fs::read_to_string(self.join(relative_path)).expect("Failed to read file")
    }

    /// Writes `.svg-align.toml` in the temp directory.
    pub fn create_rules(&self, content: &str) {
        self.create_file(".svg-align.toml", content);
    }

    /// Writes a drawing with one "pads" layer holding the given rect elements.
    pub fn create_pad_drawing(&self, relative_path: &str, rects: &[&str]) {
        self.create_file(relative_path, &pad_drawing(rects));
    }
}

/// A rect element with the given id, position and size.
pub fn rect(id: &str, x: f64, y: f64, width: f64, height: f64) -> String {
    format!(r#"<rect id="{id}" x="{x}" y="{y}" width="{width}" height="{height}" style="fill:#000"/>"#)
}

/// An Inkscape-style drawing with a "pads" layer.
pub fn pad_drawing(rects: &[&str]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg"
     xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape"
     width="20mm" height="20mm" viewBox="0 0 20 20">
  <g inkscape:label="pads" inkscape:groupmode="layer" id="layer1">
    {}
  </g>
</svg>
"#,
        rects.join("\n    ")
    )
}
