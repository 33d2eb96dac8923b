use std::sync::LazyLock;

use regex::Regex;

use super::{PathGeometry, Point, format_number};
use crate::error::{Result, SvgAlignError};

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z])|([-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?)").expect("Invalid regex")
});

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Command(char),
    Number(f64),
}

fn malformed(element: &str, reason: impl Into<String>) -> SvgAlignError {
    SvgAlignError::malformed(element, "path", reason)
}

fn tokenize(element: &str, data: &str) -> Result<Vec<Token>> {
    let check_gap = |gap: &str| {
        match gap.chars().find(|c| !c.is_whitespace() && *c != ',') {
            Some(c) => Err(malformed(element, format!("unexpected character '{c}' in path data"))),
            None => Ok(()),
        }
    };

    let mut tokens = Vec::new();
    let mut last = 0;
    for caps in TOKEN.captures_iter(data) {
        let Some(whole) = caps.get(0) else { continue };
        check_gap(&data[last..whole.start()])?;
        last = whole.end();

        if let Some(letter) = caps.get(1).and_then(|m| m.as_str().chars().next()) {
            tokens.push(Token::Command(letter));
        } else {
            let value: f64 = whole
                .as_str()
                .parse()
                .map_err(|_| malformed(element, format!("invalid number '{}'", whole.as_str())))?;
            tokens.push(Token::Number(value));
        }
    }
    check_gap(&data[last..])?;
    Ok(tokens)
}

struct Cursor<'a> {
    element: &'a str,
    tokens: std::iter::Peekable<std::vec::IntoIter<Token>>,
}

impl Cursor<'_> {
    fn number(&mut self, command: char) -> Result<f64> {
        match self.tokens.next() {
            Some(Token::Number(value)) => Ok(value),
            _ => Err(malformed(
                self.element,
                format!("expected number after '{command}'"),
            )),
        }
    }

    fn pair(&mut self, command: char) -> Result<Point> {
        let x = self.number(command)?;
        let y = self.number(command)?;
        Ok(Point::new(x, y))
    }
}

/// Parse SVG path data describing one straight segment and return its
/// endpoints.
///
/// Only straight-line commands (`M L H V Z`, absolute and relative) are
/// accepted, and the data may hold a single moveto followed by at most one
/// drawing command. Polylines, closed figures and multiple subpaths cannot be
/// regenerated as a single segment, so they are rejected.
///
/// # Errors
/// `UnsupportedPathCommand` for any other command letter; `MalformedShape`
/// for bad numbers, stray characters, missing operands, data that does not
/// start with a moveto, or more than one segment.
pub fn parse_path_data(element: &str, data: &str) -> Result<PathGeometry> {
    let mut cursor = Cursor {
        element,
        tokens: tokenize(element, data)?.into_iter().peekable(),
    };

    let mut current = Point::new(0.0, 0.0);
    let mut subpath_start = current;
    let mut start: Option<Point> = None;
    let mut repeat: Option<char> = None;
    let mut segments = 0usize;
    let single_segment =
        || malformed(element, "path group elements must be a single straight segment");

    while let Some(&token) = cursor.tokens.peek() {
        let command = match token {
            Token::Command(letter) => {
                cursor.tokens.next();
                letter
            }
            Token::Number(_) => repeat.ok_or_else(|| {
                malformed(element, "number without a preceding command in path data")
            })?,
        };

        if start.is_none() && !matches!(command, 'M' | 'm') {
            return Err(malformed(element, "path data must begin with a moveto"));
        }

        if matches!(command.to_ascii_uppercase(), 'L' | 'H' | 'V' | 'Z') {
            segments += 1;
            if segments > 1 {
                return Err(single_segment());
            }
        }

        let relative = command.is_ascii_lowercase();
        let origin = if relative { current } else { Point::new(0.0, 0.0) };
        match command.to_ascii_uppercase() {
            'M' => {
                if start.is_some() {
                    return Err(single_segment());
                }
                let p = cursor.pair(command)?;
                current = Point::new(origin.x + p.x, origin.y + p.y);
                subpath_start = current;
                start = Some(current);
                repeat = Some(if relative { 'l' } else { 'L' });
            }
            'L' => {
                let p = cursor.pair(command)?;
                current = Point::new(origin.x + p.x, origin.y + p.y);
                repeat = Some(command);
            }
            'H' => {
                current.x = origin.x + cursor.number(command)?;
                repeat = Some(command);
            }
            'V' => {
                current.y = origin.y + cursor.number(command)?;
                repeat = Some(command);
            }
            'Z' => {
                current = subpath_start;
                repeat = None;
            }
            _ => {
                return Err(SvgAlignError::UnsupportedPathCommand {
                    element: element.to_string(),
                    command,
                });
            }
        }
    }

    let start = start.ok_or_else(|| malformed(element, "path data contains no moveto"))?;
    Ok(PathGeometry {
        start,
        end: current,
    })
}

/// Render a single straight segment in normalized form.
///
/// Vertical segments use `V`, horizontal segments use `H`, anything else `L`.
/// An axis counts as aligned when the endpoints differ by at most `axis_tolerance`.
#[must_use]
pub fn segment_data(start: Point, end: Point, axis_tolerance: f64) -> String {
    let sx = format_number(start.x);
    let sy = format_number(start.y);
    if (start.x - end.x).abs() <= axis_tolerance {
        format!("M {sx},{sy} V {}", format_number(end.y))
    } else if (start.y - end.y).abs() <= axis_tolerance {
        format!("M {sx},{sy} H {}", format_number(end.x))
    } else {
        format!(
            "M {sx},{sy} L {},{}",
            format_number(end.x),
            format_number(end.y)
        )
    }
}

#[cfg(test)]
#[path = "path_data_tests.rs"]
mod tests;
