//! Placeholder scanner for `${name}` markers.
//!
//! The scanner has two states: reading literal text, and reading the name
//! inside a marker. It starts and must finish in the literal state.
//! A `$` that is not followed by `{`, and a `}` outside of a marker, are
//! plain text: shell snippets (`$HOME`) and code braces are everywhere in
//! the documents this is used on.

use std::fmt;

use thiserror::Error;

const OPEN: &str = "${";
const CLOSE: char = '}';

/// Location of a marker in the template source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Byte offset of the opening `$`.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    Placeholder { name: &'a str, position: Position },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkerError {
    #[error("unclosed placeholder '${{{name}' starting at {position}")]
    Unclosed { name: String, position: Position },

    #[error("placeholder opened at {inner} inside '${{{name}' started at {outer}")]
    Nested { name: String, outer: Position, inner: Position },

    #[error("empty placeholder name at {position}")]
    EmptyName { position: Position },

    #[error("invalid placeholder name '{name}' at {position}")]
    InvalidName { name: String, position: Position },
}

impl MarkerError {
    pub fn position(&self) -> Position {
        match self {
            MarkerError::Unclosed { position, .. }
            | MarkerError::EmptyName { position }
            | MarkerError::InvalidName { position, .. } => *position,
            MarkerError::Nested { outer, .. } => *outer,
        }
    }

    /// The offending name, when the marker got far enough to have one.
    /// For a nested marker this is the outer one.
    pub fn name(&self) -> Option<&str> {
        match self {
            MarkerError::Unclosed { name, .. }
            | MarkerError::Nested { name, .. }
            | MarkerError::InvalidName { name, .. } => {
                (!name.is_empty()).then_some(name.as_str())
            }
            MarkerError::EmptyName { .. } => None,
        }
    }
}

fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Returns true if `s` is a non-empty run of ASCII letters, digits and `_`.
pub fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(is_identifier_byte)
}

/// Split a template into literal text and placeholder markers.
///
/// The whole template is scanned before anything is returned, so a
/// structural defect anywhere fails the parse.
pub fn parse(template: &str) -> Result<Vec<Segment<'_>>, MarkerError> {
    let mut segments = Vec::new();
    let mut tracker = LineTracker::new(template);
    let mut pos = 0;

    while let Some(rel) = template[pos..].find(OPEN) {
        let start = pos + rel;
        if start > pos {
            segments.push(Segment::Literal(&template[pos..start]));
        }

        let position = tracker.position_of(start);
        let name_start = start + OPEN.len();
        let rest = &template[name_start..];

        let name_len = rest.bytes().take_while(|b| is_identifier_byte(*b)).count();
        let name = &rest[..name_len];
        let after = &rest[name_len..];

        if !after.starts_with(CLOSE) {
            return Err(marker_defect(name, after, name_start + name_len, position, &mut tracker));
        }
        if name.is_empty() {
            return Err(MarkerError::EmptyName { position });
        }

        segments.push(Segment::Placeholder { name, position });
        pos = name_start + name_len + CLOSE.len_utf8();
    }

    if pos < template.len() {
        segments.push(Segment::Literal(&template[pos..]));
    }

    Ok(segments)
}

/// Classify a marker whose identifier run is not followed by `}`.
///
/// Only the rest of the current line is considered: a `}` further down is
/// code, not the end of this marker.
fn marker_defect(
    name: &str,
    after: &str,
    after_offset: usize,
    position: Position,
    tracker: &mut LineTracker<'_>,
) -> MarkerError {
    let line = &after[..after.find('\n').unwrap_or(after.len())];
    let close = line.find(CLOSE);
    let nested = line.find(OPEN);

    match (close, nested) {
        (_, Some(n)) if close.is_none_or(|c| n < c) => MarkerError::Nested {
            name: name.to_string(),
            outer: position,
            inner: tracker.position_of(after_offset + n),
        },
        (Some(c), _) => MarkerError::InvalidName {
            name: format!("{name}{}", &line[..c]),
            position,
        },
        _ => MarkerError::Unclosed { name: name.to_string(), position },
    }
}

/// Distinct placeholder names in order of first appearance.
pub fn placeholder_names(template: &str) -> Result<Vec<String>, MarkerError> {
    let mut names: Vec<String> = Vec::new();
    for seg in parse(template)? {
        if let Segment::Placeholder { name, .. } = seg
            && !names.iter().any(|n| n == name)
        {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

/// Incremental byte offset -> line/column conversion.
///
/// Offsets are requested in increasing order, so each call only scans the
/// text since the previous one.
struct LineTracker<'a> {
    src: &'a str,
    offset: usize,
    line: usize,
    line_start: usize,
}

impl<'a> LineTracker<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, offset: 0, line: 1, line_start: 0 }
    }

    fn position_of(&mut self, offset: usize) -> Position {
        debug_assert!(offset >= self.offset);
        for (i, b) in self.src.as_bytes()[self.offset..offset].iter().enumerate() {
            if *b == b'\n' {
                self.line += 1;
                self.line_start = self.offset + i + 1;
            }
        }
        self.offset = offset;
        let column = self.src[self.line_start..offset].chars().count() + 1;
        Position { offset, line: self.line, column }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names<'a>(segments: &[Segment<'a>]) -> Vec<&'a str> {
        segments
            .iter()
            .filter_map(|s| match s {
                Segment::Placeholder { name, .. } => Some(*name),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_parse_literal_only() {
        let segs = parse("just text").unwrap();
        assert_eq!(segs, vec![Segment::Literal("just text")]);
    }

    #[test]
    fn test_parse_empty_template() {
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_marker_between_literals() {
        let segs = parse("Install: ${pkg} now").unwrap();
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[0], Segment::Literal("Install: "));
        assert_eq!(names(&segs), vec!["pkg"]);
        assert_eq!(segs[2], Segment::Literal(" now"));
    }

    #[test]
    fn test_parse_adjacent_markers() {
        let segs = parse("${a}${b}").unwrap();
        assert_eq!(names(&segs), vec!["a", "b"]);
        assert_eq!(segs.len(), 2);
    }

    #[test]
    fn test_dollar_and_braces_are_literal_outside_markers() {
        let src = "echo $HOME; int main() { return 0; } $";
        let segs = parse(src).unwrap();
        assert_eq!(segs, vec![Segment::Literal(src)]);
    }

    #[test]
    fn test_position_tracks_lines_and_columns() {
        let segs = parse("first\nsecond ${x}\n  ${y}").unwrap();
        let positions: Vec<Position> = segs
            .iter()
            .filter_map(|s| match s {
                Segment::Placeholder { position, .. } => Some(*position),
                Segment::Literal(_) => None,
            })
            .collect();
        assert_eq!(positions[0], Position { offset: 13, line: 2, column: 8 });
        assert_eq!(positions[1], Position { offset: 20, line: 3, column: 3 });
    }

    #[test]
    fn test_column_counts_characters_not_bytes() {
        let segs = parse("héllo ${x}").unwrap();
        match &segs[1] {
            Segment::Placeholder { position, .. } => assert_eq!(position.column, 7),
            other => panic!("expected placeholder, got {other:?}"),
        }
    }

    #[test]
    fn test_unclosed_marker() {
        let err = parse("${unclosed").unwrap_err();
        assert_eq!(
            err,
            MarkerError::Unclosed {
                name: "unclosed".into(),
                position: Position { offset: 0, line: 1, column: 1 },
            }
        );
        assert_eq!(err.name(), Some("unclosed"));
    }

    #[test]
    fn test_nested_marker() {
        let err = parse("a ${outer ${inner}}").unwrap_err();
        match err {
            MarkerError::Nested { name, outer, inner } => {
                assert_eq!(name, "outer");
                assert_eq!(outer.offset, 2);
                assert_eq!(inner.offset, 10);
            }
            other => panic!("expected Nested, got {other:?}"),
        }
    }

    #[test]
    fn test_nested_without_gap() {
        let err = parse("${a${b}}").unwrap_err();
        assert_eq!(err.name(), Some("a"));
        assert!(matches!(err, MarkerError::Nested { .. }));
    }

    #[test]
    fn test_unclosed_before_later_code_braces() {
        let err = parse("see ${dep\nint f() { return 0; }\n").unwrap_err();
        match err {
            MarkerError::Unclosed { name, position } => {
                assert_eq!(name, "dep");
                assert_eq!(position.column, 5);
            }
            other => panic!("expected Unclosed, got {other:?}"),
        }
    }

    #[test]
    fn test_unclosed_error_message_names_marker() {
        let err = parse("${unclosed").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unclosed placeholder '${unclosed' starting at line 1, column 1"
        );
    }

    #[test]
    fn test_stray_closing_brace_is_literal() {
        let segs = parse("a } b ${x} }").unwrap();
        assert_eq!(segs[0], Segment::Literal("a } b "));
        assert_eq!(segs[2], Segment::Literal(" }"));
    }

    #[test]
    fn test_empty_name() {
        assert!(matches!(parse("x ${} y"), Err(MarkerError::EmptyName { .. })));
    }

    #[test]
    fn test_invalid_name() {
        let err = parse("${not a name}").unwrap_err();
        assert_eq!(err.name(), Some("not a name"));
    }

    #[test]
    fn test_defect_after_valid_markers_fails_whole_parse() {
        assert!(parse("${ok} fine ${broken").is_err());
    }

    #[test]
    fn test_placeholder_names_dedup_in_order() {
        let names = placeholder_names("${b} ${a} ${b} ${c}").unwrap();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("dependencies_rst"));
        assert!(is_identifier("_x1"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("a-b"));
        assert!(!is_identifier("a.b"));
    }
}
