//! Store path parser.
//!
//! A path is `<prefix>.<segment>(<op><segment>)*` where `<op>` is `.` or a
//! bracket group. Bracket content may itself contain brackets and quoted
//! strings; both are handled by [`find_closing_bracket`].

use std::fmt;

use crate::util::{find_closing_bracket, is_numeric_literal, is_quoted, looks_like_expression, strip_quotes};
use crate::PathError;

/// One parsed unit of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// `.name`. An object key, or an array index when the name is numeric
    /// and the parent is an array.
    Field(String),
    /// `[12]`, `[-1]`, `[1.5]`: unquoted numeric literal, always array-style.
    /// Only non-negative integers are valid indexes.
    Index(String),
    /// `["a.b"]` or `['a.b']`, quotes stripped. Always an object key.
    Quoted(String),
    /// `[@key]`: other literal content. Always an object key.
    Key(String),
    /// `[Store.idx + 1]`: an expression that was never resolved.
    Dynamic(String),
}

impl Segment {
    /// Classifies the raw content found between `[` and `]`.
    pub fn from_bracket(content: &str) -> Self {
        let trimmed = content.trim();
        if is_quoted(trimmed) {
            Segment::Quoted(strip_quotes(trimmed).to_string())
        } else if is_numeric_literal(trimmed) {
            Segment::Index(trimmed.to_string())
        } else if looks_like_expression(trimmed) {
            Segment::Dynamic(trimmed.to_string())
        } else {
            Segment::Key(content.to_string())
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Field(name) => write!(f, ".{}", name),
            Segment::Index(raw) | Segment::Key(raw) | Segment::Dynamic(raw) => {
                write!(f, "[{}]", raw)
            }
            Segment::Quoted(key) => write!(f, "[\"{}\"]", key),
        }
    }
}

/// Splits a path into segments after checking and removing the store
/// prefix (given without its trailing dot, e.g. `"Store"`).
///
/// A path equal to the prefix addresses the root and yields no segments.
///
/// # Example
///
/// ```
/// use json_store_path::{parse_path, Segment};
///
/// let segments = parse_path(r#"Store.config["mail.port"][0]"#, "Store").unwrap();
/// assert_eq!(
///     segments,
///     vec![
///         Segment::Field("config".to_string()),
///         Segment::Quoted("mail.port".to_string()),
///         Segment::Index("0".to_string()),
///     ]
/// );
/// ```
pub fn parse_path(path: &str, prefix: &str) -> Result<Vec<Segment>, PathError> {
    if path == prefix {
        return Ok(Vec::new());
    }
    let rest = path
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('.'))
        .ok_or_else(|| PathError::PrefixMismatch {
            prefix: prefix.to_string(),
            path: path.to_string(),
        })?;
    PathParser {
        path,
        input: rest,
        pos: 0,
    }
    .parse_segments()
}

struct PathParser<'a> {
    /// Full path, for error messages.
    path: &'a str,
    /// Path with the prefix removed.
    input: &'a str,
    pos: usize,
}

impl<'a> PathParser<'a> {
    fn parse_segments(&mut self) -> Result<Vec<Segment>, PathError> {
        let mut segments = Vec::new();
        if self.peek() == Some('[') {
            segments.push(self.parse_bracket()?);
        } else {
            segments.push(self.parse_field()?);
        }

        while let Some(c) = self.peek() {
            match c {
                '.' => {
                    self.advance();
                    segments.push(self.parse_field()?);
                }
                '[' => segments.push(self.parse_bracket()?),
                other => {
                    return Err(self.error(format!(
                        "unexpected character '{}' at offset {}",
                        other, self.pos
                    )))
                }
            }
        }
        Ok(segments)
    }

    fn parse_field(&mut self) -> Result<Segment, PathError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == '.' || c == '[' {
                break;
            }
            self.advance();
        }
        let name = &self.input[start..self.pos];
        if name.is_empty() {
            return Err(self.error(format!("empty segment at offset {}", start)));
        }
        Ok(Segment::Field(name.to_string()))
    }

    fn parse_bracket(&mut self) -> Result<Segment, PathError> {
        let open = self.pos;
        let close = find_closing_bracket(self.input, open)
            .ok_or_else(|| self.error(format!("unterminated bracket at offset {}", open)))?;
        self.pos = close + 1;
        Ok(Segment::from_bracket(&self.input[open + 1..close]))
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn error(&self, reason: String) -> PathError {
        PathError::InvalidPath {
            path: self.path.to_string(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(s: &str) -> Segment {
        Segment::Field(s.to_string())
    }

    #[test]
    fn test_parse_dot_notation() {
        assert_eq!(
            parse_path("Store.a.b.0", "Store").unwrap(),
            vec![field("a"), field("b"), field("0")]
        );
    }

    #[test]
    fn test_parse_root() {
        assert_eq!(parse_path("Store", "Store").unwrap(), vec![]);
    }

    #[test]
    fn test_parse_prefix_mismatch() {
        assert!(matches!(
            parse_path("Other.a", "Store"),
            Err(PathError::PrefixMismatch { .. })
        ));
        // A longer name sharing the prefix is not a match.
        assert!(matches!(
            parse_path("Stores.a", "Store"),
            Err(PathError::PrefixMismatch { .. })
        ));
    }

    #[test]
    fn test_parse_quoted_keys() {
        assert_eq!(
            parse_path(r#"Store.obj["a.b"]['c.d']"#, "Store").unwrap(),
            vec![
                field("obj"),
                Segment::Quoted("a.b".to_string()),
                Segment::Quoted("c.d".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_quoted_bracket_containing_bracket() {
        assert_eq!(
            parse_path(r#"Store.obj["x]y"].z"#, "Store").unwrap(),
            vec![field("obj"), Segment::Quoted("x]y".to_string()), field("z")]
        );
    }

    #[test]
    fn test_parse_apostrophe_inside_bracket() {
        assert_eq!(
            parse_path("Store.a[@it's].b", "Store").unwrap(),
            vec![field("a"), Segment::Key("@it's".to_string()), field("b")]
        );
        assert_eq!(
            parse_path("Store.a[it's]", "Store").unwrap(),
            vec![field("a"), Segment::Dynamic("it's".to_string())]
        );
    }

    #[test]
    fn test_parse_nested_dynamic_bracket() {
        assert_eq!(
            parse_path("Store.z[Store.x.y[Store.i]]", "Store").unwrap(),
            vec![field("z"), Segment::Dynamic("Store.x.y[Store.i]".to_string())]
        );
    }

    #[test]
    fn test_parse_bracket_forms() {
        assert_eq!(
            parse_path("Store.a[0][-1][1.5][@k]", "Store").unwrap(),
            vec![
                field("a"),
                Segment::Index("0".to_string()),
                Segment::Index("-1".to_string()),
                Segment::Index("1.5".to_string()),
                Segment::Key("@k".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_leading_bracket() {
        assert_eq!(
            parse_path("Store.[0].a", "Store").unwrap(),
            vec![Segment::Index("0".to_string()), field("a")]
        );
    }

    #[test]
    fn test_parse_malformed() {
        for path in ["Store.", "Store.a..b", "Store.a[0", "Store.a[0]x", "Store.a['b]"] {
            assert!(
                matches!(parse_path(path, "Store"), Err(PathError::InvalidPath { .. })),
                "expected InvalidPath for {}",
                path
            );
        }
    }

    #[test]
    fn test_segment_display() {
        assert_eq!(field("a").to_string(), ".a");
        assert_eq!(Segment::Index("3".to_string()).to_string(), "[3]");
        assert_eq!(Segment::Quoted("a.b".to_string()).to_string(), "[\"a.b\"]");
    }
}
