//! Lexical helpers shared by the path parser and the dynamic index resolver.

/// Check if a string consists only of ASCII digits.
pub fn is_integer(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    s.bytes().all(|b| b.is_ascii_digit())
}

/// Check if a string is a plain decimal literal: `-?\d+(\.\d+)?`.
///
/// Such bracket contents are never treated as expressions, even though a
/// fractional literal contains a `.`.
pub fn is_numeric_literal(s: &str) -> bool {
    let unsigned = s.strip_prefix('-').unwrap_or(s);
    match unsigned.split_once('.') {
        Some((int, frac)) => is_integer(int) && is_integer(frac),
        None => is_integer(unsigned),
    }
}

/// Check if a string is wrapped in a matching pair of `'` or `"`.
pub fn is_quoted(s: &str) -> bool {
    s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')))
}

/// Strips one pair of surrounding quotes, if present.
pub fn strip_quotes(s: &str) -> &str {
    if is_quoted(s) {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

/// Bracket content that has to be evaluated before it can address anything:
/// not quoted, not a numeric literal, and either dotted or starting with a
/// letter.
pub fn looks_like_expression(content: &str) -> bool {
    let content = content.trim();
    if content.is_empty() || is_quoted(content) || is_numeric_literal(content) {
        return false;
    }
    content.contains('.') || content.starts_with(|c: char| c.is_ascii_alphabetic())
}

/// Returns the byte offset just past the quoted run starting at `open`, or
/// `None` if the quote is never closed.
pub fn skip_quoted(s: &str, open: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    let quote = bytes[open];
    bytes[open + 1..]
        .iter()
        .position(|&b| b == quote)
        .map(|offset| open + 1 + offset + 1)
}

/// Check if the quote at byte offset `at` can start a string: it follows
/// an opening bracket or parenthesis, a comma, or an operator, ignoring
/// whitespace. A quote inside a word is an ordinary character.
pub fn opens_string(bytes: &[u8], at: usize) -> bool {
    match bytes[..at].iter().rev().find(|b| !b.is_ascii_whitespace()) {
        Some(prev) => b"[(,+-*/%=!<>&|?:".contains(prev),
        None => true,
    }
}

/// Finds the `]` matching the `[` at byte offset `open`.
///
/// Nested brackets are matched by depth; quoted runs are skipped so a `]`
/// inside a quoted key does not close the bracket. A quote only opens a run
/// where a string can start (see [`opens_string`]), so `[it's]` is plain
/// content.
pub fn find_closing_bracket(s: &str, open: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    debug_assert_eq!(bytes.get(open), Some(&b'['));
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'\'' | b'"' if opens_string(bytes, i) => {
                i = skip_quoted(s, i)?;
                continue;
            }
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}
