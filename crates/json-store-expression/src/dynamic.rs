//! Dynamic bracket resolution.
//!
//! A bracket such as `[Store.idx + 1]` is evaluated against the named value
//! sources and rewritten in place with its scalar result, one bracket per
//! pass, until nothing more resolves or the pass cap is reached.

use crate::evaluate::evaluate_str;
use crate::source::SourceRegistry;
use json_store_path::{find_closing_bracket, is_integer, looks_like_expression, number_to_string, Value};
use tracing::{debug, trace, warn};

/// Pass cap used when none is configured.
pub const DEFAULT_MAX_PASSES: usize = 10;

/// Rewrites every dynamic bracket of `path` it can evaluate.
///
/// Brackets that still hold an expression afterwards are left as they are;
/// they surface as `UnresolvableIndex` once the path is applied to data.
///
/// # Example
///
/// ```
/// use json_store_expression::{resolve_dynamic_path, ObjectSource, SourceRegistry};
/// use json_store_path::Value;
/// use serde_json::json;
/// use std::rc::Rc;
///
/// let idx = ObjectSource::new("Idx", Value::from(json!({"i": 2, "key": "name"})));
/// let sources = SourceRegistry::new().with(Rc::new(idx));
///
/// assert_eq!(
///     resolve_dynamic_path("Data.items[Idx.i - 1][Idx.key]", &sources, 10),
///     r#"Data.items[1]["name"]"#
/// );
/// ```
pub fn resolve_dynamic_path(path: &str, sources: &SourceRegistry, max_passes: usize) -> String {
    let mut current = path.to_string();
    for _ in 0..max_passes {
        match resolve_one_bracket(&current, sources) {
            Some(next) => {
                trace!(from = %current, to = %next, "resolved dynamic bracket");
                current = next;
            }
            None => return current,
        }
    }
    if !dynamic_brackets(&current).is_empty() {
        warn!(path = %current, max_passes, "dynamic bracket resolution hit the pass cap");
    }
    current
}

/// Byte ranges `(open, close)` of the top-level brackets of `s` whose
/// content looks like an expression.
fn dynamic_brackets(s: &str) -> Vec<(usize, usize)> {
    let mut found = Vec::new();
    let mut i = 0;
    while let Some(offset) = s[i..].find('[') {
        let open = i + offset;
        let Some(close) = find_closing_bracket(s, open) else {
            break;
        };
        if looks_like_expression(&s[open + 1..close]) {
            found.push((open, close));
        }
        i = close + 1;
    }
    found
}

/// Resolves the first dynamic bracket that can be resolved, either by
/// evaluating it whole or, failing that, by resolving a bracket nested in
/// its content. Returns `None` when no bracket changed.
fn resolve_one_bracket(s: &str, sources: &SourceRegistry) -> Option<String> {
    for (open, close) in dynamic_brackets(s) {
        let content = &s[open + 1..close];
        let replacement = match evaluate_str(content.trim(), sources) {
            Ok(value) => scalar_to_index(&value),
            Err(err) => {
                debug!(expr = content, error = %err, "dynamic bracket did not evaluate");
                None
            }
        };
        let replacement = replacement.or_else(|| resolve_one_bracket(content, sources));
        if let Some(replacement) = replacement {
            return Some(format!("{}[{}]{}", &s[..open], replacement, &s[close + 1..]));
        }
    }
    None
}

/// Bracket text for an evaluated scalar: numbers plain, anything else as a
/// quoted key. Containers and `Undefined` do not address anything.
fn scalar_to_index(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) if n.is_finite() => Some(number_to_string(*n)),
        Value::String(s) if is_integer(s) => Some(s.clone()),
        Value::String(s) => quote_key(s),
        Value::Bool(b) => quote_key(&b.to_string()),
        Value::Null => quote_key("null"),
        _ => None,
    }
}

fn quote_key(key: &str) -> Option<String> {
    match (key.contains('"'), key.contains('\'')) {
        (false, _) => Some(format!("\"{}\"", key)),
        (true, false) => Some(format!("'{}'", key)),
        (true, true) => None,
    }
}
