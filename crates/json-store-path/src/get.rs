use crate::parser::Segment;
use crate::step::{classify, type_mismatch, Step};
use crate::value::Value;
use crate::PathError;

/// Get a value from the graph by parsed path.
///
/// Returns `Ok(None)` when the value is absent, including when any
/// intermediate container is missing (`Null`/`Undefined`). Never creates
/// anything.
///
/// # Errors
///
/// - `TypeMismatch` when a segment is applied to a scalar or to a container
///   of the wrong kind
/// - `InvalidIndex` / `UnresolvableIndex` when such a segment is reached
///
/// # Example
///
/// ```
/// use json_store_path::{get, parse_path, Value};
/// use serde_json::json;
///
/// let doc = Value::from(json!({"a": {"b": [1, 2, 3]}}));
/// let path = parse_path("Store.a.b[1]", "Store").unwrap();
/// assert_eq!(get(&doc, &path).unwrap(), Some(&Value::from(2)));
///
/// let missing = parse_path("Store.x.y", "Store").unwrap();
/// assert_eq!(get(&doc, &missing).unwrap(), None);
/// ```
pub fn get<'a>(root: &'a Value, segments: &[Segment]) -> Result<Option<&'a Value>, PathError> {
    let mut current = root;
    for segment in segments {
        if current.is_nullish() {
            return Ok(None);
        }
        let step = classify(segment, current.kind())?;
        let next = match (step, current) {
            (Step::Index(idx), Value::Array(items)) => items.get(idx),
            (Step::Key(key), Value::Object(map)) => map.get(key),
            (step, other) => return Err(type_mismatch(segment, &step, other)),
        };
        match next {
            Some(v) => current = v,
            None => return Ok(None),
        }
    }
    Ok(Some(current))
}

/// Like [`get`], but returns an owned value with absence reported as
/// [`Value::Undefined`].
pub fn read(root: &Value, segments: &[Segment]) -> Result<Value, PathError> {
    Ok(get(root, segments)?.cloned().unwrap_or(Value::Undefined))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_path;
    use serde_json::json;

    fn at(doc: &Value, path: &str) -> Result<Value, PathError> {
        read(doc, &parse_path(path, "S")?)
    }

    #[test]
    fn test_get_root() {
        let doc = Value::from(json!({"a": 1}));
        assert_eq!(at(&doc, "S").unwrap(), doc);
    }

    #[test]
    fn test_get_nested_mixed() {
        let doc = Value::from(json!({"rows": [{"0": "r0c0", "1": "r0c1"}]}));
        assert_eq!(at(&doc, "S.rows[0].1").unwrap(), Value::from("r0c1"));
        assert_eq!(at(&doc, "S.rows.0.0").unwrap(), Value::from("r0c0"));
    }

    #[test]
    fn test_get_missing_intermediate_is_absent() {
        let doc = Value::from(json!({"a": null}));
        assert_eq!(at(&doc, "S.a.b.c").unwrap(), Value::Undefined);
        assert_eq!(at(&doc, "S.x[3].y").unwrap(), Value::Undefined);
    }

    #[test]
    fn test_get_explicit_null_is_not_absent() {
        let doc = Value::from(json!({"a": null}));
        assert_eq!(at(&doc, "S.a").unwrap(), Value::Null);
    }

    #[test]
    fn test_get_type_mismatch() {
        let doc = Value::from(json!({"a": 5, "obj": {"0": "x"}, "arr": [1]}));
        assert!(matches!(at(&doc, "S.a.b"), Err(PathError::TypeMismatch { .. })));
        assert!(matches!(at(&doc, "S.obj[0]"), Err(PathError::TypeMismatch { .. })));
        assert!(matches!(at(&doc, "S.arr.x"), Err(PathError::TypeMismatch { .. })));
    }

    #[test]
    fn test_get_quoted_key_with_dots() {
        let doc = Value::from(json!({"obj": {"a.b": {"c.d": 7}}}));
        assert_eq!(at(&doc, r#"S.obj["a.b"]['c.d']"#).unwrap(), Value::from(7));
    }
}
