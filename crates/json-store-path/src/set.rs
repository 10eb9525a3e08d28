use indexmap::map::Entry;

use crate::parser::Segment;
use crate::step::{classify, type_mismatch, vivify_for, Step};
use crate::value::Value;
use crate::PathError;

/// Set (or delete) a value in the graph by parsed path.
///
/// Missing intermediate containers (absent keys, `Null`, `Undefined`) are
/// created on the way down: an array when the following segment is a
/// bracketed index, an object otherwise. Writing past the end of an array
/// grows it, filling the gap with [`Value::Undefined`].
///
/// With `delete_key` set and a nullish `value`, a terminal object key is
/// removed instead of assigned. Any other value (including `false`, `0` and
/// `""`) is assigned as usual.
///
/// An empty path replaces the root, which must stay a container.
///
/// Intermediates created before a failing segment are kept.
///
/// # Example
///
/// ```
/// use json_store_path::{parse_path, set, Value};
/// use serde_json::json;
///
/// let mut doc = Value::object();
/// set(&mut doc, &parse_path("S.list[2].name", "S").unwrap(), Value::from("x"), false).unwrap();
/// assert_eq!(doc.to_json(), json!({"list": [null, null, {"name": "x"}]}));
/// ```
pub fn set(
    root: &mut Value,
    segments: &[Segment],
    value: Value,
    delete_key: bool,
) -> Result<(), PathError> {
    let Some((last, init)) = segments.split_last() else {
        return replace_root(root, value);
    };
    let mut current = root;
    for (i, segment) in init.iter().enumerate() {
        current = descend(current, segment, &segments[i + 1])?;
    }
    put(current, last, value, delete_key)
}

fn replace_root(root: &mut Value, value: Value) -> Result<(), PathError> {
    if value.kind().is_none() {
        return Err(PathError::TypeMismatch {
            segment: String::new(),
            expected: root.kind().unwrap_or(crate::ContainerKind::Object),
            found: value.type_name(),
        });
    }
    *root = value;
    Ok(())
}

/// Steps into the child addressed by `segment`, vivifying it for `next` if
/// it is missing.
fn descend<'a>(
    current: &'a mut Value,
    segment: &Segment,
    next: &Segment,
) -> Result<&'a mut Value, PathError> {
    let step = classify(segment, current.kind())?;
    match (step, current) {
        (Step::Index(idx), Value::Array(items)) => {
            if idx >= items.len() {
                let child = vivify_for(next)?;
                grow(items, idx)?;
                items.push(child);
            } else if items[idx].is_nullish() {
                items[idx] = vivify_for(next)?;
            }
            Ok(&mut items[idx])
        }
        (Step::Key(key), Value::Object(map)) => match map.entry(key.to_string()) {
            Entry::Occupied(entry) => {
                let slot = entry.into_mut();
                if slot.is_nullish() {
                    *slot = vivify_for(next)?;
                }
                Ok(slot)
            }
            Entry::Vacant(entry) => Ok(entry.insert(vivify_for(next)?)),
        },
        (step, other) => Err(type_mismatch(segment, &step, other)),
    }
}

/// Pads `items` with holes up to length `len`. Fails instead of aborting
/// when the allocation cannot be made.
fn grow(items: &mut Vec<Value>, len: usize) -> Result<(), PathError> {
    items
        .try_reserve(len + 1 - items.len())
        .map_err(|_| PathError::InvalidIndex(len.to_string()))?;
    items.resize(len, Value::Undefined);
    Ok(())
}

fn put(current: &mut Value, segment: &Segment, value: Value, delete_key: bool) -> Result<(), PathError> {
    let step = classify(segment, current.kind())?;
    match (step, current) {
        (Step::Index(idx), Value::Array(items)) => {
            if idx >= items.len() {
                grow(items, idx)?;
                items.push(value);
            } else {
                items[idx] = value;
            }
        }
        (Step::Key(key), Value::Object(map)) => {
            if delete_key && value.is_nullish() {
                map.shift_remove(key);
            } else {
                map.insert(key.to_string(), value);
            }
        }
        (step, other) => return Err(type_mismatch(segment, &step, other)),
    }
    Ok(())
}
