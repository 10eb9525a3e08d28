//! End-to-end parse + get/set behaviour: which container a segment
//! addresses, what gets created, and what gets deleted.

use json_store_path::{get, parse_path, read, set, PathError, Value};
use serde_json::json;

const PREFIX: &str = "Store";

fn write(doc: &mut Value, path: &str, value: Value) {
    let segments = parse_path(path, PREFIX).unwrap_or_else(|e| panic!("parse {}: {}", path, e));
    set(doc, &segments, value, false).unwrap_or_else(|e| panic!("set {}: {}", path, e));
}

fn remove(doc: &mut Value, path: &str) {
    let segments = parse_path(path, PREFIX).unwrap();
    set(doc, &segments, Value::Undefined, true).unwrap();
}

fn at(doc: &Value, path: &str) -> Value {
    read(doc, &parse_path(path, PREFIX).unwrap()).unwrap()
}

fn keys(v: &Value) -> Vec<String> {
    v.as_object().unwrap().keys().cloned().collect()
}

#[test]
fn test_empty_array_bracket_write_leaves_holes() {
    let mut doc = Value::from(json!({"arr": []}));
    write(&mut doc, "Store.arr[2]", Value::from("c"));
    let arr = at(&doc, "Store.arr");
    let items = arr.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0], Value::Undefined);
    assert_eq!(items[1], Value::Undefined);
    assert_eq!(items[2], Value::from("c"));
}

#[test]
fn test_existing_array_kind_is_kept_by_dot_numeric() {
    let mut doc = Value::from(json!({"arr": ["a", "b"]}));
    write(&mut doc, "Store.arr.0", Value::from("A"));
    write(&mut doc, "Store.arr.3", Value::from("D"));
    assert_eq!(doc.to_json(), json!({"arr": ["A", "b", null, "D"]}));
}

#[test]
fn test_existing_object_kind_is_kept_by_dot_numeric() {
    let mut doc = Value::from(json!({"obj": {"a": 1}}));
    write(&mut doc, "Store.obj.0", Value::from("zero"));
    assert_eq!(doc.to_json(), json!({"obj": {"a": 1, "0": "zero"}}));
}

#[test]
fn test_quoted_numeric_bracket_is_key() {
    let mut doc = Value::object();
    write(&mut doc, r#"Store.data["0"]"#, Value::from(1));
    write(&mut doc, "Store.data['1']", Value::from(2));
    assert_eq!(doc.to_json(), json!({"data": {"0": 1, "1": 2}}));
}

#[test]
fn test_quoted_keys_with_dots_and_spaces() {
    let mut doc = Value::object();
    write(&mut doc, r#"Store.config["mail.smtp host"]"#, Value::from("localhost"));
    assert_eq!(doc.to_json(), json!({"config": {"mail.smtp host": "localhost"}}));
    assert_eq!(at(&doc, "Store.config['mail.smtp host']"), Value::from("localhost"));
}

#[test]
fn test_nested_table_mixed_notation() {
    let mut doc = Value::object();
    write(&mut doc, "Store.table[0][1]", Value::from("r0c1"));
    write(&mut doc, "Store.table[1].name", Value::from("row1"));
    assert_eq!(
        doc.to_json(),
        json!({"table": [[null, "r0c1"], {"name": "row1"}]})
    );
    assert_eq!(at(&doc, "Store.table.0.1"), Value::from("r0c1"));
}

#[test]
fn test_delete_preserves_remaining_key_order() {
    let mut doc = Value::from(json!({"x": {"y": 1, "z": 2, "h": 3}}));
    remove(&mut doc, "Store.x.y");
    assert_eq!(keys(&at(&doc, "Store.x")), vec!["z", "h"]);
    assert_eq!(at(&doc, "Store.x.y"), Value::Undefined);
}

#[test]
fn test_delete_flag_with_value_updates() {
    let mut doc = Value::from(json!({"x": {"y": 1, "z": 2}}));
    let segments = parse_path("Store.x.z", PREFIX).unwrap();
    set(&mut doc, &segments, Value::from(5), true).unwrap();
    assert_eq!(doc.to_json(), json!({"x": {"y": 1, "z": 5}}));
}

#[test]
fn test_false_and_zero_are_not_deleted() {
    let mut doc = Value::object();
    for (path, value) in [
        ("Store.f", Value::Bool(false)),
        ("Store.z", Value::from(0)),
        ("Store.s", Value::from("")),
    ] {
        let segments = parse_path(path, PREFIX).unwrap();
        set(&mut doc, &segments, value, true).unwrap();
    }
    assert_eq!(doc.to_json(), json!({"f": false, "z": 0, "s": ""}));
}

#[test]
fn test_array_slot_delete_leaves_hole() {
    let mut doc = Value::from(json!({"arr": [1, 2, 3]}));
    remove(&mut doc, "Store.arr[1]");
    let arr = at(&doc, "Store.arr");
    assert_eq!(arr.as_array().unwrap().len(), 3);
    assert_eq!(at(&doc, "Store.arr[1]"), Value::Undefined);
}

#[test]
fn test_read_never_vivifies() {
    let doc = Value::object();
    let segments = parse_path("Store.a.b[3].c", PREFIX).unwrap();
    assert_eq!(get(&doc, &segments).unwrap(), None);
    assert_eq!(doc, Value::object());
}

#[test]
fn test_scalar_in_the_way_is_type_mismatch() {
    let mut doc = Value::from(json!({"a": 1}));
    let segments = parse_path("Store.a.b", PREFIX).unwrap();
    let err = set(&mut doc, &segments, Value::from(2), false).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Expected an object at '.b' but found number"
    );
    assert!(matches!(get(&doc, &segments), Err(PathError::TypeMismatch { .. })));
}

#[test]
fn test_unresolved_dynamic_segment_fails() {
    let mut doc = Value::object();
    let segments = parse_path("Store.items[Other.idx]", PREFIX).unwrap();
    assert_eq!(
        set(&mut doc, &segments, Value::from(1), false),
        Err(PathError::UnresolvableIndex("Other.idx".to_string()))
    );
}
