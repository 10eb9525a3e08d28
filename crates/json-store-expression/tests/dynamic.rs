//! Dynamic bracket resolution across several named sources.

use json_store_expression::{resolve_dynamic_path, ObjectSource, SourceRegistry, DEFAULT_MAX_PASSES};
use json_store_path::{parse_path, read, PathError, Value};
use serde_json::json;
use std::rc::Rc;

fn sources() -> SourceRegistry {
    SourceRegistry::new()
        .with(Rc::new(ObjectSource::new("Idx", Value::from(json!({"idx": 1, "field": "title"})))))
        .with(Rc::new(ObjectSource::new(
            "Data",
            Value::from(json!({"items": [{"title": "a"}, {"title": "b"}], "pos": [1, 0]})),
        )))
}

fn lookup(path: &str) -> Result<Value, PathError> {
    let data = Value::from(json!({"items": [{"title": "a"}, {"title": "b"}], "pos": [1, 0]}));
    let resolved = resolve_dynamic_path(path, &sources(), DEFAULT_MAX_PASSES);
    read(&data, &parse_path(&resolved, "Data")?)
}

#[test]
fn test_cross_source_index() {
    assert_eq!(lookup("Data.items[Idx.idx].title").unwrap(), Value::from("b"));
    assert_eq!(lookup("Data.items[Idx.idx - 1][Idx.field]").unwrap(), Value::from("a"));
}

#[test]
fn test_nested_lookup_through_other_source() {
    assert_eq!(lookup("Data.items[Data.pos[Idx.idx]].title").unwrap(), Value::from("a"));
}

#[test]
fn test_unresolved_bracket_surfaces_on_access() {
    assert_eq!(
        lookup("Data.items[Missing.idx]"),
        Err(PathError::UnresolvableIndex("Missing.idx".to_string()))
    );
}

#[test]
fn test_zero_pass_cap_leaves_path_alone() {
    assert_eq!(
        resolve_dynamic_path("Data.items[Idx.idx]", &sources(), 0),
        "Data.items[Idx.idx]"
    );
}
