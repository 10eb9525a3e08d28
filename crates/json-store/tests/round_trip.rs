use json_store::{listener, Store};
use json_store_path::Value;
use proptest::prelude::*;
use serde_json::json;
use std::cell::Cell;
use std::rc::Rc;

fn key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,6}"
}

fn quoted_key() -> impl Strategy<Value = String> {
    "[a-z.@# -]{0,8}"
}

proptest! {
    #[test]
    fn prop_write_then_read_dotted(keys in prop::collection::vec(key(), 1..5), n in any::<i32>()) {
        let store = Store::new(Value::object(), "Store");
        let path = format!("Store.{}", keys.join("."));
        store.write(&path, Value::from(n)).unwrap();
        prop_assert_eq!(store.read(&path).unwrap(), Value::from(n));
    }

    #[test]
    fn prop_write_then_read_indexed(i in 0usize..32, j in 0usize..4, s in "[a-z]{0,10}") {
        let store = Store::new(Value::object(), "Store");
        let path = format!("Store.rows[{}].cells[{}]", i, j);
        store.write(&path, Value::from(s.clone())).unwrap();
        prop_assert_eq!(store.read(&path).unwrap(), Value::from(s));

        let rows = store.read("Store.rows").unwrap();
        prop_assert_eq!(rows.as_array().map(Vec::len), Some(i + 1));
    }

    #[test]
    fn prop_quoted_key_is_single_object_key(k in quoted_key()) {
        let store = Store::new(Value::object(), "Store");
        store.write(&format!("Store.obj[\"{}\"]", k), Value::Bool(true)).unwrap();

        let mut expected = serde_json::Map::new();
        expected.insert(k.clone(), json!(true));
        prop_assert_eq!(store.read("Store.obj").unwrap().to_json(), serde_json::Value::Object(expected));
        prop_assert_eq!(store.read(&format!("Store.obj['{}']", k)).unwrap(), Value::Bool(true));
    }

    #[test]
    fn prop_ancestor_write_notifies_once(depth in 1usize..5, cut in 0usize..5) {
        let store = Store::new(Value::object(), "Store");
        let segments: Vec<String> = (0..depth).map(|d| format!("k{}", d)).collect();
        let leaf = format!("Store.{}", segments.join("."));
        let ancestor = if cut >= depth {
            "Store".to_string()
        } else {
            format!("Store.{}", segments[..=cut].join("."))
        };

        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        let callback = listener(move |_, _| seen.set(seen.get() + 1));
        let _sub = store.add_listener(Rc::clone(&callback), [leaf.as_str(), ancestor.as_str()]);

        store.write(&ancestor, Value::object()).unwrap();
        prop_assert_eq!(count.get(), 1);
    }
}
