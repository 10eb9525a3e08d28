//! Path-addressed access to a JSON-like value graph.
//!
//! Paths look like `Store.users[0]["first.name"]`: a store prefix followed by
//! dot segments and bracket groups. This crate parses such paths, decides for
//! every segment whether it addresses an array slot or an object key, and
//! reads or writes the graph along them, creating missing containers on
//! write.
//!
//! # Example
//!
//! ```
//! use json_store_path::{get, parse_path, set, Value};
//! use serde_json::json;
//!
//! let mut doc = Value::object();
//! let path = parse_path("Store.x.y[0]", "Store").unwrap();
//! set(&mut doc, &path, Value::from(20), false).unwrap();
//! assert_eq!(doc.to_json(), json!({"x": {"y": [20]}}));
//! assert_eq!(get(&doc, &path).unwrap(), Some(&Value::from(20)));
//! ```

use thiserror::Error;

pub mod get;
pub mod parser;
pub mod set;
pub mod step;
pub mod util;
pub mod value;

pub use get::{get, read};
pub use parser::{parse_path, Segment};
pub use set::set;
pub use step::{classify, vivify_for, Step, MAX_ARRAY_INDEX};
pub use util::{find_closing_bracket, is_integer, is_quoted, looks_like_expression, strip_quotes};
pub use value::{number_to_string, ContainerKind, Object, Value};

/// Errors raised while parsing a path or applying it to a value graph.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Prefix - {prefix} is not found in path '{path}'")]
    PrefixMismatch { prefix: String, path: String },
    #[error("Expected an {expected} at '{segment}' but found {found}")]
    TypeMismatch {
        segment: String,
        expected: ContainerKind,
        found: &'static str,
    },
    #[error("Invalid array index '{0}'")]
    InvalidIndex(String),
    #[error("Unable to resolve dynamic index '{0}'")]
    UnresolvableIndex(String),
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },
}
