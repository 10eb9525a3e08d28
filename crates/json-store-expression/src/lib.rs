//! Expression evaluation over named value sources.
//!
//! Expressions are infix (`Store.offset - 1`, `Data.items[Idx.i] * 2`), and
//! their references are resolved by [`ValueSource`]s registered under a
//! prefix. The same machinery rewrites dynamic brackets in store paths
//! ([`resolve_dynamic_path`]).
//!
//! # Example
//!
//! ```
//! use json_store_expression::{evaluate_str, ObjectSource, SourceRegistry};
//! use json_store_path::Value;
//! use serde_json::json;
//! use std::rc::Rc;
//!
//! let store = ObjectSource::new("Store", Value::from(json!({"offset": 3})));
//! let sources = SourceRegistry::new().with(Rc::new(store));
//!
//! let result = evaluate_str("Store.offset - 1", &sources).unwrap();
//! assert_eq!(result, Value::from(2));
//! ```

pub mod ast;
pub mod dynamic;
pub mod error;
pub mod eval_ctx;
pub mod evaluate;
pub mod operators;
pub mod parser;
pub mod source;
pub mod types;
pub mod util;

pub use ast::Expr;
pub use dynamic::{resolve_dynamic_path, DEFAULT_MAX_PASSES};
pub use error::ExprError;
pub use eval_ctx::EvalCtx;
pub use evaluate::{default_operators, evaluate, evaluate_str};
pub use operators::operators_map;
pub use parser::parse_expression;
pub use source::{has_prefix, ObjectSource, SourceRegistry, ValueSource};
pub use types::{Arity, OperatorDefinition, OperatorMap};
