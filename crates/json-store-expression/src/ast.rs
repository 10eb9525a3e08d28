//! Parsed expression tree.

use json_store_path::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Number, string, `true`, `false`, `null` or `undefined`.
    Literal(Value),
    /// A path into a named value source, e.g. `Store.items[0]`.
    Reference(String),
    /// `operator` is a key of the operator map.
    Operation {
        operator: &'static str,
        operands: Vec<Expr>,
    },
}

impl Expr {
    pub fn op(operator: &'static str, operands: Vec<Expr>) -> Self {
        Expr::Operation { operator, operands }
    }
}
