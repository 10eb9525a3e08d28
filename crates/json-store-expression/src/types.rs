use crate::ast::Expr;
use crate::error::ExprError;
use crate::eval_ctx::EvalCtx;
use json_store_path::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Operator arity.
#[derive(Debug, Clone, PartialEq)]
pub enum Arity {
    /// Exactly `n` operands.
    Fixed(usize),
    /// At least 2 operands.
    Variadic,
}

/// The type of an operator evaluation function. Receives the unevaluated
/// operands so that short-circuiting operators can skip some of them.
pub type EvalFn = for<'a> fn(&[Expr], &mut EvalCtx<'a>) -> Result<Value, ExprError>;

pub struct OperatorDefinition {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub arity: Arity,
    pub eval_fn: EvalFn,
}

/// Map of operator name/alias -> definition.
pub type OperatorMap = HashMap<String, Arc<OperatorDefinition>>;

/// Asserts that an operation has the correct number of operands.
pub fn assert_arity(operator: &str, arity: &Arity, operands: usize) -> Result<(), ExprError> {
    match arity {
        Arity::Fixed(n) if operands != *n => Err(ExprError::ArityError(format!(
            "\"{}\" operator expects {} operands.",
            operator, n
        ))),
        Arity::Variadic if operands < 2 => Err(ExprError::ArityError(format!(
            "\"{}\" operator expects at least two operands.",
            operator
        ))),
        _ => Ok(()),
    }
}

/// Builds an `OperatorMap` from a list of operator definitions.
pub fn operators_to_map(operators: Vec<Arc<OperatorDefinition>>) -> OperatorMap {
    let mut map = HashMap::new();
    for op in operators {
        map.insert(op.name.to_string(), Arc::clone(&op));
        for alias in op.aliases {
            map.insert(alias.to_string(), Arc::clone(&op));
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_arity() {
        assert!(assert_arity("!", &Arity::Fixed(1), 1).is_ok());
        assert!(assert_arity("!", &Arity::Fixed(1), 2).is_err());
        assert!(assert_arity("+", &Arity::Variadic, 3).is_ok());
        let err = assert_arity("+", &Arity::Variadic, 1).unwrap_err();
        assert_eq!(err.to_string(), "\"+\" operator expects at least two operands.");
    }
}
