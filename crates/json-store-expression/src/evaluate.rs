use crate::ast::Expr;
use crate::error::ExprError;
use crate::eval_ctx::EvalCtx;
use crate::operators::operators_map;
use crate::parser::parse_expression;
use crate::source::SourceRegistry;
use crate::types::{assert_arity, OperatorMap};
use json_store_path::Value;
use std::sync::{Arc, OnceLock};

/// Evaluates a parsed expression.
///
/// - Literals evaluate to themselves.
/// - References are resolved by the named value source owning their prefix.
/// - Operations dispatch to the matching operator.
pub fn evaluate(expr: &Expr, ctx: &mut EvalCtx<'_>) -> Result<Value, ExprError> {
    match expr {
        Expr::Literal(v) => Ok(v.clone()),
        Expr::Reference(path) => ctx.sources.resolve(path),
        Expr::Operation { operator, operands } => {
            let def = ctx
                .operators
                .get(*operator)
                .cloned()
                .ok_or_else(|| ExprError::UnknownOperator(operator.to_string()))?;
            assert_arity(def.name, &def.arity, operands.len())?;
            (def.eval_fn)(operands, ctx)
        }
    }
}

/// The built-in operator map, built once.
pub fn default_operators() -> Arc<OperatorMap> {
    static OPERATORS: OnceLock<Arc<OperatorMap>> = OnceLock::new();
    Arc::clone(OPERATORS.get_or_init(|| Arc::new(operators_map())))
}

/// Parses and evaluates `source` with the built-in operators.
///
/// # Example
///
/// ```
/// use json_store_expression::{evaluate_str, SourceRegistry};
/// use json_store_path::Value;
///
/// let sources = SourceRegistry::new();
/// assert_eq!(evaluate_str("(1 + 2) * 4", &sources).unwrap(), Value::from(12));
/// assert_eq!(evaluate_str("'a' + 1", &sources).unwrap(), Value::from("a1"));
/// ```
pub fn evaluate_str(source: &str, sources: &SourceRegistry) -> Result<Value, ExprError> {
    let expr = parse_expression(source)?;
    let mut ctx = EvalCtx::new(sources, default_operators());
    evaluate(&expr, &mut ctx)
}
