use crate::ast::Expr;
use crate::error::ExprError;
use crate::eval_ctx::EvalCtx;
use crate::types::{Arity, OperatorDefinition};
use crate::util;
use json_store_path::Value;
use std::sync::Arc;

fn and_eval(expr: &[Expr], ctx: &mut EvalCtx<'_>) -> Result<Value, ExprError> {
    let mut acc = crate::evaluate(&expr[0], ctx)?;
    for e in &expr[1..] {
        if !util::is_truthy(&acc) {
            return Ok(acc);
        }
        acc = crate::evaluate(e, ctx)?;
    }
    Ok(acc)
}

fn or_eval(expr: &[Expr], ctx: &mut EvalCtx<'_>) -> Result<Value, ExprError> {
    let mut acc = crate::evaluate(&expr[0], ctx)?;
    for e in &expr[1..] {
        if util::is_truthy(&acc) {
            return Ok(acc);
        }
        acc = crate::evaluate(e, ctx)?;
    }
    Ok(acc)
}

fn not_eval(expr: &[Expr], ctx: &mut EvalCtx<'_>) -> Result<Value, ExprError> {
    let val = crate::evaluate(&expr[0], ctx)?;
    Ok(Value::Bool(!util::is_truthy(&val)))
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition {
            name: "&&",
            aliases: &["and"],
            arity: Arity::Variadic,
            eval_fn: and_eval,
        }),
        Arc::new(OperatorDefinition {
            name: "||",
            aliases: &["or"],
            arity: Arity::Variadic,
            eval_fn: or_eval,
        }),
        Arc::new(OperatorDefinition {
            name: "!",
            aliases: &["not"],
            arity: Arity::Fixed(1),
            eval_fn: not_eval,
        }),
    ]
}
