use crate::ast::Expr;
use crate::error::ExprError;
use crate::eval_ctx::EvalCtx;
use crate::types::{Arity, OperatorDefinition};
use crate::util;
use json_store_path::Value;
use std::sync::Arc;

fn operands(expr: &[Expr], ctx: &mut EvalCtx<'_>) -> Result<(Value, Value), ExprError> {
    let left = crate::evaluate(&expr[0], ctx)?;
    let right = crate::evaluate(&expr[1], ctx)?;
    Ok((left, right))
}

fn eq_eval(expr: &[Expr], ctx: &mut EvalCtx<'_>) -> Result<Value, ExprError> {
    let (left, right) = operands(expr, ctx)?;
    Ok(Value::Bool(util::loose_eq(&left, &right)))
}

fn ne_eval(expr: &[Expr], ctx: &mut EvalCtx<'_>) -> Result<Value, ExprError> {
    let (left, right) = operands(expr, ctx)?;
    Ok(Value::Bool(!util::loose_eq(&left, &right)))
}

fn gt_eval(expr: &[Expr], ctx: &mut EvalCtx<'_>) -> Result<Value, ExprError> {
    let (left, right) = operands(expr, ctx)?;
    Ok(Value::Bool(util::js_gt(&left, &right)))
}

fn ge_eval(expr: &[Expr], ctx: &mut EvalCtx<'_>) -> Result<Value, ExprError> {
    let (left, right) = operands(expr, ctx)?;
    Ok(Value::Bool(util::js_gte(&left, &right)))
}

fn lt_eval(expr: &[Expr], ctx: &mut EvalCtx<'_>) -> Result<Value, ExprError> {
    let (left, right) = operands(expr, ctx)?;
    Ok(Value::Bool(util::js_lt(&left, &right)))
}

fn le_eval(expr: &[Expr], ctx: &mut EvalCtx<'_>) -> Result<Value, ExprError> {
    let (left, right) = operands(expr, ctx)?;
    Ok(Value::Bool(util::js_lte(&left, &right)))
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition {
            name: "==",
            aliases: &["eq"],
            arity: Arity::Fixed(2),
            eval_fn: eq_eval,
        }),
        Arc::new(OperatorDefinition {
            name: "!=",
            aliases: &["ne"],
            arity: Arity::Fixed(2),
            eval_fn: ne_eval,
        }),
        Arc::new(OperatorDefinition {
            name: ">",
            aliases: &["gt"],
            arity: Arity::Fixed(2),
            eval_fn: gt_eval,
        }),
        Arc::new(OperatorDefinition {
            name: ">=",
            aliases: &["ge"],
            arity: Arity::Fixed(2),
            eval_fn: ge_eval,
        }),
        Arc::new(OperatorDefinition {
            name: "<",
            aliases: &["lt"],
            arity: Arity::Fixed(2),
            eval_fn: lt_eval,
        }),
        Arc::new(OperatorDefinition {
            name: "<=",
            aliases: &["le"],
            arity: Arity::Fixed(2),
            eval_fn: le_eval,
        }),
    ]
}
