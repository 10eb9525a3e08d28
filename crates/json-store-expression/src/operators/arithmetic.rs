use crate::ast::Expr;
use crate::error::ExprError;
use crate::eval_ctx::EvalCtx;
use crate::types::{Arity, OperatorDefinition};
use crate::util;
use json_store_path::Value;
use std::sync::Arc;

fn add_eval(expr: &[Expr], ctx: &mut EvalCtx<'_>) -> Result<Value, ExprError> {
    let first = crate::evaluate(&expr[0], ctx)?;
    expr[1..].iter().try_fold(first, |acc, e| {
        Ok(util::plus(&acc, &crate::evaluate(e, ctx)?))
    })
}

fn subtract_eval(expr: &[Expr], ctx: &mut EvalCtx<'_>) -> Result<Value, ExprError> {
    let first = util::num(&crate::evaluate(&expr[0], ctx)?);
    expr[1..]
        .iter()
        .try_fold(first, |acc, e| {
            Ok(acc - util::num(&crate::evaluate(e, ctx)?))
        })
        .map(Value::Number)
}

fn multiply_eval(expr: &[Expr], ctx: &mut EvalCtx<'_>) -> Result<Value, ExprError> {
    expr.iter()
        .try_fold(1.0f64, |acc, e| {
            Ok(util::num(&crate::evaluate(e, ctx)?) * acc)
        })
        .map(Value::Number)
}

fn divide_eval(expr: &[Expr], ctx: &mut EvalCtx<'_>) -> Result<Value, ExprError> {
    let start = crate::evaluate(&expr[0], ctx)?;
    expr[1..]
        .iter()
        .try_fold(start, |acc, e| util::slash(&acc, &crate::evaluate(e, ctx)?))
}

fn mod_eval(expr: &[Expr], ctx: &mut EvalCtx<'_>) -> Result<Value, ExprError> {
    let start = crate::evaluate(&expr[0], ctx)?;
    expr[1..]
        .iter()
        .try_fold(start, |acc, e| util::modulo(&acc, &crate::evaluate(e, ctx)?))
}

fn negate_eval(expr: &[Expr], ctx: &mut EvalCtx<'_>) -> Result<Value, ExprError> {
    Ok(Value::Number(-util::num(&crate::evaluate(&expr[0], ctx)?)))
}

fn num_eval(expr: &[Expr], ctx: &mut EvalCtx<'_>) -> Result<Value, ExprError> {
    Ok(Value::Number(util::num(&crate::evaluate(&expr[0], ctx)?)))
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition {
            name: "+",
            aliases: &["add"],
            arity: Arity::Variadic,
            eval_fn: add_eval,
        }),
        Arc::new(OperatorDefinition {
            name: "-",
            aliases: &["subtract"],
            arity: Arity::Variadic,
            eval_fn: subtract_eval,
        }),
        Arc::new(OperatorDefinition {
            name: "*",
            aliases: &["multiply"],
            arity: Arity::Variadic,
            eval_fn: multiply_eval,
        }),
        Arc::new(OperatorDefinition {
            name: "/",
            aliases: &["divide"],
            arity: Arity::Variadic,
            eval_fn: divide_eval,
        }),
        Arc::new(OperatorDefinition {
            name: "%",
            aliases: &["mod"],
            arity: Arity::Variadic,
            eval_fn: mod_eval,
        }),
        Arc::new(OperatorDefinition {
            name: "neg",
            aliases: &[],
            arity: Arity::Fixed(1),
            eval_fn: negate_eval,
        }),
        Arc::new(OperatorDefinition {
            name: "num",
            aliases: &[],
            arity: Arity::Fixed(1),
            eval_fn: num_eval,
        }),
    ]
}
