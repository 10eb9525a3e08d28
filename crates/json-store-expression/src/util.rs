//! Value coercion helpers with JavaScript semantics.

use crate::error::ExprError;
use json_store_path::{number_to_string, Value};

/// Converts a value to a number. `NaN` results collapse to `0`.
pub fn num(value: &Value) -> f64 {
    let n = match value {
        Value::Undefined => f64::NAN,
        Value::Null => 0.0,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Number(n) => *n,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        Value::Array(_) | Value::Object(_) => f64::NAN,
    };
    if n.is_nan() {
        0.0
    } else {
        n
    }
}

/// Converts a value to a string.
pub fn str_val(value: &Value) -> String {
    match value {
        Value::Undefined => "undefined".to_string(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(*n),
        Value::String(s) => s.clone(),
        // Objects/arrays → JSON
        other => other.to_string(),
    }
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Undefined | Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => *n != 0.0 && !n.is_nan(),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// `+`: string concatenation when either side is a string, numeric
/// addition otherwise.
pub fn plus(a: &Value, b: &Value) -> Value {
    if matches!(a, Value::String(_)) || matches!(b, Value::String(_)) {
        Value::String(str_val(a) + &str_val(b))
    } else {
        Value::Number(num(a) + num(b))
    }
}

pub fn slash(a: &Value, b: &Value) -> Result<Value, ExprError> {
    let divisor = num(b);
    if divisor == 0.0 {
        return Err(ExprError::DivisionByZero);
    }
    let res = num(a) / divisor;
    Ok(Value::Number(if res.is_finite() { res } else { 0.0 }))
}

pub fn modulo(a: &Value, b: &Value) -> Result<Value, ExprError> {
    let divisor = num(b);
    if divisor == 0.0 {
        return Err(ExprError::DivisionByZero);
    }
    let res = num(a) % divisor;
    Ok(Value::Number(if res.is_finite() { res } else { 0.0 }))
}

// -------------------------------------------------------------- Comparison helpers

pub fn js_lt(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::String(sa), Value::String(sb)) => sa < sb,
        _ => num(a) < num(b),
    }
}

pub fn js_lte(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::String(sa), Value::String(sb)) => sa <= sb,
        _ => num(a) <= num(b),
    }
}

pub fn js_gt(a: &Value, b: &Value) -> bool {
    js_lt(b, a)
}

pub fn js_gte(a: &Value, b: &Value) -> bool {
    js_lte(b, a)
}

/// Loose equality: `null == undefined`, numbers compare with numeric
/// strings and booleans, containers compare structurally.
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Undefined | Value::Null, Value::Undefined | Value::Null) => true,
        (Value::Undefined | Value::Null, _) | (_, Value::Undefined | Value::Null) => false,
        (Value::Number(_) | Value::Bool(_), Value::String(_) | Value::Bool(_) | Value::Number(_))
        | (Value::String(_), Value::Number(_) | Value::Bool(_)) => num(a) == num(b),
        _ => a == b,
    }
}
