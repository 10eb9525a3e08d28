use json_store_path::PathError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    #[error("{0}")]
    ArityError(String),

    #[error("Syntax error in '{expr}': {reason}")]
    Syntax { expr: String, reason: String },

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("Unknown reference: {0}")]
    UnknownReference(String),

    #[error("DIVISION_BY_ZERO")]
    DivisionByZero,

    #[error(transparent)]
    Path(#[from] PathError),
}
