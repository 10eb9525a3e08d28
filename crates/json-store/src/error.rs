use json_store_expression::ExprError;
use json_store_path::PathError;
use thiserror::Error;

/// Errors surfaced by [`Store`](crate::Store) operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    /// Parsing or applying a path failed.
    #[error(transparent)]
    Path(#[from] PathError),

    /// Evaluating an expression or a foreign reference failed.
    #[error(transparent)]
    Expression(ExprError),
}

impl From<ExprError> for StoreError {
    fn from(err: ExprError) -> Self {
        match err {
            ExprError::Path(path) => StoreError::Path(path),
            other => StoreError::Expression(other),
        }
    }
}
