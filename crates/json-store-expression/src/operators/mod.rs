//! Built-in operators.

pub mod arithmetic;
pub mod comparison;
pub mod logical;

use crate::types::{operators_to_map, OperatorDefinition, OperatorMap};
use std::sync::Arc;

/// All operators combined.
pub fn all_operators() -> Vec<Arc<OperatorDefinition>> {
    let mut ops = Vec::new();
    ops.extend(arithmetic::operators());
    ops.extend(comparison::operators());
    ops.extend(logical::operators());
    ops
}

/// Build the operator map from all operators.
pub fn operators_map() -> OperatorMap {
    operators_to_map(all_operators())
}
