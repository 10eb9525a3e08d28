use crate::source::SourceRegistry;
use crate::types::OperatorMap;
use std::sync::Arc;

/// The execution context passed to every operator eval function.
pub struct EvalCtx<'a> {
    /// Named value sources that references are resolved against.
    pub sources: &'a SourceRegistry,
    /// The operator map used for recursive evaluation.
    pub operators: Arc<OperatorMap>,
}

impl<'a> EvalCtx<'a> {
    pub fn new(sources: &'a SourceRegistry, operators: Arc<OperatorMap>) -> Self {
        EvalCtx { sources, operators }
    }
}
