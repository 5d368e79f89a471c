//! Evaluation engine: function dispatch, processing context, and the
//! top-level resolve operations.

mod condition;
mod context;
mod error;
mod evaluator;
mod registry;

pub use context::EvalContext;
pub use error::{EvalError, ResolveError, compute_suggestions};
pub use evaluator::eval_document;
pub use registry::{DRY_RUN_VALUE, FunctionRegistry, SyntaxReport, TagFn};
