//! Function registry and the top-level resolve operations.
//!
//! The registry maps function names to handlers and is the engine handle:
//! callers register their catalogue once at startup, then use `resolve`,
//! `validate_syntax`, and `evaluate_condition` against it. The core ships
//! only `get_param` and `set_param`, which read/write the processing
//! context; everything else is an external catalogue.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::interpreter::condition;
use crate::interpreter::context::EvalContext;
use crate::interpreter::error::{EvalError, ResolveError, compute_suggestions};
use crate::interpreter::evaluator::eval_document;
use crate::parser::parse_document;

/// A function handler: receives the processing context and the ordered,
/// fully-resolved string parameters.
///
/// Handlers may read/write the context but must not retain references to it
/// beyond their own invocation; the context is owned by the top-level
/// resolution.
pub type TagFn = fn(&mut EvalContext, &[String]) -> Result<String, EvalError>;

/// The fixed placeholder dispatch returns in dry-run mode instead of
/// invoking a handler.
pub const DRY_RUN_VALUE: &str = "dry_run";

/// Registry mapping function names to handlers.
///
/// Registered at process start and immutable thereafter.
#[derive(Debug, Default)]
pub struct FunctionRegistry {
    handlers: BTreeMap<String, TagFn>,
}

/// The result of a dry-run syntax validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntaxReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl FunctionRegistry {
    /// Create an empty registry with no functions, not even the builtins.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in `get_param`/`set_param` handlers.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("get_param", get_param);
        registry.register("set_param", set_param);
        registry
    }

    /// Register a handler under `name`, replacing any previous handler.
    pub fn register(&mut self, name: impl Into<String>, handler: TagFn) {
        self.handlers.insert(name.into(), handler);
    }

    /// Whether a handler is registered under `name`.
    pub fn has_function(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Dispatch a call to the named handler.
    ///
    /// The lookup happens before the dry-run check so that dry runs still
    /// detect unknown functions; in dry-run mode the handler itself is never
    /// invoked and [`DRY_RUN_VALUE`] is returned instead.
    pub fn dispatch(
        &self,
        name: &str,
        params: &[String],
        ctx: &mut EvalContext,
    ) -> Result<String, EvalError> {
        let Some(handler) = self.handlers.get(name) else {
            let available: Vec<String> = self.handlers.keys().cloned().collect();
            return Err(EvalError::UnknownFunction {
                name: name.to_string(),
                suggestions: compute_suggestions(name, &available),
            });
        };
        if ctx.is_dry_run() {
            return Ok(DRY_RUN_VALUE.to_string());
        }
        handler(ctx, params)
    }

    /// Resolve tagged text against `ctx`, returning the output string.
    pub fn resolve(&self, text: &str, ctx: &mut EvalContext) -> Result<String, ResolveError> {
        self.resolve_with(text, ctx, false)
    }

    /// Resolve tagged text with an explicit dry-run flag.
    ///
    /// On entry the error log is cleared and the dry-run flag set; on every
    /// exit path the flag is restored to `false`, so dry-run state never
    /// leaks into the next resolution. A fatal error is appended to the
    /// error log before it propagates, so callers can inspect the log
    /// regardless of success.
    pub fn resolve_with(
        &self,
        text: &str,
        ctx: &mut EvalContext,
        dry_run: bool,
    ) -> Result<String, ResolveError> {
        ctx.begin_resolution(dry_run);
        let result = self.resolve_inner(text, ctx);
        ctx.end_resolution();
        if let Err(err) = &result {
            ctx.report_error(err.to_string());
        }
        result
    }

    fn resolve_inner(&self, text: &str, ctx: &mut EvalContext) -> Result<String, ResolveError> {
        let doc = parse_document(text)?;
        let output = eval_document(&doc, ctx, self)?;
        Ok(output)
    }

    /// Validate syntax by running a dry-run resolution over a fresh context.
    ///
    /// Never mutates caller state and never invokes a real handler.
    pub fn validate_syntax(&self, text: &str) -> SyntaxReport {
        let mut ctx = EvalContext::new();
        match self.resolve_with(text, &mut ctx, true) {
            Ok(_) => SyntaxReport {
                valid: !ctx.has_errors(),
                errors: ctx.errors().to_vec(),
            },
            Err(_) => SyntaxReport {
                valid: false,
                errors: ctx.errors().to_vec(),
            },
        }
    }

    /// Evaluate a standalone boolean condition that may contain tag calls.
    ///
    /// Empty or failed input resolves to `false` rather than propagating an
    /// error; failures are still recorded in the context's error log.
    pub fn evaluate_condition(&self, text: &str, ctx: &mut EvalContext) -> bool {
        condition::evaluate(self, text, ctx)
    }
}

/// `get_param(key[, default])`: read a parameter from the processing
/// context. An absent key returns the default when one is supplied and is a
/// function error otherwise.
fn get_param(ctx: &mut EvalContext, params: &[String]) -> Result<String, EvalError> {
    let Some(key) = params.first() else {
        return Err(function_error(ctx, "get_param", params, "missing parameter name"));
    };
    if let Some(value) = ctx.get(key) {
        return Ok(value.to_string());
    }
    if let Some(default) = params.get(1) {
        return Ok(default.clone());
    }
    let message = format!("no value for parameter '{key}'");
    Err(function_error(ctx, "get_param", params, message))
}

/// `set_param(key, value)`: write a parameter into the processing context.
/// Produces no output.
fn set_param(ctx: &mut EvalContext, params: &[String]) -> Result<String, EvalError> {
    let (Some(key), Some(value)) = (params.first(), params.get(1)) else {
        return Err(function_error(
            ctx,
            "set_param",
            params,
            "expected parameter name and value",
        ));
    };
    let (key, value) = (key.clone(), value.clone());
    ctx.set(key, value);
    Ok(String::new())
}

/// Build a `Function` error and report it to the log first, so the message
/// survives even if an enclosing boundary swallows the error.
fn function_error(
    ctx: &mut EvalContext,
    function: &str,
    params: &[String],
    message: impl Into<String>,
) -> EvalError {
    let err = EvalError::Function {
        function: function.to_string(),
        params: params.to_vec(),
        message: message.into(),
    };
    ctx.report_error(err.to_string());
    err
}
