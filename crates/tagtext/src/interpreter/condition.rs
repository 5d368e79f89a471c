//! Boolean condition entry point for automation callers.
//!
//! Embedded self-closing tag calls are resolved by textual substitution:
//! the innermost `<TAG … />` substring is parsed with the grammar's
//! short-call rule, dispatched, and spliced back into the input until no
//! call substrings remain. What remains is then parsed with the
//! boolean-expression sub-grammar only.

use crate::interpreter::context::EvalContext;
use crate::interpreter::evaluator::{eval_expr, eval_node};
use crate::interpreter::registry::FunctionRegistry;
use crate::parser::{parse_call, parse_condition};

/// Evaluate `text` as a boolean condition against `ctx`.
///
/// Empty input, a malformed tag call, a parse failure, or an evaluation
/// failure all yield `false`; failures are recorded in the error log so
/// callers can still surface diagnostics.
pub(crate) fn evaluate(registry: &FunctionRegistry, text: &str, ctx: &mut EvalContext) -> bool {
    let mut work = text.trim().to_string();
    if work.is_empty() {
        return false;
    }

    // Substitution loop: innermost call first, so nested calls reduce from
    // the inside out.
    loop {
        let Some(close) = work.find("/>") else {
            if work.contains("<TAG") {
                ctx.report_error(format!("unterminated tag call in condition: {work}"));
                return false;
            }
            break;
        };
        let Some(start) = work[..close].rfind("<TAG") else {
            break;
        };
        let end = close + 2;
        let snippet = work[start..end].to_string();
        match resolve_call(registry, &snippet, ctx) {
            Ok(value) => work.replace_range(start..end, &value),
            Err(message) => {
                ctx.report_error(message);
                return false;
            }
        }
    }

    match parse_condition(&work) {
        Ok(node) => match eval_expr(&node, ctx, registry) {
            Ok(value) => value.as_bool(),
            Err(err) => {
                ctx.report_error(err.to_string());
                false
            }
        },
        Err(err) => {
            ctx.report_error(err.to_string());
            false
        }
    }
}

fn resolve_call(
    registry: &FunctionRegistry,
    snippet: &str,
    ctx: &mut EvalContext,
) -> Result<String, String> {
    let node = parse_call(snippet).map_err(|e| e.to_string())?;
    eval_node(&node, ctx, registry).map_err(|e| e.to_string())
}
