//! Error types for the evaluator and dispatch layer.

use thiserror::Error;

use crate::parser::ParseError;

/// An error raised while evaluating a parse tree.
///
/// Any of these, when raised inside an `on_error` boundary's protected
/// content, is caught at that boundary; raised outside one, it aborts the
/// whole resolution.
#[derive(Debug, Error)]
pub enum EvalError {
    /// Dispatch found no handler registered under this name.
    #[error("unknown function '{name}'{}", render_suggestions(.suggestions))]
    UnknownFunction {
        name: String,
        suggestions: Vec<String>,
    },

    /// A fatal arithmetic failure, e.g. division by zero.
    #[error("arithmetic error: {message}")]
    Arithmetic { message: String },

    /// A failure raised by a handler's own logic.
    #[error("function '{function}' failed with params [{}]: {message}", .params.join(", "))]
    Function {
        function: String,
        params: Vec<String>,
        message: String,
    },
}

/// A top-level resolution failure: either the input did not parse, or
/// evaluation raised outside any error boundary.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

fn render_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(", did you mean {}?", suggestions.join(", "))
    }
}

/// Rank `available` names by edit distance to `input`.
///
/// Returns at most three candidates, closest first. Names within distance 1
/// are considered for short inputs (3 characters or fewer), distance 2
/// otherwise.
pub fn compute_suggestions(input: &str, available: &[String]) -> Vec<String> {
    let max_distance = if input.len() <= 3 { 1 } else { 2 };
    let mut scored: Vec<(usize, &String)> = available
        .iter()
        .map(|candidate| (strsim::levenshtein(input, candidate), candidate))
        .filter(|(distance, _)| *distance > 0 && *distance <= max_distance)
        .collect();
    scored.sort_by_key(|(distance, _)| *distance);
    scored
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.clone())
        .collect()
}
