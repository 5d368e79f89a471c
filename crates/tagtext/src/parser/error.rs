//! Parse error types.

use thiserror::Error;

/// An error that occurred during parsing.
///
/// Parse errors are always fatal to the whole resolution: they happen before
/// evaluation begins, so no in-text error boundary can recover from them.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A syntax error with the failing byte offset and location.
    #[error("syntax error at offset {offset} ({line}:{column}): {message}")]
    Syntax {
        offset: usize,
        line: usize,
        column: usize,
        message: String,
    },
}

impl ParseError {
    /// The byte offset at which no grammar rule matched.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::Syntax { offset, .. } => *offset,
        }
    }
}
