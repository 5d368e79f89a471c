//! Parsers for tagged text and the boolean-expression sub-grammar.
//!
//! `parse_document` turns a whole input into a [`ast::Document`];
//! `parse_condition` accepts only the boolean-expression subset and is the
//! restricted root used by the condition evaluator.

pub mod ast;
pub mod error;
mod expr;
mod text;

pub use ast::{ArithOp, BoolOp, CmpOp, Document, Node};
pub use error::ParseError;
pub use expr::parse_condition;
pub use text::parse_document;

pub(crate) use text::parse_call;
