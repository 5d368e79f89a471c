//! Boolean/arithmetic expression sub-grammar.
//!
//! Four precedence levels, tightest to loosest: unary `NOT`, then `AND`,
//! then `OR`; comparisons sit strictly above arithmetic, and `*` `/` bind
//! tighter than `+` `-`. All same-precedence chains fold left-associatively,
//! so `a - b - c` parses as `(a - b) - c`. Parenthesized sub-expressions are
//! allowed at every level, and operands may be numbers, `TRUE`/`FALSE`
//! literals, or nested tag calls.

use super::ast::{ArithOp, BoolOp, CmpOp, Node};
use super::error::ParseError;
use super::text::{long_call, number, short_call, starts_tag_sequence, syntax_error, ws};
use winnow::ascii::Caseless;
use winnow::combinator::{alt, delimited, opt, preceded, separated_foldl1, terminated};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;

/// Parse a standalone boolean expression, requiring full consumption.
pub fn parse_condition(input: &str) -> Result<Node, ParseError> {
    let mut remaining = input;
    match terminated(bool_expr, ws).parse_next(&mut remaining) {
        Ok(node) => {
            if remaining.is_empty() {
                Ok(node)
            } else {
                Err(syntax_error(
                    input,
                    remaining,
                    format!(
                        "unexpected character: '{}'",
                        remaining.chars().next().unwrap_or('?')
                    ),
                ))
            }
        }
        Err(e) => Err(syntax_error(input, remaining, format!("parse error: {e}"))),
    }
}

fn backtrack() -> ErrMode<ContextError> {
    ErrMode::Backtrack(ContextError::new())
}

/// Parse a boolean expression (entry rule, loosest precedence: `OR`).
pub(super) fn bool_expr(input: &mut &str) -> ModalResult<Node> {
    separated_foldl1(and_expr, or_op, fold_logic).parse_next(input)
}

fn and_expr(input: &mut &str) -> ModalResult<Node> {
    separated_foldl1(not_expr, and_op, fold_logic).parse_next(input)
}

fn not_expr(input: &mut &str) -> ModalResult<Node> {
    preceded(
        ws,
        alt((
            preceded(keyword("NOT"), not_expr).map(|e| Node::Not(Box::new(e))),
            comparison,
        )),
    )
    .parse_next(input)
}

/// Parse a comparison, or a plain arithmetic expression when no comparison
/// operator follows. Arithmetic fully reduces before a comparison applies.
fn comparison(input: &mut &str) -> ModalResult<Node> {
    let left = arith(input)?;
    let op: Option<CmpOp> = opt(preceded(ws, cmp_op)).parse_next(input)?;
    match op {
        Some(op) => {
            let right = arith(input)?;
            Ok(Node::Compare {
                left: Box::new(left),
                op,
                right: Box::new(right),
            })
        }
        None => Ok(left),
    }
}

fn arith(input: &mut &str) -> ModalResult<Node> {
    separated_foldl1(term, add_op, fold_arith).parse_next(input)
}

fn term(input: &mut &str) -> ModalResult<Node> {
    separated_foldl1(factor, mul_op, fold_arith).parse_next(input)
}

fn factor(input: &mut &str) -> ModalResult<Node> {
    preceded(ws, alt((paren, bool_literal, number, tag_call))).parse_next(input)
}

fn paren(input: &mut &str) -> ModalResult<Node> {
    delimited('(', bool_expr, (ws, ')')).parse_next(input)
}

fn bool_literal(input: &mut &str) -> ModalResult<Node> {
    alt((
        keyword("TRUE").value(Node::Bool(true)),
        keyword("FALSE").value(Node::Bool(false)),
    ))
    .parse_next(input)
}

fn tag_call(input: &mut &str) -> ModalResult<Node> {
    alt((long_call, short_call)).parse_next(input)
}

fn fold_arith(left: Node, op: ArithOp, right: Node) -> Node {
    Node::Arith {
        left: Box::new(left),
        op,
        right: Box::new(right),
    }
}

fn fold_logic(left: Node, op: BoolOp, right: Node) -> Node {
    Node::Logic {
        left: Box::new(left),
        op,
        right: Box::new(right),
    }
}

fn or_op(input: &mut &str) -> ModalResult<BoolOp> {
    preceded(ws, keyword("OR")).value(BoolOp::Or).parse_next(input)
}

fn and_op(input: &mut &str) -> ModalResult<BoolOp> {
    preceded(ws, keyword("AND"))
        .value(BoolOp::And)
        .parse_next(input)
}

fn add_op(input: &mut &str) -> ModalResult<ArithOp> {
    preceded(
        ws,
        alt(('+'.value(ArithOp::Add), '-'.value(ArithOp::Sub))),
    )
    .parse_next(input)
}

fn mul_op(input: &mut &str) -> ModalResult<ArithOp> {
    preceded(
        ws,
        alt(('*'.value(ArithOp::Mul), '/'.value(ArithOp::Div))),
    )
    .parse_next(input)
}

fn cmp_op(input: &mut &str) -> ModalResult<CmpOp> {
    alt((
        "==".value(CmpOp::Eq),
        "<=".value(CmpOp::Le),
        ">=".value(CmpOp::Ge),
        lt_op,
        '>'.value(CmpOp::Gt),
    ))
    .parse_next(input)
}

/// A `<` comparison operator: a `<` that does not begin a tag sequence.
fn lt_op(input: &mut &str) -> ModalResult<CmpOp> {
    if input.starts_with('<') && !starts_tag_sequence(input) {
        *input = &input[1..];
        Ok(CmpOp::Lt)
    } else {
        Err(backtrack())
    }
}

/// Match a keyword case-insensitively, rejecting a trailing word character
/// so that e.g. `ORDER` is not read as `OR`.
fn keyword(word: &'static str) -> impl FnMut(&mut &str) -> ModalResult<()> {
    move |input: &mut &str| {
        Caseless(word).void().parse_next(input)?;
        if input
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(backtrack());
        }
        Ok(())
    }
}
