//! Tagged-text parser using winnow.
//!
//! Parses free text containing tag directives into an AST. Handles:
//! - Literal text runs (preserved byte-for-byte, including a lone `<` that
//!   does not begin a tag sequence)
//! - Short calls `<TAG func params />` and long calls
//!   `<TAG func params +> params </TAG func>`
//! - `if` / `then` / `else` / `end_if` blocks with a boolean condition
//! - `on_error` boundaries carrying replacement parameters
//! - Parameter lists: quoted spans, numbers, nested calls, bare words,
//!   optionally bracketed with `[` `]`

use super::ast::{Document, Node};
use super::error::ParseError;
use super::expr;
use winnow::combinator::{alt, cut_err, delimited, opt, preceded, repeat, separated};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{take_till, take_while};

/// Directive keywords that never parse as function calls.
const RESERVED: [&str; 5] = ["if", "then", "else", "end_if", "on_error"];

/// Parse a complete tagged-text input into a document.
pub fn parse_document(input: &str) -> Result<Document, ParseError> {
    let mut remaining = input;
    match document(&mut remaining) {
        Ok(doc) => {
            if remaining.is_empty() {
                Ok(doc)
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

/// Parse a single short-form call, requiring the whole input to be consumed.
///
/// Used by the condition evaluator's substitution loop, which extracts
/// candidate `<TAG … />` substrings textually.
pub(crate) fn parse_call(input: &str) -> Result<Node, ParseError> {
    let mut remaining = input;
    match delimited(ws, short_call, ws).parse_next(&mut remaining) {
        Ok(node) if remaining.is_empty() => Ok(node),
        Ok(_) => Err(syntax_error(
            input,
            remaining,
            "trailing input after tag call".to_string(),
        )),
        Err(e) => Err(syntax_error(input, remaining, format!("parse error: {e}"))),
    }
}

/// Build a position-addressed syntax error from the unconsumed remainder.
pub(super) fn syntax_error(original: &str, remaining: &str, message: String) -> ParseError {
    let offset = original.len() - remaining.len();
    let consumed = &original[..offset];
    let line = consumed.chars().filter(|&c| c == '\n').count() + 1;
    let column = match consumed.rfind('\n') {
        Some(pos) => offset - pos,
        None => offset + 1,
    };
    ParseError::Syntax {
        offset,
        line,
        column,
        message,
    }
}

fn backtrack() -> ErrMode<ContextError> {
    ErrMode::Backtrack(ContextError::new())
}

/// Parse a complete document as a sequence of elements.
fn document(input: &mut &str) -> ModalResult<Document> {
    let nodes: Vec<Node> = repeat(0.., element).parse_next(input)?;
    Ok(Document {
        nodes: merge_text(nodes),
    })
}

/// Merge adjacent `Text` nodes into single nodes.
fn merge_text(nodes: Vec<Node>) -> Vec<Node> {
    let mut result = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Node::Text(text) => {
                if let Some(Node::Text(prev)) = result.last_mut() {
                    prev.push_str(&text);
                } else {
                    result.push(Node::Text(text));
                }
            }
            other => result.push(other),
        }
    }
    result
}

/// Parse a single top-level element.
fn element(input: &mut &str) -> ModalResult<Node> {
    alt((if_block, error_boundary, long_call, short_call, text_run)).parse_next(input)
}

/// Parse a literal text run: either a chunk without `<`, or a lone `<` that
/// does not begin a tag sequence.
fn text_run(input: &mut &str) -> ModalResult<Node> {
    alt((
        take_till(1.., '<').map(|s: &str| Node::Text(s.to_string())),
        lone_angle,
    ))
    .parse_next(input)
}

fn lone_angle(input: &mut &str) -> ModalResult<Node> {
    if input.starts_with('<') && !starts_tag_sequence(input) {
        *input = &input[1..];
        Ok(Node::Text("<".to_string()))
    } else {
        Err(backtrack())
    }
}

/// Whether `s` begins a tag opening or closing sequence (`<TAG` or `</TAG`,
/// each followed by whitespace).
pub(super) fn starts_tag_sequence(s: &str) -> bool {
    for open in ["<TAG", "</TAG"] {
        if let Some(rest) = s.strip_prefix(open)
            && rest.chars().next().is_some_and(|c| c.is_ascii_whitespace())
        {
            return true;
        }
    }
    false
}

/// Parse optional whitespace.
pub(super) fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_ascii_whitespace())
        .void()
        .parse_next(input)
}

/// Parse required whitespace.
fn ws1(input: &mut &str) -> ModalResult<()> {
    take_while(1.., |c: char| c.is_ascii_whitespace())
        .void()
        .parse_next(input)
}

/// Parse the tag opening sequence `<TAG` plus its separating whitespace.
fn tag_start(input: &mut &str) -> ModalResult<()> {
    ("<TAG", ws1).void().parse_next(input)
}

/// Parse the tag closing sequence `</TAG` plus its separating whitespace.
fn close_start(input: &mut &str) -> ModalResult<()> {
    ("</TAG", ws1).void().parse_next(input)
}

/// Parse an identifier (function or directive name).
fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_').parse_next(input)
}

/// Parse a specific control directive: `<TAG name />`.
fn directive(input: &mut &str, name: &str) -> ModalResult<()> {
    tag_start.parse_next(input)?;
    let ident = identifier.parse_next(input)?;
    if ident != name {
        return Err(backtrack());
    }
    (ws, "/>").void().parse_next(input)
}

/// Parse the shared call prefix: `<TAG name params`, rejecting reserved names.
fn call_prefix(input: &mut &str) -> ModalResult<(String, Vec<Node>)> {
    tag_start.parse_next(input)?;
    let name = identifier.parse_next(input)?;
    if RESERVED.contains(&name) {
        return Err(backtrack());
    }
    let name = name.to_string();
    let params = preceded(ws, param_list).parse_next(input)?;
    Ok((name, params))
}

/// Parse a short-form call: `<TAG func params />`.
pub(super) fn short_call(input: &mut &str) -> ModalResult<Node> {
    let (name, params) = call_prefix(input)?;
    (ws, "/>").void().parse_next(input)?;
    Ok(Node::ShortCall { name, params })
}

/// Parse a long-form call: `<TAG func head +> body </TAG func>`.
///
/// The closing name must match the opening name; a mismatch fails the whole
/// parse rather than backtracking.
pub(super) fn long_call(input: &mut &str) -> ModalResult<Node> {
    let (name, head) = call_prefix(input)?;
    (ws, "+>").void().parse_next(input)?;
    let body = cut_err(delimited(ws, param_list, ws)).parse_next(input)?;
    cut_err(close_start).parse_next(input)?;
    let close_name = cut_err(identifier).parse_next(input)?;
    if close_name != name {
        return Err(ErrMode::Cut(ContextError::new()));
    }
    cut_err((ws, '>').void()).parse_next(input)?;
    Ok(Node::LongCall { name, head, body })
}

/// Parse an `if` block: `<TAG if /> cond <TAG then /> … <TAG end_if />`,
/// with an optional `<TAG else />` arm.
fn if_block(input: &mut &str) -> ModalResult<Node> {
    directive(input, "if")?;
    let condition = cut_err(expr::bool_expr).parse_next(input)?;
    ws.parse_next(input)?;
    cut_err(|i: &mut &str| directive(i, "then")).parse_next(input)?;
    let then_branch: Vec<Node> = repeat(0.., element).parse_next(input)?;
    let else_branch: Option<Vec<Node>> = opt(preceded(
        |i: &mut &str| directive(i, "else"),
        repeat(0.., element).map(merge_text),
    ))
    .parse_next(input)?;
    cut_err(|i: &mut &str| directive(i, "end_if")).parse_next(input)?;

    let condition = Box::new(condition);
    let then_branch = merge_text(then_branch);
    Ok(match else_branch {
        Some(else_branch) => Node::IfThenElse {
            condition,
            then_branch,
            else_branch,
        },
        None => Node::IfThen {
            condition,
            then_branch,
        },
    })
}

/// Parse an error boundary:
/// `<TAG on_error replacement +> protected </TAG on_error>`.
fn error_boundary(input: &mut &str) -> ModalResult<Node> {
    tag_start.parse_next(input)?;
    let name = identifier.parse_next(input)?;
    if name != "on_error" {
        return Err(backtrack());
    }
    let replacement = cut_err(preceded(ws, param_list)).parse_next(input)?;
    cut_err((ws, "+>").void()).parse_next(input)?;
    let protected: Vec<Node> = repeat(0.., element).parse_next(input)?;
    cut_err(close_start).parse_next(input)?;
    let close_name = cut_err(identifier).parse_next(input)?;
    if close_name != "on_error" {
        return Err(ErrMode::Cut(ContextError::new()));
    }
    cut_err((ws, '>').void()).parse_next(input)?;
    Ok(Node::ErrorBoundary {
        replacement,
        protected: merge_text(protected),
    })
}

/// Parse a parameter list, optionally bracketed with `[` `]`.
/// An empty list parses to zero parameters.
fn param_list(input: &mut &str) -> ModalResult<Vec<Node>> {
    alt((
        delimited(('[', ws), params_seq, (ws, ']')),
        params_seq,
    ))
    .parse_next(input)
}

fn params_seq(input: &mut &str) -> ModalResult<Vec<Node>> {
    separated(0.., param, (ws, ',', ws)).parse_next(input)
}

/// Parse a single parameter. Tried in order: quoted span, number, nested
/// tag call, bare word.
fn param(input: &mut &str) -> ModalResult<Node> {
    alt((quoted, number, long_call, short_call, bare_word)).parse_next(input)
}

/// Parse a quoted span. May contain commas and whitespace; internal
/// whitespace runs collapse to a single space.
fn quoted(input: &mut &str) -> ModalResult<Node> {
    let inner: &str = delimited('"', take_till(0.., '"'), '"').parse_next(input)?;
    Ok(Node::Quoted(collapse_whitespace(inner)))
}

fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_ws = false;
    for c in s.chars() {
        if c.is_ascii_whitespace() {
            if !in_ws {
                out.push(' ');
            }
            in_ws = true;
        } else {
            out.push(c);
            in_ws = false;
        }
    }
    out
}

/// Parse a numeric literal. The presence of `.` selects floating-point,
/// otherwise integer. A trailing word character rejects the token so that
/// e.g. `12abc` parses as a bare word instead.
pub(super) fn number(input: &mut &str) -> ModalResult<Node> {
    let text = (
        opt('-'),
        take_while(1.., |c: char| c.is_ascii_digit()),
        opt(('.', take_while(1.., |c: char| c.is_ascii_digit()))),
    )
        .take()
        .parse_next(input)?;
    if input
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
    {
        return Err(backtrack());
    }
    if text.contains('.') {
        text.parse().map(Node::Float).map_err(|_| backtrack())
    } else {
        text.parse().map(Node::Int).map_err(|_| backtrack())
    }
}

/// Parse a bare word: a run of characters excluding `>`, `,`, brackets and
/// whitespace. A `<` is allowed only when it does not begin a tag sequence;
/// `/` and `+` are excluded immediately before `>` (they belong to the
/// closing token).
fn bare_word(input: &mut &str) -> ModalResult<Node> {
    let s = *input;
    let mut end = 0;
    for (i, c) in s.char_indices() {
        let rest = &s[i..];
        let stop = match c {
            '>' | ',' | '[' | ']' => true,
            '<' => starts_tag_sequence(rest),
            '/' | '+' => rest[1..].starts_with('>'),
            _ => c.is_ascii_whitespace(),
        };
        if stop {
            break;
        }
        end = i + c.len_utf8();
    }
    if end == 0 {
        return Err(backtrack());
    }
    let word = &s[..end];
    *input = &s[end..];
    Ok(Node::Text(word.to_string()))
}
