//! Integration tests for the tagged-text parser.
//!
//! These tests validate the public parsing API against the documented
//! syntax forms: literal runs, short/long calls, parameter tokenization,
//! control directives, and error boundaries.

use tagtext::parser::{Node, parse_document};

// =============================================================================
// Literal text
// =============================================================================

#[test]
fn pure_literal() {
    let doc = parse_document("Hello, world!").unwrap();
    assert_eq!(doc.nodes, vec![Node::Text("Hello, world!".into())]);
}

#[test]
fn empty_input() {
    let doc = parse_document("").unwrap();
    assert_eq!(doc.nodes, vec![]);
}

#[test]
fn multiline_literal() {
    let doc = parse_document("Line 1\nLine 2\nLine 3").unwrap();
    assert_eq!(doc.nodes, vec![Node::Text("Line 1\nLine 2\nLine 3".into())]);
}

#[test]
fn lone_angle_bracket_is_literal() {
    let doc = parse_document("a < b and c > d").unwrap();
    assert_eq!(doc.nodes, vec![Node::Text("a < b and c > d".into())]);
}

#[test]
fn angle_bracket_not_followed_by_tag_word_is_literal() {
    let doc = parse_document("<TAGGED text>").unwrap();
    assert_eq!(doc.nodes, vec![Node::Text("<TAGGED text>".into())]);
}

// =============================================================================
// Short calls
// =============================================================================

#[test]
fn short_call_without_params() {
    let doc = parse_document("<TAG now />").unwrap();
    assert_eq!(
        doc.nodes,
        vec![Node::ShortCall {
            name: "now".into(),
            params: vec![],
        }]
    );
}

#[test]
fn short_call_with_bare_word_param() {
    let doc = parse_document("<TAG get_param price />").unwrap();
    assert_eq!(
        doc.nodes,
        vec![Node::ShortCall {
            name: "get_param".into(),
            params: vec![Node::Text("price".into())],
        }]
    );
}

#[test]
fn short_call_embedded_in_text() {
    let doc = parse_document("before <TAG f x /> after").unwrap();
    assert_eq!(doc.nodes.len(), 3);
    assert_eq!(doc.nodes[0], Node::Text("before ".into()));
    assert_eq!(doc.nodes[2], Node::Text(" after".into()));
}

// =============================================================================
// Parameter tokenization
// =============================================================================

#[test]
fn params_try_quoted_then_number_then_call_then_bare() {
    let doc = parse_document(r#"<TAG f "x  y", 2, 2.5, <TAG g />, word />"#).unwrap();
    assert_eq!(
        doc.nodes,
        vec![Node::ShortCall {
            name: "f".into(),
            params: vec![
                Node::Quoted("x y".into()),
                Node::Int(2),
                Node::Float(2.5),
                Node::ShortCall {
                    name: "g".into(),
                    params: vec![],
                },
                Node::Text("word".into()),
            ],
        }]
    );
}

#[test]
fn quoted_span_may_contain_commas() {
    let doc = parse_document(r#"<TAG f "a, b, c" />"#).unwrap();
    assert_eq!(
        doc.nodes,
        vec![Node::ShortCall {
            name: "f".into(),
            params: vec![Node::Quoted("a, b, c".into())],
        }]
    );
}

#[test]
fn quoted_whitespace_runs_collapse() {
    let doc = parse_document("<TAG f \"a \t\n  b\" />").unwrap();
    assert_eq!(
        doc.nodes,
        vec![Node::ShortCall {
            name: "f".into(),
            params: vec![Node::Quoted("a b".into())],
        }]
    );
}

#[test]
fn negative_and_float_numbers() {
    let doc = parse_document("<TAG f -3, -1.5 />").unwrap();
    assert_eq!(
        doc.nodes,
        vec![Node::ShortCall {
            name: "f".into(),
            params: vec![Node::Int(-3), Node::Float(-1.5)],
        }]
    );
}

#[test]
fn digits_followed_by_letters_parse_as_bare_word() {
    let doc = parse_document("<TAG f 12abc />").unwrap();
    assert_eq!(
        doc.nodes,
        vec![Node::ShortCall {
            name: "f".into(),
            params: vec![Node::Text("12abc".into())],
        }]
    );
}

#[test]
fn bracketed_param_list() {
    let doc = parse_document("<TAG f [a, b] />").unwrap();
    assert_eq!(
        doc.nodes,
        vec![Node::ShortCall {
            name: "f".into(),
            params: vec![Node::Text("a".into()), Node::Text("b".into())],
        }]
    );
}

#[test]
fn empty_bracketed_param_list() {
    let doc = parse_document("<TAG f [] />").unwrap();
    assert_eq!(
        doc.nodes,
        vec![Node::ShortCall {
            name: "f".into(),
            params: vec![],
        }]
    );
}

// =============================================================================
// Long calls
// =============================================================================

#[test]
fn long_call_splits_params_across_open_and_close() {
    let doc = parse_document("<TAG mail a, b +> c, d </TAG mail>").unwrap();
    assert_eq!(
        doc.nodes,
        vec![Node::LongCall {
            name: "mail".into(),
            head: vec![Node::Text("a".into()), Node::Text("b".into())],
            body: vec![Node::Text("c".into()), Node::Text("d".into())],
        }]
    );
}

#[test]
fn long_call_close_name_must_match() {
    assert!(parse_document("<TAG mail a +> b </TAG other>").is_err());
}

// =============================================================================
// Control directives
// =============================================================================

#[test]
fn if_then_end_if() {
    let doc = parse_document("<TAG if /> 1 < 2 <TAG then />yes<TAG end_if />").unwrap();
    match &doc.nodes[0] {
        Node::IfThen { then_branch, .. } => {
            assert_eq!(*then_branch, vec![Node::Text("yes".into())]);
        }
        other => panic!("expected IfThen, got {other:?}"),
    }
}

#[test]
fn if_then_else_end_if() {
    let doc =
        parse_document("<TAG if /> 1 < 2 <TAG then />yes<TAG else />no<TAG end_if />").unwrap();
    match &doc.nodes[0] {
        Node::IfThenElse {
            then_branch,
            else_branch,
            ..
        } => {
            assert_eq!(*then_branch, vec![Node::Text("yes".into())]);
            assert_eq!(*else_branch, vec![Node::Text("no".into())]);
        }
        other => panic!("expected IfThenElse, got {other:?}"),
    }
}

#[test]
fn if_without_end_if_is_error() {
    assert!(parse_document("<TAG if /> 1 < 2 <TAG then />yes").is_err());
}

#[test]
fn stray_directive_is_error() {
    assert!(parse_document("ok <TAG then />").is_err());
}

#[test]
fn reserved_words_never_parse_as_calls() {
    // `end_if` alone is a stray directive, not a zero-param function call.
    assert!(parse_document("<TAG end_if />").is_err());
}

#[test]
fn nested_if_blocks() {
    let input = "<TAG if /> TRUE <TAG then /><TAG if /> FALSE <TAG then />a<TAG else />b<TAG end_if /><TAG end_if />";
    let doc = parse_document(input).unwrap();
    match &doc.nodes[0] {
        Node::IfThen { then_branch, .. } => {
            assert!(matches!(then_branch[0], Node::IfThenElse { .. }));
        }
        other => panic!("expected IfThen, got {other:?}"),
    }
}

// =============================================================================
// Error boundaries
// =============================================================================

#[test]
fn error_boundary_carries_replacement_params() {
    let doc = parse_document("<TAG on_error ERR +>risky <TAG f /></TAG on_error>").unwrap();
    match &doc.nodes[0] {
        Node::ErrorBoundary {
            replacement,
            protected,
        } => {
            assert_eq!(*replacement, vec![Node::Text("ERR".into())]);
            assert_eq!(protected.len(), 2);
        }
        other => panic!("expected ErrorBoundary, got {other:?}"),
    }
}

#[test]
fn unclosed_error_boundary_is_error() {
    assert!(parse_document("<TAG on_error ERR +>risky").is_err());
}

// =============================================================================
// Error positions
// =============================================================================

#[test]
fn parse_error_carries_offset() {
    let err = parse_document("ok <TAG then />").unwrap_err();
    assert_eq!(err.offset(), 3);
    let msg = err.to_string();
    assert!(msg.contains("offset 3"), "unexpected message: {msg}");
}

#[test]
fn parse_error_reports_line_and_column() {
    let err = parse_document("line one\nx <TAG then />").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("2:"), "unexpected message: {msg}");
}
