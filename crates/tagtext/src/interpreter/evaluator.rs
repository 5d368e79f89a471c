//! Tree transform reducing a parse tree to one output string.
//!
//! Walks the tree left to right. Literal text passes through verbatim;
//! calls dispatch through the function registry; `if` blocks defer branch
//! evaluation until the condition is known, so the untaken branch's side
//! effects never occur; `on_error` boundaries are the single place an
//! evaluation error converts into a substituted value.

use crate::interpreter::EvalError;
use crate::interpreter::context::EvalContext;
use crate::interpreter::registry::FunctionRegistry;
use crate::parser::ast::{ArithOp, BoolOp, CmpOp, Document, Node};
use crate::types::Value;

/// Evaluate a parsed document, producing the resolved output string.
pub fn eval_document(
    doc: &Document,
    ctx: &mut EvalContext,
    registry: &FunctionRegistry,
) -> Result<String, EvalError> {
    eval_nodes(&doc.nodes, ctx, registry)
}

/// Evaluate a node sequence, concatenating the per-node output in order.
pub(crate) fn eval_nodes(
    nodes: &[Node],
    ctx: &mut EvalContext,
    registry: &FunctionRegistry,
) -> Result<String, EvalError> {
    let mut output = String::new();
    for node in nodes {
        output.push_str(&eval_node(node, ctx, registry)?);
    }
    Ok(output)
}

/// Evaluate a single node to its textual output.
pub(crate) fn eval_node(
    node: &Node,
    ctx: &mut EvalContext,
    registry: &FunctionRegistry,
) -> Result<String, EvalError> {
    match node {
        Node::Text(s) => Ok(s.clone()),
        Node::ShortCall { name, params } => {
            let args = eval_params(params, ctx, registry)?;
            registry.dispatch(name, &args, ctx)
        }
        Node::LongCall { name, head, body } => {
            // The two parameter groups concatenate, in order, into one call.
            let mut args = eval_params(head, ctx, registry)?;
            args.extend(eval_params(body, ctx, registry)?);
            registry.dispatch(name, &args, ctx)
        }
        Node::IfThen {
            condition,
            then_branch,
        } => {
            if eval_expr(condition, ctx, registry)?.as_bool() {
                eval_nodes(then_branch, ctx, registry)
            } else {
                Ok(String::new())
            }
        }
        Node::IfThenElse {
            condition,
            then_branch,
            else_branch,
        } => {
            if eval_expr(condition, ctx, registry)?.as_bool() {
                eval_nodes(then_branch, ctx, registry)
            } else {
                eval_nodes(else_branch, ctx, registry)
            }
        }
        Node::ErrorBoundary {
            replacement,
            protected,
        } => match eval_nodes(protected, ctx, registry) {
            Ok(text) => Ok(text),
            Err(err) => {
                // The triggering error still lands in the log; the boundary
                // substitutes its replacement parameters and resolution
                // continues around it.
                ctx.report_error(err.to_string());
                let parts = eval_params(replacement, ctx, registry)?;
                Ok(parts.join(" "))
            }
        },
        Node::Int(_)
        | Node::Float(_)
        | Node::Bool(_)
        | Node::Quoted(_)
        | Node::Arith { .. }
        | Node::Compare { .. }
        | Node::Logic { .. }
        | Node::Not(_) => Ok(eval_expr(node, ctx, registry)?.to_string()),
    }
}

/// Evaluate parameter nodes into the ordered string arguments handed to a
/// function handler.
fn eval_params(
    params: &[Node],
    ctx: &mut EvalContext,
    registry: &FunctionRegistry,
) -> Result<Vec<String>, EvalError> {
    params
        .iter()
        .map(|p| eval_node(p, ctx, registry))
        .collect()
}

/// Reduce an expression node to a value, applying the textual coercion
/// rules at each operator.
pub(crate) fn eval_expr(
    node: &Node,
    ctx: &mut EvalContext,
    registry: &FunctionRegistry,
) -> Result<Value, EvalError> {
    match node {
        Node::Int(i) => Ok(Value::Number(*i as f64)),
        Node::Float(x) => Ok(Value::Number(*x)),
        Node::Bool(b) => Ok(Value::Bool(*b)),
        Node::Text(s) | Node::Quoted(s) => Ok(Value::Text(s.clone())),
        Node::Arith { left, op, right } => {
            let l = eval_expr(left, ctx, registry)?.as_number();
            let r = eval_expr(right, ctx, registry)?.as_number();
            let value = match op {
                ArithOp::Add => l + r,
                ArithOp::Sub => l - r,
                ArithOp::Mul => l * r,
                ArithOp::Div => {
                    if r == 0.0 {
                        return Err(EvalError::Arithmetic {
                            message: format!("division by zero: {l} / 0"),
                        });
                    }
                    l / r
                }
            };
            Ok(Value::Number(value))
        }
        Node::Compare { left, op, right } => {
            let l = eval_expr(left, ctx, registry)?.as_number();
            let r = eval_expr(right, ctx, registry)?.as_number();
            let value = match op {
                CmpOp::Eq => l == r,
                CmpOp::Lt => l < r,
                CmpOp::Le => l <= r,
                CmpOp::Gt => l > r,
                CmpOp::Ge => l >= r,
            };
            Ok(Value::Bool(value))
        }
        Node::Logic { left, op, right } => {
            // Operands are fully reduced values by this point, so there is
            // nothing to short-circuit.
            let l = eval_expr(left, ctx, registry)?.as_bool();
            let r = eval_expr(right, ctx, registry)?.as_bool();
            let value = match op {
                BoolOp::And => l && r,
                BoolOp::Or => l || r,
            };
            Ok(Value::Bool(value))
        }
        Node::Not(inner) => Ok(Value::Bool(!eval_expr(inner, ctx, registry)?.as_bool())),
        Node::ShortCall { .. }
        | Node::LongCall { .. }
        | Node::IfThen { .. }
        | Node::IfThenElse { .. }
        | Node::ErrorBoundary { .. } => {
            Ok(Value::Text(eval_node(node, ctx, registry)?))
        }
    }
}
