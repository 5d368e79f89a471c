//! Public AST types for tagged text.
//!
//! These types are public to enable external tooling (linters, previews, etc.).
//! The tree is owned and immutable: one `Document` is produced per input
//! string and discarded when that input's resolution ends.

/// A parsed input: an ordered sequence of top-level nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub nodes: Vec<Node>,
}

/// A node in the parse tree.
///
/// Text flow and expression nodes share one closed enum so the evaluator can
/// match exhaustively over every construct the grammar produces.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal text, passed through verbatim including whitespace.
    Text(String),
    /// An integer literal (no `.` in the source token).
    Int(i64),
    /// A floating-point literal (`.` present in the source token).
    Float(f64),
    /// A `TRUE`/`FALSE` literal.
    Bool(bool),
    /// A quoted span, with internal whitespace runs collapsed to one space.
    Quoted(String),
    /// A short-form call: `<TAG func params />`.
    ShortCall { name: String, params: Vec<Node> },
    /// A long-form call: `<TAG func head +> body </TAG func>`.
    ///
    /// The two parameter groups are concatenated, in order, into one call.
    LongCall {
        name: String,
        head: Vec<Node>,
        body: Vec<Node>,
    },
    /// `<TAG if /> condition <TAG then /> branch <TAG end_if />`
    IfThen {
        condition: Box<Node>,
        then_branch: Vec<Node>,
    },
    /// `<TAG if /> condition <TAG then /> a <TAG else /> b <TAG end_if />`
    IfThenElse {
        condition: Box<Node>,
        then_branch: Vec<Node>,
        else_branch: Vec<Node>,
    },
    /// `<TAG on_error replacement +> protected </TAG on_error>`
    ///
    /// The replacement parameters are evaluated only if the protected
    /// content fails.
    ErrorBoundary {
        replacement: Vec<Node>,
        protected: Vec<Node>,
    },
    /// A binary arithmetic operation over float-coerced operands.
    Arith {
        left: Box<Node>,
        op: ArithOp,
        right: Box<Node>,
    },
    /// A comparison over float-coerced operands, producing a boolean.
    Compare {
        left: Box<Node>,
        op: CmpOp,
        right: Box<Node>,
    },
    /// `AND` / `OR` over bool-coerced operands.
    Logic {
        left: Box<Node>,
        op: BoolOp,
        right: Box<Node>,
    },
    /// Unary `NOT`.
    Not(Box<Node>),
}

/// Arithmetic operators, `*` and `/` binding tighter than `+` and `-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Lt,
    Le,
    Gt,
    Ge,
}

/// Binary boolean operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOp {
    And,
    Or,
}
