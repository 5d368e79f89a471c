use std::fmt;

/// A runtime value produced while reducing expression nodes.
///
/// The tag language is untyped at the text level: every value renders as
/// text, and coercion into numbers or booleans follows fixed textual rules
/// (see [`Value::as_number`] and [`Value::as_bool`]). Callers only ever see
/// strings; this type exists so arithmetic and comparisons inside the
/// evaluator do not round-trip through text at every step.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A text value.
    Text(String),

    /// A numeric value. Integer and float literals both reduce to this.
    Number(f64),

    /// A boolean value, rendered as `TRUE`/`FALSE`.
    Bool(bool),
}

impl Value {
    /// Coerce this value to a float.
    ///
    /// Text is parsed leniently: the leading numeric prefix is taken and
    /// anything non-numeric coerces to `0.0`. Booleans coerce to `1.0`/`0.0`.
    pub fn as_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Text(s) => parse_number(s),
        }
    }

    /// Coerce this value to a boolean.
    ///
    /// Text is truthy exactly when it is case-insensitively equal to the
    /// literal word `TRUE`. Numbers are never truthy, matching the textual
    /// rule applied to their rendered form.
    pub fn as_bool(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Number(_) => false,
            Value::Text(s) => s.trim().eq_ignore_ascii_case("true"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{s}"),
            Value::Number(n) => {
                // Integral results print without a decimal point, so numeric
                // output can feed back into textual coercion unchanged.
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Value::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// Parse the leading numeric prefix of `text` as a float.
///
/// Accepts optional leading whitespace, an optional `-`, digits, and an
/// optional `.digits` fraction. Returns `0.0` when no digits are present.
pub fn parse_number(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if bytes.first() == Some(&b'-') {
        end = 1;
    }
    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    if end == digits_start {
        return 0.0;
    }
    if bytes.get(end) == Some(&b'.') {
        let mut frac = end + 1;
        while bytes.get(frac).is_some_and(u8::is_ascii_digit) {
            frac += 1;
        }
        if frac > end + 1 {
            end = frac;
        }
    }
    s[..end].parse().unwrap_or(0.0)
}
