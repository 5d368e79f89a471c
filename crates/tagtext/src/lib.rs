pub mod interpreter;
pub mod parser;
pub mod types;

pub use interpreter::{
    DRY_RUN_VALUE, EvalContext, EvalError, FunctionRegistry, ResolveError, SyntaxReport, TagFn,
    compute_suggestions,
};
pub use parser::{ParseError, parse_condition, parse_document};
pub use types::Value;

/// Creates a `HashMap<String, String>` seed map from key-value pairs.
///
/// Values are converted via `ToString`, so integers and floats can be
/// passed directly.
///
/// # Example
///
/// ```
/// use tagtext::params;
///
/// let p = params! { "qty" => 10, "name" => "Alice" };
/// assert_eq!(p.len(), 2);
/// assert_eq!(p["qty"], "10");
/// assert_eq!(p["name"], "Alice");
/// ```
#[macro_export]
macro_rules! params {
    {} => {
        ::std::collections::HashMap::<String, String>::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::HashMap::<String, String>::new();
            $(
                map.insert($key.to_string(), $value.to_string());
            )+
            map
        }
    };
}
