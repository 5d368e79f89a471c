mod value;

pub use value::{Value, parse_number};
