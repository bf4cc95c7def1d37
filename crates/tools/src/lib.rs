pub mod json;

pub use json::{JsonCheck, check_json, format_json, is_valid_json};
