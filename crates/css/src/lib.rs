pub mod selector;
pub mod syntax;
pub mod values;

// Re-exports so other crates can just use `css::...` nicely.
pub use selector::{SelectorError, SelectorList, closest, query_selector, query_selector_all};
pub use syntax::{Declaration, InlineStyle, parse_declarations};
pub use values::{Display, Length, Rgba, parse_color, parse_display, parse_length};
