//! # html
//!
//! Markup side of the convert page: a tokenizer and tree builder for the server-rendered
//! templates, and the arena [`Document`] the page behaviors read and mutate.

mod dom_builder;
mod entities;
mod tokenizer;
mod types;

pub mod document;
pub mod serialize;

pub use crate::document::{Ancestors, Document, DocumentError, NodeKind};
pub use crate::dom_builder::{build_dom, parse_html};
pub use crate::serialize::{outer_html, to_html};
pub use crate::tokenizer::{Tokenizer, tokenize};
pub use crate::types::{Attribute, Id, Node, NodeId, Token};

