#![forbid(unsafe_code)]

//! Browser binding of the convert page behaviors.
//!
//! The wasm build exports `initializePage`, `initializePageWithConfig`, `formatJSON` and
//! `isValidJSON` to JavaScript and wires the same [`behaviors::rules`] the headless page uses
//! onto the live `document`. Only [`bridge`] is compiled natively.

pub mod bridge;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{format_json, initialize_page, initialize_page_with_config, is_valid_json};
