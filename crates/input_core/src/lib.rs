//! # input_core
//!
//! UI-agnostic state for the form controls the page behaviors touch.
//!
//! - [`InputId`]: opaque identifier for a control
//! - [`InputValueStore`]: values, selections and attached file lists
//!
//! The crate knows nothing about the DOM. A host converts its node ids into
//! [`InputId`] at the boundary:
//! ```ignore
//! impl From<html::Id> for InputId {
//!     fn from(id: html::Id) -> Self {
//!         InputId::from_raw(id.0 as u64)
//!     }
//! }
//! ```

mod id;
mod selection;
mod state;
mod store;
mod text;

pub use id::InputId;
pub use store::{ControlKind, InputValueStore};
pub use text::{filter_single_line, normalize_newlines};
