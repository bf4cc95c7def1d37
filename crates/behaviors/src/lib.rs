//! # behaviors
//!
//! Client-side enhancements for the JSON converter page: smooth scrolling for in-page links,
//! keyboard shortcuts, drag and drop onto file inputs, textarea auto-resize, copy helpers on
//! the output and advisory validation of the JSON input.
//!
//! [`rules`] holds the decisions as plain functions. [`Page`] is a headless host that wires
//! them onto an [`html::Document`] with DOM-like listeners, bubbling and default actions, so
//! the behaviors can be driven and asserted on without a browser:
//!
//! ```
//! use behaviors::{BehaviorConfig, Page, initialize};
//!
//! let mut page = Page::from_html(
//!     r#"<textarea id="json-input"></textarea><button id="convert-text-btn">Convert</button>"#,
//!     BehaviorConfig::default(),
//! );
//! let report = initialize(&mut page);
//! assert!(report.validation);
//!
//! let input = page.element_by_id("json-input").unwrap();
//! page.type_text(input, "{\"a\": 1}");
//! assert_eq!(page.style_property(input, "border-color").as_deref(), Some("#38a169"));
//! ```

mod config;
mod dispatch;
mod event;
mod init;
mod listener;
mod measure;
mod page;
pub mod rules;

pub use config::{BehaviorConfig, ClassNames, ConfigError, ElementIds, TextareaConfig, ValidationColors};
pub use event::{DispatchOutcome, Event, EventKind, EventPayload};
pub use init::{InitReport, initialize};
pub use listener::{Behavior, ObserverId};
pub use measure::{ContentMeasurer, LineMeasurer};
pub use page::{Notification, Page, PageEffect, control_kind};

pub use core_types::{FileHandle, Key, KeyEvent, Modifiers};
pub use tools::{JsonCheck, check_json, format_json, is_valid_json};
