//! Behavior decisions as plain functions of element state and event payload.
//!
//! Nothing here touches a document; the headless [`Page`](crate::Page) and the wasm binding
//! both read the inputs off their own DOM and apply the results.

use crate::config::{BehaviorConfig, ValidationColors};
use core_types::{FileHandle, Key, KeyEvent};
use css::{Display, Length};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationState {
    /// Nothing but whitespace was entered.
    Neutral,
    Valid,
    Invalid,
}

pub fn validation_state(value: &str) -> ValidationState {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        ValidationState::Neutral
    } else if tools::is_valid_json(trimmed) {
        ValidationState::Valid
    } else {
        ValidationState::Invalid
    }
}

/// What the JSON input and convert button should look like for a given value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidationFeedback<'a> {
    pub state: ValidationState,
    pub border_color: &'a str,
    /// Validation is advisory: the convert button is never disabled by it.
    pub convert_enabled: bool,
}

pub fn validation_feedback<'a>(value: &str, colors: &'a ValidationColors) -> ValidationFeedback<'a> {
    let state = validation_state(value);
    let border_color = match state {
        ValidationState::Neutral => colors.neutral.as_str(),
        ValidationState::Valid => colors.valid.as_str(),
        ValidationState::Invalid => colors.invalid.as_str(),
    };
    ValidationFeedback {
        state,
        border_color,
        convert_enabled: true,
    }
}

/// Height for an auto-resized textarea: its content height, never below `min_height`.
pub fn auto_resize_height(content_height: f32, min_height: f32) -> Length {
    let content = if content_height.is_finite() {
        content_height
    } else {
        0.0
    };
    Length::Px(content.max(min_height))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
    /// Ctrl/Cmd + Enter.
    Convert,
    /// Escape.
    CloseOverlay,
}

pub fn shortcut_for(event: &KeyEvent) -> Option<Shortcut> {
    match event.key {
        Key::Enter if event.modifiers.command() => Some(Shortcut::Convert),
        Key::Escape => Some(Shortcut::CloseOverlay),
        _ => None,
    }
}

/// The convert shortcut only fires when the input has something besides whitespace.
pub fn should_convert(input_value: Option<&str>) -> bool {
    input_value.is_some_and(|v| !v.trim().is_empty())
}

/// The overlay counts as open only when its inline `display` is `block`.
pub fn overlay_visible(inline_display: Option<&str>) -> bool {
    inline_display.and_then(css::parse_display) == Some(Display::Block)
}

/// Native context menu on the output is only offered once there is output to copy.
pub fn allow_context_menu(output_value: &str) -> bool {
    !output_value.trim().is_empty()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    Enter,
    Over,
    Leave,
    Drop,
}

/// Whether the label is highlighted after the given drag event.
pub fn highlight_after(phase: DragPhase) -> bool {
    matches!(phase, DragPhase::Enter | DragPhase::Over)
}

/// A drop only replaces the input's files when it carries at least one.
pub fn accept_drop(files: &[FileHandle]) -> bool {
    !files.is_empty()
}

/// In-page links, the ones smooth-scrolled instead of navigated.
pub fn is_fragment_link(href: Option<&str>) -> bool {
    href.is_some_and(|h| h.starts_with('#'))
}

/// Rules appended to the page so the highlight class is visible over the page's own styles.
pub fn highlight_css(config: &BehaviorConfig) -> String {
    let highlight = &config.classes.drag_highlight;
    let label = &config.classes.file_label;
    let accent = &config.validation.valid;
    format!(
        "\n.{highlight} {{\n    background: #e6fffa !important;\n    border-color: {accent} !important;\n    color: {accent} !important;\n}}\n\n.{label}.{highlight} i {{\n    color: {accent} !important;\n}}\n"
    )
}
