//! Event scripts: a TOML list of user actions replayed against a loaded page.
//!
//! ```toml
//! [[step]]
//! action = "type"
//! target = "#json-input"
//! text = '{"name": "a"}'
//!
//! [[step]]
//! action = "key"
//! key = "Enter"
//! modifiers = { ctrl = true }
//! ```

use behaviors::{DispatchOutcome, Page};
use core_types::{FileHandle, Key, KeyEvent, Modifiers};
use html::{Document, Id};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

/// One user action. Targets are CSS selectors; the first match is used.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Step {
    Type {
        target: String,
        text: String,
    },
    Click {
        target: String,
    },
    Dblclick {
        target: String,
    },
    Contextmenu {
        target: String,
    },
    /// Key press on `target`, or on the body when no target is given.
    Key {
        #[serde(default)]
        target: Option<String>,
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
    },
    DragEnter {
        target: String,
    },
    DragLeave {
        target: String,
    },
    Drop {
        target: String,
        #[serde(default)]
        files: Vec<FileHandle>,
    },
}

impl Step {
    pub fn action(&self) -> &'static str {
        match self {
            Step::Type { .. } => "type",
            Step::Click { .. } => "click",
            Step::Dblclick { .. } => "dblclick",
            Step::Contextmenu { .. } => "contextmenu",
            Step::Key { .. } => "key",
            Step::DragEnter { .. } => "drag-enter",
            Step::DragLeave { .. } => "drag-leave",
            Step::Drop { .. } => "drop",
        }
    }
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse script")]
    Parse(#[from] toml::de::Error),
    #[error("`{selector}` is not a valid selector")]
    Selector {
        selector: String,
        #[source]
        source: css::SelectorError,
    },
    #[error("no element matches `{0}`")]
    NoMatch(String),
    #[error("`{0}` is not a text control")]
    NotATextControl(String),
}

impl Script {
    pub fn from_toml_str(src: &str) -> Result<Self, ScriptError> {
        Ok(toml::from_str(src)?)
    }

    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let src = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&src)
    }
}

fn resolve(page: &Page, selector: &str) -> Result<Id, ScriptError> {
    page.query_selector(selector)
        .map_err(|source| ScriptError::Selector {
            selector: selector.to_string(),
            source,
        })?
        .ok_or_else(|| ScriptError::NoMatch(selector.to_string()))
}

/// Replay one step against `page`.
pub fn run_step(page: &mut Page, step: &Step) -> Result<DispatchOutcome, ScriptError> {
    log::debug!(target: "convert_page.script", "running {} step", step.action());
    let outcome = match step {
        Step::Type { target, text } => {
            let id = resolve(page, target)?;
            page.type_text(id, text)
                .ok_or_else(|| ScriptError::NotATextControl(target.clone()))?
        }
        Step::Click { target } => {
            let id = resolve(page, target)?;
            page.click(id)
        }
        Step::Dblclick { target } => {
            let id = resolve(page, target)?;
            page.double_click(id)
        }
        Step::Contextmenu { target } => {
            let id = resolve(page, target)?;
            page.context_menu(id)
        }
        Step::Key {
            target,
            key,
            modifiers,
        } => {
            let id = target.as_deref().map(|t| resolve(page, t)).transpose()?;
            page.key_down(id, KeyEvent::new(Key::from_dom(key), *modifiers))
        }
        Step::DragEnter { target } => {
            let id = resolve(page, target)?;
            page.drag_enter(id)
        }
        Step::DragLeave { target } => {
            let id = resolve(page, target)?;
            page.drag_leave(id)
        }
        Step::Drop { target, files } => {
            let id = resolve(page, target)?;
            page.drop_files(id, files.clone())
        }
    };
    Ok(outcome)
}

/// Short human label for a node: `textarea#json-output`, `label.file-input-label`, `#text`.
pub fn node_label(doc: &Document, id: Id) -> String {
    let Some(name) = doc.element_name(id) else {
        return if id == doc.root() {
            "#document".to_string()
        } else {
            "#text".to_string()
        };
    };
    if let Some(el_id) = doc.attr(id, "id").filter(|v| !v.is_empty()) {
        return format!("{name}#{el_id}");
    }
    match doc.classes(id).next() {
        Some(class) => format!("{name}.{class}"),
        None => name.to_string(),
    }
}
