//! Central store for control values, selections and attached files.
//!
//! The store is UI-agnostic: it performs no layout and raises no events. Hosts
//! call into it and decide which notifications to emit afterwards.

use crate::id::InputId;
use crate::selection::SelectionRange;
use crate::state::InputState;
use crate::text::{filter_single_line, normalize_newlines};
use core_types::FileHandle;
use std::collections::HashMap;

/// How a control stores text assigned to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlKind {
    /// `<input>` text-like controls: line breaks are stripped.
    SingleLine,
    /// `<textarea>`: line breaks are normalized to LF.
    MultiLine,
    /// `<input type="file">`: carries files, its value is never set from text.
    File,
}

impl ControlKind {
    fn sanitize(self, value: &str) -> String {
        match self {
            ControlKind::SingleLine => filter_single_line(value).into_owned(),
            ControlKind::MultiLine => normalize_newlines(value).into_owned(),
            ControlKind::File => String::new(),
        }
    }
}

/// Value store for the page's form controls.
///
/// ```
/// use input_core::{ControlKind, InputId, InputValueStore};
///
/// let mut store = InputValueStore::new();
/// let id = InputId::from_raw(1);
///
/// store.ensure_initial(id, ControlKind::MultiLine, "{\r\n}");
/// assert_eq!(store.get(id), Some("{\n}"));
///
/// store.select_all(id);
/// assert_eq!(store.selected_text(id), Some("{\n}"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct InputValueStore {
    values: HashMap<InputId, InputState>,
}

impl InputValueStore {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Number of controls with state.
    pub fn control_count(&self) -> usize {
        self.values.len()
    }

    /// Insert the initial value if the control has no entry yet; existing state wins.
    pub fn ensure_initial(&mut self, id: InputId, kind: ControlKind, initial: &str) {
        self.values.entry(id).or_insert_with(|| InputState {
            value: kind.sanitize(initial),
            ..InputState::default()
        });
    }

    pub fn get(&self, id: InputId) -> Option<&str> {
        self.values.get(&id).map(|s| s.value.as_str())
    }

    /// Replace the value. Clears the selection. Returns `true` if the value changed.
    pub fn set(&mut self, id: InputId, kind: ControlKind, value: &str) -> bool {
        let value = kind.sanitize(value);
        let st = self.values.entry(id).or_default();
        st.selection = None;
        if st.value == value {
            return false;
        }
        st.value = value;
        true
    }

    /// Select the whole value. Returns `false` for unknown controls.
    pub fn select_all(&mut self, id: InputId) -> bool {
        let Some(st) = self.values.get_mut(&id) else {
            return false;
        };
        st.selection = Some(SelectionRange::new(0, st.value.len()));
        true
    }

    pub fn selected_text(&self, id: InputId) -> Option<&str> {
        let st = self.values.get(&id)?;
        st.selection.map(|range| range.slice(&st.value))
    }

    /// Replace the attached file list wholesale.
    pub fn set_files(&mut self, id: InputId, files: Vec<FileHandle>) {
        self.values.entry(id).or_default().files = files;
    }

    pub fn files(&self, id: InputId) -> &[FileHandle] {
        self.values
            .get(&id)
            .map(|s| s.files.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u64) -> InputId {
        InputId::from_raw(raw)
    }

    #[test]
    fn ensure_initial_does_not_overwrite_user_state() {
        let mut store = InputValueStore::new();
        store.ensure_initial(id(1), ControlKind::SingleLine, "seed");
        store.set(id(1), ControlKind::SingleLine, "typed");
        store.ensure_initial(id(1), ControlKind::SingleLine, "seed");
        assert_eq!(store.get(id(1)), Some("typed"));
    }

    #[test]
    fn set_sanitizes_by_control_kind() {
        let mut store = InputValueStore::new();
        store.set(id(1), ControlKind::SingleLine, "a\r\nb");
        store.set(id(2), ControlKind::MultiLine, "a\r\nb\rc");
        store.set(id(3), ControlKind::File, "C:\\fakepath\\x.json");
        assert_eq!(store.get(id(1)), Some("ab"));
        assert_eq!(store.get(id(2)), Some("a\nb\nc"));
        assert_eq!(store.get(id(3)), Some(""));
    }

    #[test]
    fn select_all_and_reset_on_edit() {
        let mut store = InputValueStore::new();
        assert!(!store.select_all(id(9)));

        store.ensure_initial(id(1), ControlKind::MultiLine, "{\"a\": 1}");
        assert!(store.select_all(id(1)));
        assert_eq!(store.selected_text(id(1)), Some("{\"a\": 1}"));

        assert!(store.set(id(1), ControlKind::MultiLine, "{}"));
        assert!(!store.set(id(1), ControlKind::MultiLine, "{}"));
        assert_eq!(store.selected_text(id(1)), None);
    }

    #[test]
    fn files_are_replaced_wholesale() {
        let mut store = InputValueStore::new();
        assert!(store.files(id(1)).is_empty());
        store.set_files(
            id(1),
            vec![FileHandle::new("a.json", 10), FileHandle::new("b.json", 20)],
        );
        store.set_files(id(1), vec![FileHandle::new("c.zip", 30)]);
        let names: Vec<&str> = store.files(id(1)).iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["c.zip"]);
        assert_eq!(store.control_count(), 1);
    }
}
