//! Conversions from the values browser events carry to the behavior types.

use core_types::{FileHandle, Key, KeyEvent, Modifiers};

/// Build a [`KeyEvent`] from `KeyboardEvent.key` and its modifier flags.
pub fn key_event(key: &str, ctrl: bool, meta: bool, shift: bool, alt: bool) -> KeyEvent {
    KeyEvent::new(
        Key::from_dom(key),
        Modifiers {
            ctrl,
            meta,
            shift,
            alt,
        },
    )
}

/// Build a [`FileHandle`] from a `File`'s name, size and type. Browsers report an unknown
/// type as `""` and sizes as a double.
pub fn file_handle(name: &str, size: f64, mime: &str) -> FileHandle {
    let size = if size.is_finite() && size > 0.0 {
        size as u64
    } else {
        0
    };
    let handle = FileHandle::new(name, size);
    if mime.is_empty() {
        handle
    } else {
        handle.with_mime(mime)
    }
}

/// Selector matching elements that carry `class`.
pub fn class_selector(class: &str) -> String {
    format!(".{class}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn keyboard_event_fields_map_onto_key_events() {
        let ev = key_event("Enter", false, true, false, false);
        assert_eq!(ev, KeyEvent::new(Key::Enter, Modifiers::META));
        assert!(ev.modifiers.command());

        let ev = key_event("a", false, false, true, false);
        assert_eq!(ev.key, Key::Other("a".to_string()));
        assert!(ev.modifiers.shift);
    }

    #[test]
    fn file_fields_are_normalized() {
        assert_eq!(file_handle("a.json", 12.0, ""), FileHandle::new("a.json", 12));
        assert_eq!(
            file_handle("b.zip", 3.0, "application/zip"),
            FileHandle::new("b.zip", 3).with_mime("application/zip")
        );
        assert_eq!(file_handle("c", f64::NAN, "").size, 0);
        assert_eq!(file_handle("d", -1.0, "").size, 0);
    }

    #[test]
    fn class_selector_prefixes_a_dot() {
        assert_eq!(class_selector("file-input-wrapper"), ".file-input-wrapper");
    }
}
