use core_types::{FileHandle, KeyEvent};
use html::Id;

/// DOM event types the behaviors listen for or emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    DblClick,
    ContextMenu,
    KeyDown,
    Input,
    Change,
    DragEnter,
    DragOver,
    DragLeave,
    Drop,
}

impl EventKind {
    pub const ALL: [EventKind; 10] = [
        EventKind::Click,
        EventKind::DblClick,
        EventKind::ContextMenu,
        EventKind::KeyDown,
        EventKind::Input,
        EventKind::Change,
        EventKind::DragEnter,
        EventKind::DragOver,
        EventKind::DragLeave,
        EventKind::Drop,
    ];

    pub const DRAG: [EventKind; 4] = [
        EventKind::DragEnter,
        EventKind::DragOver,
        EventKind::DragLeave,
        EventKind::Drop,
    ];

    /// The DOM event type string.
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::DblClick => "dblclick",
            EventKind::ContextMenu => "contextmenu",
            EventKind::KeyDown => "keydown",
            EventKind::Input => "input",
            EventKind::Change => "change",
            EventKind::DragEnter => "dragenter",
            EventKind::DragOver => "dragover",
            EventKind::DragLeave => "dragleave",
            EventKind::Drop => "drop",
        }
    }

    pub fn from_name(name: &str) -> Option<EventKind> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }

    /// Every event used here bubbles when raised by the user agent.
    pub fn bubbles(self) -> bool {
        true
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EventPayload {
    #[default]
    None,
    Key(KeyEvent),
    Files(Vec<FileHandle>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub target: Id,
    pub bubbles: bool,
    /// Raised by the user agent rather than by a behavior.
    pub trusted: bool,
    pub payload: EventPayload,
}

impl Event {
    /// An event as the user agent raises it.
    pub fn trusted(kind: EventKind, target: Id) -> Self {
        Self {
            kind,
            target,
            bubbles: kind.bubbles(),
            trusted: true,
            payload: EventPayload::None,
        }
    }

    /// An event raised by a behavior (`new Event(kind, { bubbles })` / `el.click()`).
    pub fn synthetic(kind: EventKind, target: Id, bubbles: bool) -> Self {
        Self {
            kind,
            target,
            bubbles,
            trusted: false,
            payload: EventPayload::None,
        }
    }

    pub fn with_payload(mut self, payload: EventPayload) -> Self {
        self.payload = payload;
        self
    }

    pub fn key(&self) -> Option<&KeyEvent> {
        match &self.payload {
            EventPayload::Key(key) => Some(key),
            _ => None,
        }
    }

    pub fn files(&self) -> &[FileHandle] {
        match &self.payload {
            EventPayload::Files(files) => files,
            _ => &[],
        }
    }
}

/// Flags listeners flip while an event is in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct EventFlags {
    pub default_prevented: bool,
    pub propagation_stopped: bool,
}

impl EventFlags {
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

/// Result of dispatching one event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub default_prevented: bool,
    pub propagation_stopped: bool,
    /// Listener invocations across all phases.
    pub delivered: usize,
}
