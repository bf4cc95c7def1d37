use crate::event::EventKind;
use html::Id;
use std::collections::HashMap;

/// A behavior handler bound to one target. Handlers carry the ids they need, so two
/// registrations compare equal exactly when they would do the same thing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Behavior {
    SmoothScroll,
    KeyboardShortcuts,
    SuppressDragDefaults,
    DragHighlight { label: Id, on: bool },
    DropFiles { input: Id },
    AutoResize,
    SelectAllOnDoubleClick,
    GateContextMenu,
    ValidateJson { convert_button: Id },
}

/// Handle returned by [`Page::observe`](crate::Page::observe).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u32);

impl ObserverId {
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Listener {
    Behavior(Behavior),
    Observer(ObserverId),
}

/// Listeners per (target, event type), in registration order.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    by_target: HashMap<(Id, EventKind), Vec<Listener>>,
    next_observer: u32,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener`; an identical listener already on the same target and type is not
    /// added again. Returns `true` if the listener was added.
    pub fn add(&mut self, target: Id, kind: EventKind, listener: Listener) -> bool {
        let list = self.by_target.entry((target, kind)).or_default();
        if list.contains(&listener) {
            return false;
        }
        list.push(listener);
        true
    }

    pub fn new_observer(&mut self) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        id
    }

    /// Copy of the current list; listeners added while it runs are not invoked for this event.
    pub fn snapshot(&self, target: Id, kind: EventKind) -> Vec<Listener> {
        self.by_target
            .get(&(target, kind))
            .cloned()
            .unwrap_or_default()
    }

    pub fn count_for(&self, target: Id, kind: EventKind) -> usize {
        self.by_target.get(&(target, kind)).map_or(0, Vec::len)
    }

    pub fn len(&self) -> usize {
        self.by_target.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_listeners_are_registered_once() {
        let mut reg = ListenerRegistry::new();
        let body = Id(2);
        let suppress = Listener::Behavior(Behavior::SuppressDragDefaults);
        assert!(reg.add(body, EventKind::Drop, suppress));
        assert!(!reg.add(body, EventKind::Drop, suppress));
        assert!(reg.add(body, EventKind::DragOver, suppress));
        assert_eq!(reg.count_for(body, EventKind::Drop), 1);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn handlers_with_different_bindings_are_distinct() {
        let mut reg = ListenerRegistry::new();
        let wrapper = Id(5);
        let on = Behavior::DragHighlight {
            label: Id(7),
            on: true,
        };
        let other_label = Behavior::DragHighlight {
            label: Id(8),
            on: true,
        };
        assert!(reg.add(wrapper, EventKind::DragEnter, Listener::Behavior(on)));
        assert!(reg.add(wrapper, EventKind::DragEnter, Listener::Behavior(other_label)));
        assert_eq!(
            reg.snapshot(wrapper, EventKind::DragEnter),
            vec![Listener::Behavior(on), Listener::Behavior(other_label)]
        );
    }

    #[test]
    fn observers_get_fresh_ids() {
        let mut reg = ListenerRegistry::new();
        let a = reg.new_observer();
        let b = reg.new_observer();
        assert_ne!(a, b);
        assert_eq!(reg.len(), 0);
        assert!(reg.snapshot(Id(1), EventKind::Change).is_empty());
    }
}
