use crate::config::BehaviorConfig;
use crate::event::{DispatchOutcome, Event, EventKind, EventPayload};
use crate::init::InitReport;
use crate::listener::{Behavior, Listener, ListenerRegistry, ObserverId};
use crate::measure::{ContentMeasurer, LineMeasurer};
use core_types::{FileHandle, KeyEvent};
use css::{InlineStyle, SelectorError};
use html::{Document, Id};
use input_core::{ControlKind, InputId, InputValueStore};

/// Something the page asked its host to do: user-agent default actions and scroll requests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageEffect {
    ScrollIntoView { target: Id, smooth: bool },
    Navigate { href: String },
    NativeContextMenu { target: Id },
    OpenDroppedFiles { target: Id, count: usize },
}

/// One delivery of an event to an external observer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub observer: ObserverId,
    pub kind: EventKind,
    pub target: Id,
    pub current_target: Id,
    pub trusted: bool,
}

/// Headless host for the page behaviors: the document, form-control state, registered
/// listeners and a log of what the page asked the user agent to do.
pub struct Page {
    pub(crate) doc: Document,
    pub(crate) inputs: InputValueStore,
    pub(crate) listeners: ListenerRegistry,
    pub(crate) config: BehaviorConfig,
    pub(crate) measurer: Box<dyn ContentMeasurer>,
    pub(crate) effects: Vec<PageEffect>,
    pub(crate) notifications: Vec<Notification>,
    pub(crate) report: Option<InitReport>,
}

pub(crate) fn input_id(id: Id) -> InputId {
    InputId::from(id.0)
}

/// How a form control stores its value; `None` for everything that is not a control.
pub fn control_kind(doc: &Document, id: Id) -> Option<ControlKind> {
    if doc.is_element_named(id, "textarea") {
        return Some(ControlKind::MultiLine);
    }
    if !doc.is_element_named(id, "input") {
        return None;
    }
    match doc.attr(id, "type") {
        Some(t) if t.trim().eq_ignore_ascii_case("file") => Some(ControlKind::File),
        _ => Some(ControlKind::SingleLine),
    }
}

impl Page {
    pub fn new(doc: Document, config: BehaviorConfig) -> Self {
        let mut inputs = InputValueStore::new();
        for id in doc.elements() {
            let Some(kind) = control_kind(&doc, id) else {
                continue;
            };
            let initial = match kind {
                ControlKind::MultiLine => doc.text_content(id),
                ControlKind::SingleLine => doc.attr(id, "value").unwrap_or("").to_string(),
                ControlKind::File => String::new(),
            };
            inputs.ensure_initial(input_id(id), kind, &initial);
        }
        log::debug!(target: "behaviors.page", "seeded {} form controls", inputs.control_count());

        Self {
            doc,
            inputs,
            listeners: ListenerRegistry::new(),
            config,
            measurer: Box::new(LineMeasurer::default()),
            effects: Vec::new(),
            notifications: Vec::new(),
            report: None,
        }
    }

    pub fn from_html(html: &str, config: BehaviorConfig) -> Self {
        Self::new(Document::parse(html), config)
    }

    pub fn with_measurer(mut self, measurer: impl ContentMeasurer + 'static) -> Self {
        self.measurer = Box::new(measurer);
        self
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    pub fn element_by_id(&self, id: &str) -> Option<Id> {
        self.doc.element_by_id(id)
    }

    pub fn query_selector(&self, selector: &str) -> Result<Option<Id>, SelectorError> {
        css::query_selector(&self.doc, self.doc.root(), selector)
    }

    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<Id>, SelectorError> {
        css::query_selector_all(&self.doc, self.doc.root(), selector)
    }

    /// Report of the last [`initialize`](crate::initialize) run on this page.
    pub fn init_report(&self) -> Option<&InitReport> {
        self.report.as_ref()
    }

    // Form controls

    /// Current value of a form control, `None` for anything else.
    pub fn value(&self, id: Id) -> Option<&str> {
        control_kind(&self.doc, id)?;
        self.inputs.get(input_id(id))
    }

    pub fn files(&self, id: Id) -> &[FileHandle] {
        self.inputs.files(input_id(id))
    }

    pub fn selected_text(&self, id: Id) -> Option<&str> {
        self.inputs.selected_text(input_id(id))
    }

    /// Controls ignore user interaction while they carry `disabled`.
    pub fn is_disabled(&self, id: Id) -> bool {
        let form_element = ["button", "input", "textarea", "select"]
            .iter()
            .any(|name| self.doc.is_element_named(id, name));
        form_element && self.doc.has_attr(id, "disabled")
    }

    // Inline style

    pub fn style_property(&self, id: Id, name: &str) -> Option<String> {
        let style = InlineStyle::parse(self.doc.attr(id, "style")?);
        style.get(name).map(str::to_string)
    }

    /// Set one inline style property; an empty value removes it. Returns `true` when the
    /// `style` attribute changed.
    pub fn set_style_property(&mut self, id: Id, name: &str, value: &str) -> bool {
        if !self.doc.is_element(id) {
            return false;
        }
        let mut style = InlineStyle::parse(self.doc.attr(id, "style").unwrap_or(""));
        style.set(name, value);
        if style.is_empty() {
            self.doc.remove_attr(id, "style")
        } else {
            let css = style.to_css();
            self.doc.set_attr(id, "style", &css)
        }
    }

    // Listeners, observers and the effect log

    pub(crate) fn add_behavior(&mut self, target: Id, kind: EventKind, behavior: Behavior) -> bool {
        self.listeners
            .add(target, kind, Listener::Behavior(behavior))
    }

    pub fn listener_count(&self, target: Id, kind: EventKind) -> usize {
        self.listeners.count_for(target, kind)
    }

    /// Watch `kind` events reaching `target` (directly or by bubbling).
    pub fn observe(&mut self, target: Id, kind: EventKind) -> ObserverId {
        let observer = self.listeners.new_observer();
        self.listeners
            .add(target, kind, Listener::Observer(observer));
        observer
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn notifications_for(&self, observer: ObserverId) -> impl Iterator<Item = &Notification> {
        self.notifications
            .iter()
            .filter(move |n| n.observer == observer)
    }

    pub fn effects(&self) -> &[PageEffect] {
        &self.effects
    }

    pub fn take_effects(&mut self) -> Vec<PageEffect> {
        std::mem::take(&mut self.effects)
    }

    // Host operations: what a user does to the page.

    /// Replace a text control's value and raise `input`, as typing or pasting does.
    /// Returns `None` if `id` is not a text control.
    pub fn type_text(&mut self, id: Id, text: &str) -> Option<DispatchOutcome> {
        let kind = control_kind(&self.doc, id)?;
        if kind == ControlKind::File {
            return None;
        }
        self.inputs.set(input_id(id), kind, text);
        Some(self.dispatch(Event::trusted(EventKind::Input, id)))
    }

    pub fn click(&mut self, id: Id) -> DispatchOutcome {
        self.click_as(id, true)
    }

    /// `element.click()`: same as a user click, but untrusted.
    pub(crate) fn synthetic_click(&mut self, id: Id) -> DispatchOutcome {
        self.click_as(id, false)
    }

    fn click_as(&mut self, id: Id, trusted: bool) -> DispatchOutcome {
        if self.is_disabled(id) {
            log::debug!(target: "behaviors.page", "click on disabled {id:?} ignored");
            return DispatchOutcome::default();
        }
        let mut event = Event::trusted(EventKind::Click, id);
        event.trusted = trusted;
        self.dispatch(event)
    }

    pub fn double_click(&mut self, id: Id) -> DispatchOutcome {
        self.dispatch(Event::trusted(EventKind::DblClick, id))
    }

    pub fn context_menu(&mut self, id: Id) -> DispatchOutcome {
        self.dispatch(Event::trusted(EventKind::ContextMenu, id))
    }

    /// Key press on `target`, or on the body when nothing is focused.
    pub fn key_down(&mut self, target: Option<Id>, key: KeyEvent) -> DispatchOutcome {
        let target = target
            .or_else(|| self.doc.body())
            .unwrap_or_else(|| self.doc.root());
        self.dispatch(Event::trusted(EventKind::KeyDown, target).with_payload(EventPayload::Key(key)))
    }

    pub fn drag_enter(&mut self, id: Id) -> DispatchOutcome {
        self.dispatch(Event::trusted(EventKind::DragEnter, id))
    }

    pub fn drag_over(&mut self, id: Id) -> DispatchOutcome {
        self.dispatch(Event::trusted(EventKind::DragOver, id))
    }

    pub fn drag_leave(&mut self, id: Id) -> DispatchOutcome {
        self.dispatch(Event::trusted(EventKind::DragLeave, id))
    }

    pub fn drop_files(&mut self, id: Id, files: Vec<FileHandle>) -> DispatchOutcome {
        self.dispatch(Event::trusted(EventKind::Drop, id).with_payload(EventPayload::Files(files)))
    }

    /// Files picked through the native dialog of a file input. Returns `None` if `id` is not a
    /// file input.
    pub fn choose_files(&mut self, id: Id, files: Vec<FileHandle>) -> Option<DispatchOutcome> {
        if control_kind(&self.doc, id)? != ControlKind::File {
            return None;
        }
        self.inputs.set_files(input_id(id), files);
        Some(self.dispatch(Event::trusted(EventKind::Change, id)))
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("nodes", &self.doc.len())
            .field("controls", &self.inputs.control_count())
            .field("listeners", &self.listeners.len())
            .field("effects", &self.effects)
            .finish_non_exhaustive()
    }
}
