//! Event dispatch over the page's ancestor chain, the behavior handlers, and the user-agent
//! default actions that run when nobody prevented them.

use crate::event::{DispatchOutcome, Event, EventFlags, EventKind};
use crate::listener::{Behavior, Listener};
use crate::page::{Notification, Page, PageEffect, input_id};
use crate::rules::{self, Shortcut};
use html::Id;

impl Page {
    /// Deliver `event` to the target, then up the ancestor chain if it bubbles.
    ///
    /// Listeners are snapshotted per node before any runs. `stop_propagation` lets the rest of
    /// the current node's listeners run and skips all further nodes. Nested dispatches raised
    /// by a handler complete before the outer one continues.
    pub fn dispatch(&mut self, event: Event) -> DispatchOutcome {
        if !self.doc.contains(event.target) {
            log::debug!(target: "behaviors.dispatch", "{} to unknown node {:?} dropped", event.kind, event.target);
            return DispatchOutcome::default();
        }

        let mut path = vec![event.target];
        if event.bubbles {
            path.extend(self.doc.ancestors(event.target));
        }

        let mut flags = EventFlags::default();
        let mut delivered = 0;
        for current in path {
            for listener in self.listeners.snapshot(current, event.kind) {
                delivered += 1;
                match listener {
                    Listener::Behavior(behavior) => {
                        self.run_behavior(behavior, &event, current, &mut flags)
                    }
                    Listener::Observer(observer) => self.notifications.push(Notification {
                        observer,
                        kind: event.kind,
                        target: event.target,
                        current_target: current,
                        trusted: event.trusted,
                    }),
                }
            }
            if flags.propagation_stopped {
                break;
            }
        }

        log::trace!(
            target: "behaviors.dispatch",
            "{} on {:?}: {delivered} listener(s), prevented={}",
            event.kind,
            event.target,
            flags.default_prevented
        );

        if !flags.default_prevented {
            self.run_default_action(&event);
        }

        DispatchOutcome {
            default_prevented: flags.default_prevented,
            propagation_stopped: flags.propagation_stopped,
            delivered,
        }
    }

    fn run_behavior(&mut self, behavior: Behavior, event: &Event, current: Id, flags: &mut EventFlags) {
        match behavior {
            Behavior::SmoothScroll => {
                flags.prevent_default();
                self.scroll_to_fragment(current);
            }
            Behavior::KeyboardShortcuts => {
                let Some(shortcut) = event.key().and_then(rules::shortcut_for) else {
                    return;
                };
                match shortcut {
                    Shortcut::Convert => self.convert_shortcut(flags),
                    Shortcut::CloseOverlay => self.close_overlay(),
                }
            }
            Behavior::SuppressDragDefaults => {
                flags.prevent_default();
                flags.stop_propagation();
            }
            Behavior::DragHighlight { label, on } => {
                let class = self.config.classes.drag_highlight.clone();
                if on {
                    self.doc.add_class(label, &class);
                } else {
                    self.doc.remove_class(label, &class);
                }
            }
            Behavior::DropFiles { input } => {
                let files = event.files();
                if !rules::accept_drop(files) {
                    return;
                }
                self.inputs.set_files(input_id(input), files.to_vec());
                log::debug!(target: "behaviors.drop", "{} file(s) attached to {input:?}", files.len());
                self.dispatch(Event::synthetic(EventKind::Change, input, true));
            }
            Behavior::AutoResize => self.auto_resize(current),
            Behavior::SelectAllOnDoubleClick => {
                self.inputs.select_all(input_id(current));
            }
            Behavior::GateContextMenu => {
                if !rules::allow_context_menu(self.value(current).unwrap_or("")) {
                    flags.prevent_default();
                }
            }
            Behavior::ValidateJson { convert_button } => {
                let value = self.value(current).unwrap_or("");
                let feedback = rules::validation_feedback(value, &self.config.validation);
                let color = feedback.border_color.to_string();
                let enable = feedback.convert_enabled;
                self.set_style_property(current, "border-color", &color);
                if enable {
                    self.doc.remove_attr(convert_button, "disabled");
                }
            }
        }
    }

    fn scroll_to_fragment(&mut self, anchor: Id) {
        let Some(href) = self.doc.attr(anchor, "href").map(str::to_string) else {
            return;
        };
        match css::query_selector(&self.doc, self.doc.root(), &href) {
            Ok(Some(target)) => self.effects.push(PageEffect::ScrollIntoView {
                target,
                smooth: true,
            }),
            Ok(None) => log::debug!(target: "behaviors.scroll", "no element for `{href}`"),
            Err(err) => log::debug!(target: "behaviors.scroll", "`{href}` is not a selector: {err}"),
        }
    }

    fn convert_shortcut(&mut self, flags: &mut EventFlags) {
        let ids = &self.config.elements;
        let Some(button) = self.doc.element_by_id(&ids.convert_button) else {
            return;
        };
        let input = self.doc.element_by_id(&ids.json_input);
        if !rules::should_convert(input.and_then(|id| self.value(id))) {
            return;
        }
        flags.prevent_default();
        self.synthetic_click(button);
    }

    fn close_overlay(&mut self) {
        let Some(overlay) = self.doc.element_by_id(&self.config.elements.progress_overlay) else {
            return;
        };
        let display = self.style_property(overlay, "display");
        if rules::overlay_visible(display.as_deref()) {
            self.set_style_property(overlay, "display", "none");
        }
    }

    /// Height := max(content height, minimum), measured with the height reset.
    pub(crate) fn auto_resize(&mut self, textarea: Id) {
        self.set_style_property(textarea, "height", "auto");
        let content = self.measurer.content_height(self.value(textarea).unwrap_or(""));
        let height = rules::auto_resize_height(content, self.config.textarea.min_height);
        self.set_style_property(textarea, "height", &height.to_css());
    }

    fn run_default_action(&mut self, event: &Event) {
        match event.kind {
            EventKind::Click => {
                let link = std::iter::once(event.target)
                    .chain(self.doc.ancestors(event.target))
                    .find(|id| self.doc.is_element_named(*id, "a") && self.doc.has_attr(*id, "href"));
                if let Some(href) = link.and_then(|id| self.doc.attr(id, "href")) {
                    let href = href.to_string();
                    self.effects.push(PageEffect::Navigate { href });
                }
            }
            EventKind::ContextMenu if event.trusted => {
                self.effects.push(PageEffect::NativeContextMenu {
                    target: event.target,
                });
            }
            EventKind::Drop if event.trusted && !event.files().is_empty() => {
                self.effects.push(PageEffect::OpenDroppedFiles {
                    target: event.target,
                    count: event.files().len(),
                });
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::BehaviorConfig;
    use crate::event::{Event, EventKind};
    use crate::listener::Behavior;
    use crate::page::{Page, PageEffect};
    use core_types::FileHandle;

    const PAGE: &str = r#"<body><div id="outer"><div id="inner"><a id="link" href="/help"><span id="label">Help</span></a></div></div></body>"#;

    fn page() -> Page {
        Page::from_html(PAGE, BehaviorConfig::default())
    }

    #[test]
    fn bubbles_from_target_to_document() {
        let mut page = page();
        let label = page.element_by_id("label").unwrap();
        let outer = page.element_by_id("outer").unwrap();
        let root = page.document().root();
        let at_outer = page.observe(outer, EventKind::DblClick);
        let at_root = page.observe(root, EventKind::DblClick);

        let outcome = page.double_click(label);
        assert_eq!(outcome.delivered, 2);
        let n: Vec<_> = page.notifications().iter().map(|n| (n.observer, n.current_target)).collect();
        assert_eq!(n, vec![(at_outer, outer), (at_root, root)]);
    }

    #[test]
    fn non_bubbling_event_stays_on_target() {
        let mut page = page();
        let inner = page.element_by_id("inner").unwrap();
        let outer = page.element_by_id("outer").unwrap();
        page.observe(inner, EventKind::Change);
        page.observe(outer, EventKind::Change);
        let outcome = page.dispatch(Event::synthetic(EventKind::Change, inner, false));
        assert_eq!(outcome.delivered, 1);
    }

    #[test]
    fn stop_propagation_finishes_current_node_only() {
        let mut page = page();
        let inner = page.element_by_id("inner").unwrap();
        let outer = page.element_by_id("outer").unwrap();
        page.add_behavior(inner, EventKind::DragOver, Behavior::SuppressDragDefaults);
        let same_node = page.observe(inner, EventKind::DragOver);
        let parent = page.observe(outer, EventKind::DragOver);

        let outcome = page.drag_over(inner);
        assert!(outcome.default_prevented);
        assert!(outcome.propagation_stopped);
        assert_eq!(page.notifications_for(same_node).count(), 1);
        assert_eq!(page.notifications_for(parent).count(), 0);
    }

    #[test]
    fn unprevented_link_click_navigates() {
        let mut page = page();
        let label = page.element_by_id("label").unwrap();
        page.click(label);
        assert_eq!(
            page.take_effects(),
            vec![PageEffect::Navigate {
                href: "/help".to_string()
            }]
        );
        assert!(page.effects().is_empty());
    }

    #[test]
    fn unprevented_drop_and_context_menu_reach_the_user_agent() {
        let mut page = page();
        let inner = page.element_by_id("inner").unwrap();
        page.drop_files(inner, vec![]);
        assert!(page.effects().is_empty());
        page.drop_files(inner, vec![FileHandle::new("a.json", 1)]);
        page.context_menu(inner);
        assert_eq!(
            page.effects(),
            &[
                PageEffect::OpenDroppedFiles {
                    target: inner,
                    count: 1
                },
                PageEffect::NativeContextMenu { target: inner },
            ]
        );
    }

    #[test]
    fn events_for_unknown_nodes_are_dropped() {
        let mut page = page();
        let outcome = page.click(html::Id(9_999));
        assert_eq!(outcome.delivered, 0);
        assert!(page.effects().is_empty());
    }
}
