//! Wiring of every behavior onto a freshly loaded page.

use crate::event::EventKind;
use crate::listener::Behavior;
use crate::page::{Page, control_kind};
use crate::rules;
use html::Id;
use input_core::ControlKind;

/// What [`initialize`] found and wired on a page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InitReport {
    /// In-page anchors given smooth scrolling.
    pub anchors: usize,
    /// File inputs wired for drag and drop.
    pub file_inputs: usize,
    /// File inputs left alone because they have no wrapper or no label.
    pub skipped_file_inputs: usize,
    pub textareas: usize,
    pub convert_button: bool,
    pub json_input: bool,
    pub progress_overlay: bool,
    pub json_output: bool,
    /// Input validation needs both the JSON input and the convert button.
    pub validation: bool,
}

impl std::fmt::Display for InitReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "anchors={} file_inputs={} (skipped {}) textareas={} validation={} copy_helpers={}",
            self.anchors,
            self.file_inputs,
            self.skipped_file_inputs,
            self.textareas,
            self.validation,
            self.json_output
        )
    }
}

/// Attach all page behaviors. Running it again on the same page changes nothing and returns
/// the first report.
pub fn initialize(page: &mut Page) -> InitReport {
    if let Some(report) = page.report.clone() {
        log::debug!(target: "behaviors.init", "page already initialized");
        return report;
    }

    let mut report = InitReport::default();
    setup_anchor_scrolling(page, &mut report);
    setup_keyboard_shortcuts(page, &mut report);
    setup_drag_and_drop(page, &mut report);
    setup_textarea_auto_resize(page, &mut report);
    setup_copy_functionality(page, &mut report);
    setup_input_validation(page, &mut report);
    inject_highlight_style(page);

    log::info!(target: "behaviors.init", "JSON converter initialized: {report}");
    page.report = Some(report.clone());
    report
}

fn setup_anchor_scrolling(page: &mut Page, report: &mut InitReport) {
    let anchors: Vec<Id> = page
        .doc
        .elements()
        .filter(|id| page.doc.is_element_named(*id, "a"))
        .filter(|id| rules::is_fragment_link(page.doc.attr(*id, "href")))
        .collect();
    for anchor in anchors {
        page.add_behavior(anchor, EventKind::Click, Behavior::SmoothScroll);
        report.anchors += 1;
    }
}

fn setup_keyboard_shortcuts(page: &mut Page, report: &mut InitReport) {
    let root = page.doc.root();
    page.add_behavior(root, EventKind::KeyDown, Behavior::KeyboardShortcuts);

    let ids = &page.config.elements;
    report.convert_button = page.doc.element_by_id(&ids.convert_button).is_some();
    report.json_input = page.doc.element_by_id(&ids.json_input).is_some();
    report.progress_overlay = page.doc.element_by_id(&ids.progress_overlay).is_some();
}

fn setup_drag_and_drop(page: &mut Page, report: &mut InitReport) {
    let file_inputs: Vec<Id> = page
        .doc
        .elements()
        .filter(|id| control_kind(&page.doc, *id) == Some(ControlKind::File))
        .collect();
    let body = page.doc.body().unwrap_or_else(|| page.doc.root());
    let wrapper_sel = format!(".{}", page.config.classes.file_wrapper);
    let label_sel = format!(".{}", page.config.classes.file_label);

    for input in file_inputs {
        let wrapper = css::closest(&page.doc, input, &wrapper_sel).ok().flatten();
        let label = wrapper.and_then(|w| css::query_selector(&page.doc, w, &label_sel).ok().flatten());
        let (Some(wrapper), Some(label)) = (wrapper, label) else {
            log::debug!(target: "behaviors.init", "file input {input:?} has no wrapper/label, skipped");
            report.skipped_file_inputs += 1;
            continue;
        };

        for kind in EventKind::DRAG {
            page.add_behavior(wrapper, kind, Behavior::SuppressDragDefaults);
            page.add_behavior(body, kind, Behavior::SuppressDragDefaults);
        }
        for (kind, phase) in [
            (EventKind::DragEnter, rules::DragPhase::Enter),
            (EventKind::DragOver, rules::DragPhase::Over),
            (EventKind::DragLeave, rules::DragPhase::Leave),
            (EventKind::Drop, rules::DragPhase::Drop),
        ] {
            let on = rules::highlight_after(phase);
            page.add_behavior(wrapper, kind, Behavior::DragHighlight { label, on });
        }
        page.add_behavior(wrapper, EventKind::Drop, Behavior::DropFiles { input });
        report.file_inputs += 1;
    }
}

fn setup_textarea_auto_resize(page: &mut Page, report: &mut InitReport) {
    let textareas: Vec<Id> = page
        .doc
        .elements()
        .filter(|id| page.doc.is_element_named(*id, "textarea"))
        .collect();
    for textarea in textareas {
        page.auto_resize(textarea);
        page.add_behavior(textarea, EventKind::Input, Behavior::AutoResize);
        report.textareas += 1;
    }
}

fn setup_copy_functionality(page: &mut Page, report: &mut InitReport) {
    let Some(output) = page.doc.element_by_id(&page.config.elements.json_output) else {
        return;
    };
    page.add_behavior(output, EventKind::DblClick, Behavior::SelectAllOnDoubleClick);
    page.add_behavior(output, EventKind::ContextMenu, Behavior::GateContextMenu);
    report.json_output = true;
}

fn setup_input_validation(page: &mut Page, report: &mut InitReport) {
    let ids = &page.config.elements;
    let input = page.doc.element_by_id(&ids.json_input);
    let button = page.doc.element_by_id(&ids.convert_button);
    let (Some(input), Some(convert_button)) = (input, button) else {
        return;
    };
    page.add_behavior(input, EventKind::Input, Behavior::ValidateJson { convert_button });
    report.validation = true;
}

fn inject_highlight_style(page: &mut Page) {
    let parent = page.doc.head().unwrap_or_else(|| page.doc.root());
    let css = rules::highlight_css(&page.config);
    let style = page.doc.create_element("style", Vec::new());
    let text = page.doc.create_text(&css);
    let attached = page
        .doc
        .append_child(style, text)
        .and_then(|()| page.doc.append_child(parent, style));
    if let Err(err) = attached {
        log::warn!(target: "behaviors.init", "could not inject highlight style: {err:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BehaviorConfig;

    #[test]
    fn empty_page_wires_only_the_document_listener() {
        let mut page = Page::from_html("<p>nothing here</p>", BehaviorConfig::default());
        let report = initialize(&mut page);
        assert_eq!(report, InitReport::default());
        let root = page.document().root();
        assert_eq!(page.listener_count(root, EventKind::KeyDown), 1);
        let style = page.document().first_element_named("style").unwrap();
        assert_eq!(page.document().parent(style), Some(root));
    }

    #[test]
    fn second_run_is_a_no_op() {
        let mut page = Page::from_html(
            r##"<head></head><body><a href="#x">x</a><textarea id="json-output"></textarea></body>"##,
            BehaviorConfig::default(),
        );
        let first = initialize(&mut page);
        let second = initialize(&mut page);
        assert_eq!(first, second);
        assert_eq!(first.anchors, 1);
        assert!(first.json_output);
        let styles = page
            .document()
            .elements()
            .filter(|id| page.document().is_element_named(*id, "style"))
            .count();
        assert_eq!(styles, 1);
        let anchor = page.query_selector("a").unwrap().unwrap();
        assert_eq!(page.listener_count(anchor, EventKind::Click), 1);
    }

    #[test]
    fn report_display_is_one_line() {
        let report = InitReport {
            anchors: 2,
            file_inputs: 1,
            textareas: 2,
            validation: true,
            ..InitReport::default()
        };
        assert_eq!(
            report.to_string(),
            "anchors=2 file_inputs=1 (skipped 0) textareas=2 validation=true copy_helpers=false"
        );
    }
}
