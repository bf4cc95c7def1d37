//! `wasm-bindgen` exports. Only compiled on `wasm32` targets.

use crate::bridge;
use behaviors::BehaviorConfig;
use behaviors::rules::{self, DragPhase, Shortcut};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, DragEvent, Element, Event, EventInit, EventTarget, FileList, HtmlButtonElement,
    HtmlElement, HtmlInputElement, HtmlTextAreaElement, KeyboardEvent, ScrollBehavior,
    ScrollIntoViewOptions,
};

const DRAG_EVENTS: [&str; 4] = ["dragenter", "dragover", "dragleave", "drop"];

/// Wire every behavior onto the current document with the page's default ids and classes.
#[wasm_bindgen(js_name = initializePage)]
pub fn initialize_page() -> Result<(), JsValue> {
    install(BehaviorConfig::default())
}

/// Same as `initializePage`, with ids, classes and colours overridden by a TOML document.
#[wasm_bindgen(js_name = initializePageWithConfig)]
pub fn initialize_page_with_config(config_toml: &str) -> Result<(), JsValue> {
    let config = BehaviorConfig::from_toml_str(config_toml)
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    install(config)
}

#[wasm_bindgen(js_name = formatJSON)]
pub fn format_json(json: &str) -> String {
    behaviors::format_json(json).into_owned()
}

#[wasm_bindgen(js_name = isValidJSON)]
pub fn is_valid_json(json: &str) -> bool {
    behaviors::is_valid_json(json)
}

fn install(config: BehaviorConfig) -> Result<(), JsValue> {
    let doc = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document to initialize"))?;
    let config = Rc::new(config);

    setup_anchor_scrolling(&doc)?;
    setup_keyboard_shortcuts(&doc, &config)?;
    setup_drag_and_drop(&doc, &config)?;
    setup_textarea_auto_resize(&doc, &config)?;
    setup_copy_functionality(&doc, &config)?;
    setup_input_validation(&doc, &config)?;
    inject_highlight_style(&doc, &config)?;

    web_sys::console::log_1(&JsValue::from_str("JSON Converter initialized"));
    Ok(())
}

fn listen<F>(target: &EventTarget, kind: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn elements(doc: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let list = doc.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

fn control_value(el: &Element) -> Option<String> {
    if let Some(textarea) = el.dyn_ref::<HtmlTextAreaElement>() {
        return Some(textarea.value());
    }
    el.dyn_ref::<HtmlInputElement>().map(HtmlInputElement::value)
}

fn inline_style(el: &Element, name: &str) -> Option<String> {
    let value = el.dyn_ref::<HtmlElement>()?.style().get_property_value(name).ok()?;
    (!value.is_empty()).then_some(value)
}

fn set_inline_style(el: &Element, name: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property(name, value);
    }
}

fn setup_anchor_scrolling(doc: &Document) -> Result<(), JsValue> {
    for anchor in elements(doc, r##"a[href^="#"]"##)? {
        let link = anchor.clone();
        let doc = doc.clone();
        listen(&anchor, "click", move |e| {
            e.prevent_default();
            let Some(href) = link.get_attribute("href") else {
                return;
            };
            if let Ok(Some(target)) = doc.query_selector(&href) {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                target.scroll_into_view_with_scroll_into_view_options(&options);
            }
        })?;
    }
    Ok(())
}

fn setup_keyboard_shortcuts(doc: &Document, config: &Rc<BehaviorConfig>) -> Result<(), JsValue> {
    let config = Rc::clone(config);
    let page = doc.clone();
    listen(doc, "keydown", move |e| {
        let Some(k) = e.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let key = bridge::key_event(&k.key(), k.ctrl_key(), k.meta_key(), k.shift_key(), k.alt_key());
        match rules::shortcut_for(&key) {
            Some(Shortcut::Convert) => {
                let ids = &config.elements;
                let Some(button) = page.get_element_by_id(&ids.convert_button) else {
                    return;
                };
                let value = page
                    .get_element_by_id(&ids.json_input)
                    .and_then(|input| control_value(&input));
                if rules::should_convert(value.as_deref())
                    && let Some(button) = button.dyn_ref::<HtmlElement>()
                {
                    e.prevent_default();
                    button.click();
                }
            }
            Some(Shortcut::CloseOverlay) => {
                let Some(overlay) = page.get_element_by_id(&config.elements.progress_overlay) else {
                    return;
                };
                if rules::overlay_visible(inline_style(&overlay, "display").as_deref()) {
                    set_inline_style(&overlay, "display", "none");
                }
            }
            None => {}
        }
    })
}

fn file_handles(files: &FileList) -> Vec<core_types::FileHandle> {
    (0..files.length())
        .filter_map(|i| files.get(i))
        .map(|f| bridge::file_handle(&f.name(), f.size(), &f.type_()))
        .collect()
}

fn setup_drag_and_drop(doc: &Document, config: &Rc<BehaviorConfig>) -> Result<(), JsValue> {
    // One function object for every target, so the browser registers it once per target.
    let suppress = Closure::wrap(Box::new(|e: Event| {
        e.prevent_default();
        e.stop_propagation();
    }) as Box<dyn FnMut(Event)>);
    let suppress_fn: &js_sys::Function = suppress.as_ref().unchecked_ref();

    let wrapper_sel = bridge::class_selector(&config.classes.file_wrapper);
    let label_sel = bridge::class_selector(&config.classes.file_label);

    for el in elements(doc, r#"input[type="file"]"#)? {
        let Ok(input) = el.dyn_into::<HtmlInputElement>() else {
            continue;
        };
        let Some(wrapper) = input.closest(&wrapper_sel)? else {
            continue;
        };
        let Some(label) = wrapper.query_selector(&label_sel)? else {
            continue;
        };

        for kind in DRAG_EVENTS {
            wrapper.add_event_listener_with_callback(kind, suppress_fn)?;
            if let Some(body) = doc.body() {
                body.add_event_listener_with_callback(kind, suppress_fn)?;
            }
        }

        for (kind, phase) in [
            ("dragenter", DragPhase::Enter),
            ("dragover", DragPhase::Over),
            ("dragleave", DragPhase::Leave),
            ("drop", DragPhase::Drop),
        ] {
            let label = label.clone();
            let class = config.classes.drag_highlight.clone();
            let on = rules::highlight_after(phase);
            listen(&wrapper, kind, move |_| {
                let classes = label.class_list();
                let _ = if on {
                    classes.add_1(&class)
                } else {
                    classes.remove_1(&class)
                };
            })?;
        }

        listen(&wrapper, "drop", move |e| {
            let Some(files) = e
                .dyn_ref::<DragEvent>()
                .and_then(DragEvent::data_transfer)
                .and_then(|dt| dt.files())
            else {
                return;
            };
            if !rules::accept_drop(&file_handles(&files)) {
                return;
            }
            input.set_files(Some(&files));
            let init = EventInit::new();
            init.set_bubbles(true);
            if let Ok(change) = Event::new_with_event_init_dict("change", &init) {
                let _ = input.dispatch_event(&change);
            }
        })?;
    }

    suppress.forget();
    Ok(())
}

fn auto_resize(textarea: &HtmlTextAreaElement, min_height: f32) {
    let style = textarea.style();
    let _ = style.set_property("height", "auto");
    let height = rules::auto_resize_height(textarea.scroll_height() as f32, min_height);
    let _ = style.set_property("height", &height.to_css());
}

fn setup_textarea_auto_resize(doc: &Document, config: &Rc<BehaviorConfig>) -> Result<(), JsValue> {
    let min_height = config.textarea.min_height;
    for el in elements(doc, "textarea")? {
        let Ok(textarea) = el.dyn_into::<HtmlTextAreaElement>() else {
            continue;
        };
        auto_resize(&textarea, min_height);
        let target = textarea.clone();
        listen(&textarea, "input", move |_| auto_resize(&target, min_height))?;
    }
    Ok(())
}

fn setup_copy_functionality(doc: &Document, config: &Rc<BehaviorConfig>) -> Result<(), JsValue> {
    let Some(output) = doc.get_element_by_id(&config.elements.json_output) else {
        return Ok(());
    };

    let target = output.clone();
    listen(&output, "dblclick", move |_| {
        if let Some(textarea) = target.dyn_ref::<HtmlTextAreaElement>() {
            textarea.select();
        } else if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
            input.select();
        }
    })?;

    let target = output.clone();
    listen(&output, "contextmenu", move |e| {
        let value = control_value(&target).unwrap_or_default();
        if !rules::allow_context_menu(&value) {
            e.prevent_default();
        }
    })
}

fn setup_input_validation(doc: &Document, config: &Rc<BehaviorConfig>) -> Result<(), JsValue> {
    let ids = &config.elements;
    let (Some(input), Some(button)) = (
        doc.get_element_by_id(&ids.json_input),
        doc.get_element_by_id(&ids.convert_button),
    ) else {
        return Ok(());
    };

    let config = Rc::clone(config);
    let target = input.clone();
    listen(&input, "input", move |_| {
        let value = control_value(&target).unwrap_or_default();
        let feedback = rules::validation_feedback(&value, &config.validation);
        set_inline_style(&target, "border-color", feedback.border_color);
        if feedback.convert_enabled {
            match button.dyn_ref::<HtmlButtonElement>() {
                Some(b) => b.set_disabled(false),
                None => {
                    let _ = button.remove_attribute("disabled");
                }
            }
        }
    })
}

fn inject_highlight_style(doc: &Document, config: &BehaviorConfig) -> Result<(), JsValue> {
    let style = doc.create_element("style")?;
    style.set_text_content(Some(&rules::highlight_css(config)));
    match doc.head() {
        Some(head) => head.append_child(&style)?,
        None => match doc.document_element() {
            Some(root) => root.append_child(&style)?,
            None => return Ok(()),
        },
    };
    Ok(())
}
