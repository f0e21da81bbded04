#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;
use slide_tuning_wasm::{abi_version, SlideTuning};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{CustomEvent, Document, HtmlElement, KeyboardEvent, KeyboardEventInit, MouseEvent, MouseEventInit};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn element() -> HtmlElement {
    let doc = document();
    let el: HtmlElement = doc.create_element("span").unwrap().unchecked_into();
    doc.body().unwrap().append_child(&el).unwrap();
    el
}

fn options(value: serde_json::Value) -> JsValue {
    serde_wasm_bindgen::to_value(&value).unwrap()
}

fn mouse(kind: &str, x: i32, button: i16) -> MouseEvent {
    let init = MouseEventInit::new();
    init.set_client_x(x);
    init.set_button(button);
    init.set_bubbles(true);
    init.set_cancelable(true);
    MouseEvent::new_with_mouse_event_init_dict(kind, &init).unwrap()
}

fn key(k: &str) -> KeyboardEvent {
    let init = KeyboardEventInit::new();
    init.set_key(k);
    init.set_bubbles(true);
    KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap()
}

/// Count deliveries of `kind` on `target`.
fn count_on(target: &web_sys::EventTarget, kind: &str) -> Rc<RefCell<u32>> {
    let hits = Rc::new(RefCell::new(0));
    let sink = hits.clone();
    let cb = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        *sink.borrow_mut() += 1;
    }) as Box<dyn FnMut(web_sys::Event)>);
    target
        .add_event_listener_with_callback(kind, cb.as_ref().unchecked_ref())
        .unwrap();
    cb.forget();
    hits
}

fn record(tuning: &SlideTuning, kind: &'static str) -> Rc<RefCell<Vec<f64>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let cb = Closure::wrap(Box::new(move |event: CustomEvent| {
        let value = js_sys::Reflect::get(&event.detail(), &JsValue::from_str("value"))
            .unwrap()
            .as_f64()
            .unwrap();
        sink.borrow_mut().push(value);
    }) as Box<dyn FnMut(CustomEvent)>);
    tuning
        .add_event_listener(kind, cb.as_ref().unchecked_ref())
        .unwrap();
    cb.forget();
    seen
}

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn construction_marks_and_renders() {
    let el = element();
    let tuning = SlideTuning::new(el.clone(), options(json!({ "value": 5 })), None).unwrap();
    assert!(el.class_list().contains("slide-tuning"));
    assert!(el.class_list().contains("slide-tuning--horizontal"));
    assert_eq!(el.text_content().unwrap(), "5.00");
    tuning.destroy();
    assert!(!el.class_list().contains("slide-tuning"));
}

#[wasm_bindgen_test]
fn custom_renderer_receives_element_in_options() {
    let el = element();
    let renderer = js_sys::Function::new_with_args(
        "value, element, options",
        "element.textContent = (options.element === element ? 'ok:' : 'missing:') \
         + value.toFixed(options.fractionDigits);",
    );
    let tuning = SlideTuning::new(
        el.clone(),
        options(json!({ "value": 3, "fractionDigits": 1 })),
        Some(renderer),
    )
    .unwrap();
    assert_eq!(el.text_content().unwrap(), "ok:3.0");

    el.dispatch_event(&mouse("pointerdown", 0, 0)).unwrap();
    document()
        .dispatch_event(&mouse("pointermove", 20, 0))
        .unwrap();
    assert_eq!(el.text_content().unwrap(), "ok:5.0");
    tuning.destroy();
}

#[wasm_bindgen_test]
fn missing_options_is_an_error() {
    assert!(SlideTuning::new(element(), JsValue::UNDEFINED, None).is_err());
}

#[wasm_bindgen_test]
fn drag_and_commit_emits_change_and_changed() {
    let el = element();
    let doc = document();
    let tuning = SlideTuning::new(el.clone(), options(json!({ "value": 5 })), None).unwrap();
    let changes = record(&tuning, "change");
    let committed = record(&tuning, "changed");

    el.dispatch_event(&mouse("pointerdown", 0, 0)).unwrap();
    assert!(tuning.dragging());
    assert!(doc.body().unwrap().class_list().contains("slide-tuning--active"));

    doc.dispatch_event(&mouse("pointermove", 25, 0)).unwrap();
    doc.dispatch_event(&mouse("pointermove", 5, 0)).unwrap();
    doc.dispatch_event(&mouse("pointerup", 5, 0)).unwrap();

    assert_eq!(*changes.borrow(), vec![7.0, 5.0]);
    assert_eq!(*committed.borrow(), vec![5.0]);
    assert_eq!(tuning.value(), 5.0);
    assert!(!tuning.dragging());
    assert!(!el.class_list().contains("slide-tuning--active"));
    tuning.destroy();
}

#[wasm_bindgen_test]
fn secondary_press_is_ignored() {
    let el = element();
    let tuning = SlideTuning::new(el.clone(), options(json!({ "value": 1 })), None).unwrap();
    el.dispatch_event(&mouse("pointerdown", 0, 2)).unwrap();
    assert!(!tuning.dragging());
    tuning.destroy();
}

#[wasm_bindgen_test]
fn context_menu_cancels_and_prevents_default() {
    let el = element();
    let doc = document();
    let tuning = SlideTuning::new(el.clone(), options(json!({ "value": 5 })), None).unwrap();
    let cancels = record(&tuning, "cancel");

    el.dispatch_event(&mouse("pointerdown", 0, 0)).unwrap();
    doc.dispatch_event(&mouse("pointermove", 30, 0)).unwrap();
    assert_eq!(el.text_content().unwrap(), "8.00");

    let menu = mouse("contextmenu", 30, 2);
    let not_cancelled = doc.dispatch_event(&menu).unwrap();
    assert!(!not_cancelled);
    assert_eq!(*cancels.borrow(), vec![5.0]);
    assert_eq!(el.text_content().unwrap(), "5.00");

    doc.dispatch_event(&mouse("pointermove", 90, 0)).unwrap();
    assert_eq!(el.text_content().unwrap(), "5.00");
    assert_eq!(tuning.value(), 5.0);
    tuning.destroy();
}

#[wasm_bindgen_test]
fn escape_cancels_gesture() {
    let el = element();
    let doc = document();
    let tuning = SlideTuning::new(el.clone(), options(json!({ "value": 2 })), None).unwrap();
    let cancels = record(&tuning, "cancel");

    el.dispatch_event(&mouse("pointerdown", 0, 0)).unwrap();
    doc.dispatch_event(&mouse("pointermove", 20, 0)).unwrap();
    doc.dispatch_event(&key("Escape")).unwrap();

    assert_eq!(*cancels.borrow(), vec![2.0]);
    assert!(!tuning.dragging());
    tuning.destroy();
}

#[wasm_bindgen_test]
fn escape_preempts_later_document_key_handlers() {
    let el = element();
    let doc = document();
    let tuning = SlideTuning::new(el.clone(), options(json!({ "value": 2 })), None).unwrap();

    el.dispatch_event(&mouse("pointerdown", 0, 0)).unwrap();
    // Registered after the gesture's own keydown listener on the same target.
    let other_handler = count_on(&doc, "keydown");

    doc.dispatch_event(&key("a")).unwrap();
    assert_eq!(*other_handler.borrow(), 1, "non-Escape keys pass through");
    assert!(tuning.dragging());

    doc.dispatch_event(&key("Escape")).unwrap();
    assert_eq!(*other_handler.borrow(), 1, "Escape must not reach it");
    assert!(!tuning.dragging());

    // Gesture over: Escape flows normally again.
    doc.dispatch_event(&key("Escape")).unwrap();
    assert_eq!(*other_handler.borrow(), 2);
    tuning.destroy();
}

#[wasm_bindgen_test]
fn context_menu_does_not_bubble_past_document() {
    let el = element();
    let doc = document();
    let window = web_sys::window().unwrap();
    let tuning = SlideTuning::new(el.clone(), options(json!({ "value": 4 })), None).unwrap();
    let window_hits = count_on(&window, "contextmenu");

    el.dispatch_event(&mouse("pointerdown", 0, 0)).unwrap();
    doc.dispatch_event(&mouse("contextmenu", 0, 2)).unwrap();
    assert_eq!(*window_hits.borrow(), 0);
    assert!(!tuning.dragging());

    // Without a gesture the menu event bubbles to the window untouched.
    let menu = mouse("contextmenu", 0, 2);
    assert!(doc.dispatch_event(&menu).unwrap());
    assert_eq!(*window_hits.borrow(), 1);
    tuning.destroy();
}

#[wasm_bindgen_test]
fn destroy_mid_gesture_detaches_document_listeners() {
    let el = element();
    let doc = document();
    let tuning = SlideTuning::new(el.clone(), options(json!({ "value": 0 })), None).unwrap();
    el.dispatch_event(&mouse("pointerdown", 0, 0)).unwrap();
    tuning.destroy();

    assert!(!doc.body().unwrap().class_list().contains("slide-tuning--active"));
    doc.dispatch_event(&mouse("pointermove", 100, 0)).unwrap();
    assert_eq!(el.text_content().unwrap(), "0.00");
    assert_eq!(tuning.value(), 0.0);
}
