use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use js_sys::Function;
use log::{debug, warn};
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use web_sys::{CustomEvent, CustomEventInit, Event, EventTarget, HtmlElement};

use slide_tuning::{
    Listener, Outputs, Propagation, Renderer, TextRenderer, TuningConfig, TuningEvent,
    TuningSession,
};

mod dom;

use dom::DomSurface;

type Session = TuningSession<DomSurface, DomRenderer>;

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// Renderer calling a JS `renderer(value, element, options)` when one was
/// supplied, the default text renderer otherwise. `options` is the
/// serialized configuration with `element` attached.
struct DomRenderer {
    js: Option<Function>,
}

impl Renderer<DomSurface> for DomRenderer {
    fn render(&mut self, value: f64, surface: &mut DomSurface, config: &TuningConfig) {
        let Some(f) = &self.js else {
            TextRenderer.render(value, surface, config);
            return;
        };
        let options = match swb::to_value(config) {
            Ok(options) => options,
            Err(e) => {
                warn!("slide-tuning: options serialization failed: {e}");
                JsValue::UNDEFINED
            }
        };
        if options.is_object() {
            // Renderers written against the object form read `options.element`.
            if let Err(e) = js_sys::Reflect::set(&options, &"element".into(), surface.element()) {
                warn!("slide-tuning: could not attach element to options: {e:?}");
            }
        }
        if let Err(e) = f.call3(
            &JsValue::UNDEFINED,
            &JsValue::from_f64(value),
            surface.element(),
            &options,
        ) {
            warn!("slide-tuning: renderer threw: {e:?}");
        }
    }
}

#[derive(Serialize)]
struct Detail {
    value: f64,
}

/// State shared between the JS-facing handle and the DOM listeners.
pub(crate) struct Shared {
    session: RefCell<Option<Session>>,
    notifier: EventTarget,
    value: Cell<f64>,
}

impl Shared {
    fn notify(&self, event: &TuningEvent) -> Result<(), JsValue> {
        let detail = swb::to_value(&Detail {
            value: event.value(),
        })?;
        let init = CustomEventInit::new();
        init.set_detail(&detail);
        let custom = CustomEvent::new_with_event_init_dict(event.name(), &init)?;
        self.notifier.dispatch_event(&custom)?;
        Ok(())
    }
}

fn apply_directives(event: &Event, outputs: &Outputs) {
    if outputs.prevent_default {
        event.prevent_default();
    }
    match outputs.propagation {
        Propagation::Continue => {}
        Propagation::Stop => event.stop_propagation(),
        Propagation::StopImmediate => event.stop_immediate_propagation(),
    }
}

/// Route one DOM event into the session. Notifications go out only after the
/// session borrow is released so JS observers may call back into the handle.
pub(crate) fn dispatch(
    shared: &Weak<Shared>,
    listener: Listener,
    event: &Event,
) -> Result<(), JsValue> {
    let Some(shared) = shared.upgrade() else {
        return Ok(());
    };
    let Some(input) = dom::to_input(listener, event) else {
        return Ok(());
    };

    let notifications = {
        let Ok(mut guard) = shared.session.try_borrow_mut() else {
            warn!(
                "slide-tuning: dropped re-entrant {} event",
                listener.event_type()
            );
            return Ok(());
        };
        let Some(session) = guard.as_mut() else {
            return Ok(());
        };
        let outputs = session
            .handle(&input)
            .map_err(|e| JsError::new(&format!("slide-tuning: {e}")))?;
        apply_directives(event, outputs);
        let notifications = outputs.events.clone();
        shared.value.set(session.value());
        notifications
    };

    for n in &notifications {
        shared.notify(n)?;
    }
    Ok(())
}

#[wasm_bindgen]
pub struct SlideTuning {
    shared: Rc<Shared>,
}

#[wasm_bindgen]
impl SlideTuning {
    /// Bind a slide-tuning control to `element`.
    /// Example:
    ///   new SlideTuning(el, { value: 5, step: { default: 1, withShift: 10 } })
    /// `renderer`, when given, is called as `renderer(value, element, options)`
    /// where `options` holds the effective configuration (defaults filled in)
    /// plus `options.element`. The renderer function itself is not included.
    #[wasm_bindgen(constructor)]
    pub fn new(
        element: HtmlElement,
        options: JsValue,
        renderer: Option<Function>,
    ) -> Result<SlideTuning, JsError> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        if jsvalue_is_undefined_or_null(&options) {
            return Err(JsError::new("options error: `value` is required"));
        }
        let cfg: TuningConfig =
            swb::from_value(options).map_err(|e| JsError::new(&format!("options error: {e}")))?;
        let document = element
            .owner_document()
            .ok_or_else(|| JsError::new("element has no owner document"))?;
        let notifier =
            EventTarget::new().map_err(|e| JsError::new(&format!("event target error: {e:?}")))?;

        let shared = Rc::new(Shared {
            session: RefCell::new(None),
            notifier,
            value: Cell::new(cfg.value),
        });
        let surface = DomSurface::new(element, document, Rc::downgrade(&shared));
        let session =
            TuningSession::with_renderer(cfg, surface, DomRenderer { js: renderer })
                .map_err(|e| JsError::new(&format!("options error: {e}")))?;
        *shared.session.borrow_mut() = Some(session);
        debug!("slide-tuning wasm handle created");

        Ok(SlideTuning { shared })
    }

    /// Committed value.
    #[wasm_bindgen(getter)]
    pub fn value(&self) -> f64 {
        self.shared.value.get()
    }

    /// Preview of the active gesture, `undefined` when idle or destroyed.
    #[wasm_bindgen(getter, js_name = previewValue)]
    pub fn preview_value(&self) -> Option<f64> {
        self.shared
            .session
            .try_borrow()
            .ok()
            .and_then(|s| s.as_ref().and_then(|s| s.preview_value()))
    }

    #[wasm_bindgen(getter)]
    pub fn dragging(&self) -> bool {
        self.preview_value().is_some()
    }

    /// Observe `change`, `changed` or `cancel`. Listeners receive a
    /// `CustomEvent` whose `detail` is `{ value }`.
    #[wasm_bindgen(js_name = addEventListener)]
    pub fn add_event_listener(&self, kind: &str, listener: &Function) -> Result<(), JsError> {
        self.shared
            .notifier
            .add_event_listener_with_callback(kind, listener)
            .map_err(|e| JsError::new(&format!("addEventListener error: {e:?}")))
    }

    #[wasm_bindgen(js_name = removeEventListener)]
    pub fn remove_event_listener(&self, kind: &str, listener: &Function) -> Result<(), JsError> {
        self.shared
            .notifier
            .remove_event_listener_with_callback(kind, listener)
            .map_err(|e| JsError::new(&format!("removeEventListener error: {e:?}")))
    }

    /// Unbind from the element. Safe to call mid-gesture and more than once.
    pub fn destroy(&self) {
        let Ok(mut guard) = self.shared.session.try_borrow_mut() else {
            warn!("slide-tuning: destroy during dispatch ignored");
            return;
        };
        if let Some(session) = guard.take() {
            self.shared.value.set(session.value());
            drop(session.destroy());
            debug!("slide-tuning wasm handle destroyed");
        }
    }
}

impl Drop for SlideTuning {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
