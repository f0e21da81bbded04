//! DOM-backed [`Surface`]: classes on the element and `document.body`,
//! listeners on the element and `document`, text content on the element.

use std::rc::Weak;

use log::warn;
use slide_tuning::surface::ListenerIdAllocator;
use slide_tuning::{
    InputEvent, Listener, ListenerId, ListenerTarget, MarkerScope, Modifiers, PointerButton,
    Surface,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Document, Event, EventTarget, HtmlElement, KeyboardEvent, MouseEvent,
};

use crate::Shared;

type Handler = Closure<dyn FnMut(Event) -> Result<(), JsValue>>;

struct Registration {
    id: ListenerId,
    listener: Listener,
    target: EventTarget,
    handler: Handler,
}

pub(crate) struct DomSurface {
    element: HtmlElement,
    document: Document,
    shared: Weak<Shared>,
    ids: ListenerIdAllocator,
    live: Vec<Registration>,
}

impl DomSurface {
    pub(crate) fn new(element: HtmlElement, document: Document, shared: Weak<Shared>) -> Self {
        Self {
            element,
            document,
            shared,
            ids: ListenerIdAllocator::new(),
            live: Vec::new(),
        }
    }

    pub(crate) fn element(&self) -> &HtmlElement {
        &self.element
    }

    fn scope_element(&self, scope: MarkerScope) -> Option<HtmlElement> {
        match scope {
            MarkerScope::Element => Some(self.element.clone()),
            MarkerScope::Container => self.document.body(),
        }
    }

    fn target(&self, listener: Listener) -> EventTarget {
        match listener.target() {
            ListenerTarget::Element => self.element.clone().unchecked_into(),
            ListenerTarget::Document => self.document.clone().unchecked_into(),
        }
    }
}

impl Surface for DomSurface {
    fn add_class(&mut self, scope: MarkerScope, class: &str) {
        if let Some(el) = self.scope_element(scope) {
            if let Err(e) = el.class_list().add_1(class) {
                warn!("slide-tuning: cannot add class {class}: {e:?}");
            }
        }
    }

    fn remove_class(&mut self, scope: MarkerScope, class: &str) {
        if let Some(el) = self.scope_element(scope) {
            if let Err(e) = el.class_list().remove_1(class) {
                warn!("slide-tuning: cannot remove class {class}: {e:?}");
            }
        }
    }

    fn listen(&mut self, listener: Listener, once: bool) -> ListenerId {
        let id = self.ids.alloc();
        let shared = self.shared.clone();
        let handler: Handler = Closure::wrap(Box::new(move |event: Event| {
            crate::dispatch(&shared, listener, &event)
        }) as Box<dyn FnMut(Event) -> Result<(), JsValue>>);

        let target = self.target(listener);
        let options = AddEventListenerOptions::new();
        options.set_once(once);
        if let Err(e) = target.add_event_listener_with_callback_and_add_event_listener_options(
            listener.event_type(),
            handler.as_ref().unchecked_ref(),
            &options,
        ) {
            warn!(
                "slide-tuning: cannot listen for {}: {e:?}",
                listener.event_type()
            );
        }

        self.live.push(Registration {
            id,
            listener,
            target,
            handler,
        });
        id
    }

    fn unlisten(&mut self, id: ListenerId) {
        let Some(pos) = self.live.iter().position(|r| r.id == id) else {
            return;
        };
        // Dropping the handler while it runs (release listener ending its own
        // gesture) is fine: wasm-bindgen defers the free until it returns.
        let reg = self.live.remove(pos);
        // Already gone when a `once` listener fired; removal is then a no-op.
        let _ = reg.target.remove_event_listener_with_callback(
            reg.listener.event_type(),
            reg.handler.as_ref().unchecked_ref(),
        );
    }

    fn set_text(&mut self, text: &str) {
        self.element.set_text_content(Some(text));
    }
}

impl Drop for DomSurface {
    fn drop(&mut self) {
        let ids: Vec<ListenerId> = self.live.iter().map(|r| r.id).collect();
        for id in ids {
            self.unlisten(id);
        }
    }
}

fn modifiers(event: &MouseEvent) -> Modifiers {
    Modifiers {
        alt: event.alt_key(),
        ctrl: event.ctrl_key(),
        shift: event.shift_key(),
    }
}

/// Translate a DOM event delivered to `listener` into a session input.
pub(crate) fn to_input(listener: Listener, event: &Event) -> Option<InputEvent> {
    match listener {
        Listener::Press => {
            let e = event.dyn_ref::<MouseEvent>()?;
            Some(InputEvent::PointerDown {
                x: f64::from(e.client_x()),
                y: f64::from(e.client_y()),
                button: PointerButton::from_code(e.button()),
                modifiers: modifiers(e),
            })
        }
        Listener::Move => {
            let e = event.dyn_ref::<MouseEvent>()?;
            Some(InputEvent::PointerMove {
                x: f64::from(e.client_x()),
                y: f64::from(e.client_y()),
                modifiers: modifiers(e),
            })
        }
        Listener::Release => {
            let e = event.dyn_ref::<MouseEvent>()?;
            Some(InputEvent::PointerUp {
                x: f64::from(e.client_x()),
                y: f64::from(e.client_y()),
            })
        }
        Listener::ContextMenu => Some(InputEvent::ContextMenu),
        Listener::KeyDown => {
            let e = event.dyn_ref::<KeyboardEvent>()?;
            Some(InputEvent::KeyDown { key: e.key() })
        }
    }
}
