//! In-memory [`Surface`] for tests and hosts without a DOM.
//!
//! Records classes per scope, live listener registrations and element text.
//! [`HeadlessSurface::deliver`] mimics DOM dispatch: it reports whether a
//! listener for the event is registered and consumes `once` registrations.

use std::collections::BTreeSet;

use crate::inputs::InputEvent;
use crate::surface::{Listener, ListenerId, ListenerIdAllocator, MarkerScope, Surface};

#[derive(Debug, Clone, Copy)]
struct Registration {
    id: ListenerId,
    listener: Listener,
    once: bool,
}

#[derive(Debug, Default)]
pub struct HeadlessSurface {
    ids: ListenerIdAllocator,
    registrations: Vec<Registration>,
    element_classes: BTreeSet<String>,
    container_classes: BTreeSet<String>,
    text: String,
    text_writes: usize,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_class(&self, scope: MarkerScope, class: &str) -> bool {
        self.classes(scope).contains(class)
    }

    pub fn classes(&self, scope: MarkerScope) -> &BTreeSet<String> {
        match scope {
            MarkerScope::Element => &self.element_classes,
            MarkerScope::Container => &self.container_classes,
        }
    }

    /// Current element text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of `set_text` calls so far.
    pub fn text_writes(&self) -> usize {
        self.text_writes
    }

    pub fn is_listening(&self, listener: Listener) -> bool {
        self.registrations.iter().any(|r| r.listener == listener)
    }

    pub fn live_listener_count(&self) -> usize {
        self.registrations.len()
    }

    /// Whether `event` would reach a registered listener. A matching `once`
    /// registration is consumed, as the DOM does before invoking it.
    pub fn deliver(&mut self, event: &InputEvent) -> bool {
        let listener = match event {
            InputEvent::PointerDown { .. } => Listener::Press,
            InputEvent::PointerMove { .. } => Listener::Move,
            InputEvent::PointerUp { .. } => Listener::Release,
            InputEvent::ContextMenu => Listener::ContextMenu,
            InputEvent::KeyDown { .. } => Listener::KeyDown,
        };
        let Some(pos) = self
            .registrations
            .iter()
            .position(|r| r.listener == listener)
        else {
            return false;
        };
        if self.registrations[pos].once {
            self.registrations.remove(pos);
        }
        true
    }

    fn classes_mut(&mut self, scope: MarkerScope) -> &mut BTreeSet<String> {
        match scope {
            MarkerScope::Element => &mut self.element_classes,
            MarkerScope::Container => &mut self.container_classes,
        }
    }
}

impl Surface for HeadlessSurface {
    fn add_class(&mut self, scope: MarkerScope, class: &str) {
        self.classes_mut(scope).insert(class.to_string());
    }

    fn remove_class(&mut self, scope: MarkerScope, class: &str) {
        self.classes_mut(scope).remove(class);
    }

    fn listen(&mut self, listener: Listener, once: bool) -> ListenerId {
        let id = self.ids.alloc();
        self.registrations.push(Registration { id, listener, once });
        id
    }

    fn unlisten(&mut self, id: ListenerId) {
        self.registrations.retain(|r| r.id != id);
    }

    fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.text_writes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn once_registrations_are_consumed_on_delivery() {
        let mut surface = HeadlessSurface::new();
        let id = surface.listen(Listener::Release, true);
        assert!(surface.deliver(&InputEvent::release(0.0, 0.0)));
        assert!(!surface.deliver(&InputEvent::release(0.0, 0.0)));
        // unlisten after auto-removal is a no-op
        surface.unlisten(id);
        assert_eq!(surface.live_listener_count(), 0);
    }

    #[test]
    fn persistent_registrations_survive_delivery() {
        let mut surface = HeadlessSurface::new();
        surface.listen(Listener::Move, false);
        assert!(surface.deliver(&InputEvent::move_to(1.0, 1.0)));
        assert!(surface.is_listening(Listener::Move));
    }
}
