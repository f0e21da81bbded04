//! Host capability the session drives: presentation markers, listener
//! registration and text output.

use serde::{Deserialize, Serialize};

/// Where a presentation marker is applied.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerScope {
    /// The bound element.
    Element,
    /// The shared document-level container (the body on the web).
    Container,
}

/// Target a listener is registered on.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListenerTarget {
    Element,
    Document,
}

/// Listener kinds the session registers.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Listener {
    /// Pointer press on the element. Lives for the whole session.
    Press,
    /// Pointer motion on the document, gesture-scoped.
    Move,
    /// Pointer release on the document, gesture-scoped.
    Release,
    /// Context menu on the document, gesture-scoped.
    ContextMenu,
    /// Key press on the document, gesture-scoped.
    KeyDown,
}

impl Listener {
    pub fn target(self) -> ListenerTarget {
        match self {
            Listener::Press => ListenerTarget::Element,
            _ => ListenerTarget::Document,
        }
    }

    /// DOM event type name.
    pub fn event_type(self) -> &'static str {
        match self {
            Listener::Press => "pointerdown",
            Listener::Move => "pointermove",
            Listener::Release => "pointerup",
            Listener::ContextMenu => "contextmenu",
            Listener::KeyDown => "keydown",
        }
    }
}

/// Opaque handle for one registered listener. The session keeps the ids it
/// was handed and passes the same ids back to unregister.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u32);

/// Monotonic allocator for [`ListenerId`]s, for surface implementations.
#[derive(Default, Debug)]
pub struct ListenerIdAllocator {
    next: u32,
}

impl ListenerIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc(&mut self) -> ListenerId {
        let id = ListenerId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Environment capability required by `TuningSession`.
pub trait Surface {
    fn add_class(&mut self, scope: MarkerScope, class: &str);

    fn remove_class(&mut self, scope: MarkerScope, class: &str);

    /// Register `listener` on its target. With `once`, the host removes the
    /// registration itself after the first delivery.
    fn listen(&mut self, listener: Listener, once: bool) -> ListenerId;

    /// Unregister a listener. Must tolerate ids whose `once` registration
    /// was already consumed.
    fn unlisten(&mut self, id: ListenerId);

    /// Replace the element's text content.
    fn set_text(&mut self, text: &str);
}
