//! Input contracts for the tuning session.
//!
//! Adapters translate host events (DOM pointer/keyboard events, a headless
//! script, ...) into [`InputEvent`]s and pass them to
//! `TuningSession::handle()` in delivery order.

use serde::{Deserialize, Serialize};

/// Key that aborts a gesture.
pub const ESCAPE_KEY: &str = "Escape";

/// Screen coordinate in host pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Modifier keys held while an input event was produced.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub shift: bool,
}

impl Modifiers {
    pub const fn none() -> Self {
        Self {
            alt: false,
            ctrl: false,
            shift: false,
        }
    }

    pub const fn alt() -> Self {
        Self {
            alt: true,
            ..Self::none()
        }
    }

    pub const fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::none()
        }
    }

    pub const fn shift() -> Self {
        Self {
            shift: true,
            ..Self::none()
        }
    }
}

/// Pointer button that produced a press, using DOM `button` numbering.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i16", into = "i16")]
pub enum PointerButton {
    #[default]
    Primary,
    Auxiliary,
    Secondary,
    Other(i16),
}

impl PointerButton {
    pub fn from_code(code: i16) -> Self {
        match code {
            0 => PointerButton::Primary,
            1 => PointerButton::Auxiliary,
            2 => PointerButton::Secondary,
            other => PointerButton::Other(other),
        }
    }

    pub fn code(self) -> i16 {
        match self {
            PointerButton::Primary => 0,
            PointerButton::Auxiliary => 1,
            PointerButton::Secondary => 2,
            PointerButton::Other(code) => code,
        }
    }

    #[inline]
    pub fn is_primary(self) -> bool {
        self == PointerButton::Primary
    }
}

impl From<i16> for PointerButton {
    fn from(code: i16) -> Self {
        PointerButton::from_code(code)
    }
}

impl From<PointerButton> for i16 {
    fn from(button: PointerButton) -> Self {
        button.code()
    }
}

/// One host event routed to the session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Press on the bound element.
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        button: PointerButton,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Pointer motion anywhere in the document.
    PointerMove {
        x: f64,
        y: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Pointer release anywhere in the document.
    PointerUp {
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
    },
    ContextMenu,
    KeyDown { key: String },
}

impl InputEvent {
    pub fn press(x: f64, y: f64) -> Self {
        InputEvent::PointerDown {
            x,
            y,
            button: PointerButton::Primary,
            modifiers: Modifiers::none(),
        }
    }

    pub fn move_to(x: f64, y: f64) -> Self {
        InputEvent::PointerMove {
            x,
            y,
            modifiers: Modifiers::none(),
        }
    }

    pub fn move_with(x: f64, y: f64, modifiers: Modifiers) -> Self {
        InputEvent::PointerMove { x, y, modifiers }
    }

    pub fn release(x: f64, y: f64) -> Self {
        InputEvent::PointerUp { x, y }
    }

    pub fn key(key: &str) -> Self {
        InputEvent::KeyDown {
            key: key.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_codes_follow_dom_numbering() {
        assert!(PointerButton::from_code(0).is_primary());
        assert_eq!(PointerButton::from_code(2), PointerButton::Secondary);
        assert_eq!(PointerButton::from_code(4), PointerButton::Other(4));
        assert_eq!(PointerButton::Other(4).code(), 4);
    }
}
