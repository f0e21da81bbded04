//! Output contracts from the tuning session.
//!
//! Outputs carry the notifications produced by one dispatched input plus
//! the directives the adapter should apply to the originating host event.
//! Adapters (web/headless) transport the notifications to observers.

use serde::{Deserialize, Serialize};

/// Observable outcome of a gesture step. Every payload is `{ value }`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TuningEvent {
    /// Accepted preview update during a drag (rounded preview).
    Change { value: f64 },
    /// Gesture committed (rounded, now-committed value).
    Changed { value: f64 },
    /// Gesture aborted (unchanged committed value).
    Cancel { value: f64 },
}

impl TuningEvent {
    /// Host-facing event name.
    pub fn name(&self) -> &'static str {
        match self {
            TuningEvent::Change { .. } => "change",
            TuningEvent::Changed { .. } => "changed",
            TuningEvent::Cancel { .. } => "cancel",
        }
    }

    pub fn value(&self) -> f64 {
        match *self {
            TuningEvent::Change { value }
            | TuningEvent::Changed { value }
            | TuningEvent::Cancel { value } => value,
        }
    }
}

/// How far the originating host event may continue to propagate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Propagation {
    #[default]
    Continue,
    /// Stop bubbling to other targets.
    Stop,
    /// Also skip the remaining listeners on the current target.
    StopImmediate,
}

/// Outputs returned by `TuningSession::handle()`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub events: Vec<TuningEvent>,
    #[serde(default)]
    pub prevent_default: bool,
    #[serde(default)]
    pub propagation: Propagation,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.events.clear();
        self.prevent_default = false;
        self.propagation = Propagation::Continue;
    }

    #[inline]
    pub fn push_event(&mut self, event: TuningEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && !self.prevent_default && self.propagation == Propagation::Continue
    }
}
