//! TuningSession: the press -> move* -> release | cancel state machine.
//!
//! The session owns its surface. Gesture-scoped document listeners are
//! registered as a side effect of entering `Dragging` and are all released
//! by `reset()` before any gesture-ending transition returns, so nothing from
//! a finished gesture can reach the state afterwards.

use log::{debug, trace};

use crate::config::TuningConfig;
use crate::error::TuningError;
use crate::inputs::{InputEvent, Modifiers, Point, PointerButton, ESCAPE_KEY};
use crate::outputs::{Outputs, Propagation, TuningEvent};
use crate::quantize::{preview_value, round_to};
use crate::render::{Renderer, TextRenderer};
use crate::surface::{Listener, ListenerId, MarkerScope, Surface};
use crate::{ACTIVE_CLASS, BASE_CLASS};

/// Document listeners held for the duration of one gesture.
#[derive(Debug, Clone, Copy)]
struct GestureListeners {
    movement: ListenerId,
    context_menu: ListenerId,
    release: ListenerId,
    key_down: ListenerId,
}

impl GestureListeners {
    fn register<S: Surface + ?Sized>(surface: &mut S) -> Self {
        Self {
            movement: surface.listen(Listener::Move, false),
            context_menu: surface.listen(Listener::ContextMenu, true),
            release: surface.listen(Listener::Release, true),
            key_down: surface.listen(Listener::KeyDown, false),
        }
    }

    fn release_all<S: Surface + ?Sized>(self, surface: &mut S) {
        surface.unlisten(self.movement);
        surface.unlisten(self.release);
        surface.unlisten(self.context_menu);
        surface.unlisten(self.key_down);
    }
}

/// State of an active gesture.
#[derive(Debug, Clone)]
struct Gesture {
    /// Reference point for the next displacement; advanced on every
    /// accepted update.
    last_point: Point,
    preview: f64,
    listeners: GestureListeners,
}

#[derive(Debug, Clone)]
enum Phase {
    Idle,
    Dragging(Gesture),
}

/// A slide-to-tune control bound to one element.
pub struct TuningSession<S: Surface, R: Renderer<S> = TextRenderer> {
    config: TuningConfig,
    surface: S,
    renderer: R,
    press_listener: ListenerId,
    phase: Phase,
    outputs: Outputs,
}

impl<S: Surface> TuningSession<S, TextRenderer> {
    /// Bind to `surface` with the default text renderer.
    pub fn new(config: TuningConfig, surface: S) -> Result<Self, TuningError> {
        Self::with_renderer(config, surface, TextRenderer)
    }
}

impl<S: Surface, R: Renderer<S>> TuningSession<S, R> {
    /// Bind to `surface`: apply the base and direction markers, listen for
    /// presses on the element and render the starting value.
    pub fn with_renderer(
        config: TuningConfig,
        mut surface: S,
        mut renderer: R,
    ) -> Result<Self, TuningError> {
        config.validate()?;

        surface.add_class(MarkerScope::Element, BASE_CLASS);
        surface.add_class(MarkerScope::Element, &config.direction.class_name());
        let press_listener = surface.listen(Listener::Press, false);
        renderer.render(config.value, &mut surface, &config);
        debug!(
            "slide-tuning bound: value={} direction={}",
            config.value, config.direction
        );

        Ok(Self {
            config,
            surface,
            renderer,
            press_listener,
            phase: Phase::Idle,
            outputs: Outputs::default(),
        })
    }

    /// Committed value.
    pub fn value(&self) -> f64 {
        self.config.value
    }

    /// Preview of the active gesture, `None` when idle.
    pub fn preview_value(&self) -> Option<f64> {
        match &self.phase {
            Phase::Dragging(gesture) => Some(gesture.preview),
            Phase::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging(_))
    }

    pub fn config(&self) -> &TuningConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Outputs of the most recent dispatch.
    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    /// Dispatch one host event. Outputs are cleared first; on error the
    /// session state is left exactly as it was.
    pub fn handle(&mut self, event: &InputEvent) -> Result<&Outputs, TuningError> {
        self.outputs.clear();
        match event {
            InputEvent::PointerDown { x, y, button, .. } => {
                self.on_press(Point::new(*x, *y), *button)
            }
            InputEvent::PointerMove { x, y, modifiers } => {
                self.on_move(Point::new(*x, *y), *modifiers)?
            }
            InputEvent::PointerUp { .. } => self.on_release(),
            InputEvent::ContextMenu => self.on_context_menu(),
            InputEvent::KeyDown { key } => self.on_key_down(key),
        }
        Ok(&self.outputs)
    }

    /// Unbind from the surface and hand it back. An active gesture is reset
    /// without notifications.
    pub fn destroy(mut self) -> S {
        if self.is_dragging() {
            debug!("slide-tuning destroyed mid-gesture");
            self.reset();
        }
        self.surface.unlisten(self.press_listener);
        self.surface.remove_class(MarkerScope::Element, BASE_CLASS);
        self.surface
            .remove_class(MarkerScope::Element, &self.config.direction.class_name());
        self.surface
    }

    fn on_press(&mut self, point: Point, button: PointerButton) {
        if !button.is_primary() {
            trace!("ignoring press with button {}", button.code());
            return;
        }
        if self.is_dragging() {
            trace!("ignoring press during an active gesture");
            return;
        }

        self.surface.add_class(MarkerScope::Element, ACTIVE_CLASS);
        self.surface.add_class(MarkerScope::Container, ACTIVE_CLASS);
        let listeners = GestureListeners::register(&mut self.surface);
        self.phase = Phase::Dragging(Gesture {
            last_point: point,
            preview: self.config.value,
            listeners,
        });
        debug!("gesture started at ({}, {})", point.x, point.y);
    }

    fn on_move(&mut self, point: Point, modifiers: Modifiers) -> Result<(), TuningError> {
        let Phase::Dragging(gesture) = &mut self.phase else {
            return Ok(());
        };

        let displacement = self
            .config
            .direction
            .displacement(gesture.last_point, point)?;
        let candidate = preview_value(
            gesture.preview,
            displacement,
            modifiers,
            &self.config.step,
            self.config.sensitivity,
        );
        if candidate == gesture.preview {
            trace!("move of {displacement}px below one step");
            return Ok(());
        }

        gesture.preview = candidate;
        gesture.last_point = point;
        self.renderer
            .render(candidate, &mut self.surface, &self.config);
        let value = round_to(candidate, self.config.fraction_digits);
        trace!("preview -> {value}");
        self.outputs.push_event(TuningEvent::Change { value });
        Ok(())
    }

    fn on_release(&mut self) {
        let Phase::Dragging(gesture) = &self.phase else {
            return;
        };

        let value = round_to(gesture.preview, self.config.fraction_digits);
        self.config.value = value;
        self.reset();
        debug!("gesture committed: {value}");
        self.outputs.push_event(TuningEvent::Changed { value });
    }

    fn on_context_menu(&mut self) {
        if !self.is_dragging() {
            return;
        }
        self.outputs.prevent_default = true;
        self.outputs.propagation = Propagation::Stop;
        self.cancel();
    }

    fn on_key_down(&mut self, key: &str) {
        if !self.is_dragging() || key != ESCAPE_KEY {
            return;
        }
        self.outputs.propagation = Propagation::StopImmediate;
        self.cancel();
    }

    /// Reset, restore the committed value on screen and report it.
    fn cancel(&mut self) {
        self.reset();
        let value = self.config.value;
        self.renderer.render(value, &mut self.surface, &self.config);
        debug!("gesture cancelled, value stays {value}");
        self.outputs.push_event(TuningEvent::Cancel { value });
    }

    /// Shared teardown for every gesture end. Emits nothing and never
    /// touches the committed value.
    fn reset(&mut self) {
        self.surface.remove_class(MarkerScope::Element, ACTIVE_CLASS);
        self.surface.remove_class(MarkerScope::Container, ACTIVE_CLASS);
        if let Phase::Dragging(gesture) = std::mem::replace(&mut self.phase, Phase::Idle) {
            gesture.listeners.release_all(&mut self.surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessSurface;

    #[test]
    fn failed_move_leaves_gesture_untouched() {
        let cfg = TuningConfig::new(1.0).with_direction("sideways".to_string().into());
        let mut session = TuningSession::new(cfg, HeadlessSurface::new()).unwrap();
        session.handle(&InputEvent::press(0.0, 0.0)).unwrap();
        assert!(session.handle(&InputEvent::move_to(40.0, 0.0)).is_err());
        assert!(session.is_dragging());
        assert_eq!(session.preview_value(), Some(1.0));
        assert!(session.outputs().events.is_empty());
    }

    #[test]
    fn second_press_does_not_restart_gesture() {
        let mut session =
            TuningSession::new(TuningConfig::new(0.0), HeadlessSurface::new()).unwrap();
        session.handle(&InputEvent::press(0.0, 0.0)).unwrap();
        session.handle(&InputEvent::move_to(30.0, 0.0)).unwrap();
        let live = session.surface().live_listener_count();
        session.handle(&InputEvent::press(100.0, 0.0)).unwrap();
        assert_eq!(session.preview_value(), Some(3.0));
        assert_eq!(session.surface().live_listener_count(), live);
    }
}
