//! Slide Tuning Core (host-agnostic)
//!
//! A pointer-driven "slide to tune" control for a single scalar value. A
//! [`TuningSession`] binds to one element through the [`Surface`] capability,
//! turns press/move/release/cancel input into quantized preview values, and
//! reports `change`/`changed`/`cancel` notifications through [`Outputs`].
//! Adapters (web, headless) own the real event plumbing and feed
//! [`InputEvent`]s into [`TuningSession::handle`].

pub mod config;
pub mod error;
pub mod headless;
pub mod inputs;
pub mod outputs;
pub mod quantize;
pub mod render;
pub mod session;
pub mod surface;

// Re-exports for consumers (adapters)
pub use config::{Direction, StepTable, TuningConfig};
pub use error::TuningError;
pub use headless::HeadlessSurface;
pub use inputs::{InputEvent, Modifiers, Point, PointerButton};
pub use outputs::{Outputs, Propagation, TuningEvent};
pub use quantize::{format_fixed, preview_value, round_to};
pub use render::{render_fn, RenderFn, Renderer, TextRenderer};
pub use session::TuningSession;
pub use surface::{Listener, ListenerId, ListenerTarget, MarkerScope, Surface};

/// Class applied to every bound element.
pub const BASE_CLASS: &str = "slide-tuning";
/// Class applied to the element and the container while a gesture is active.
pub const ACTIVE_CLASS: &str = "slide-tuning--active";
