//! Pluggable presentation hook.

use crate::config::TuningConfig;
use crate::quantize::format_fixed;
use crate::surface::Surface;

/// Presents a value on the surface. Renderers see the configuration
/// read-only and have no access to session state.
pub trait Renderer<S: Surface + ?Sized> {
    fn render(&mut self, value: f64, surface: &mut S, config: &TuningConfig);
}

/// Default renderer: the value as fixed-point text with
/// `config.fraction_digits` decimals.
#[derive(Copy, Clone, Debug, Default)]
pub struct TextRenderer;

impl<S: Surface + ?Sized> Renderer<S> for TextRenderer {
    fn render(&mut self, value: f64, surface: &mut S, config: &TuningConfig) {
        surface.set_text(&format_fixed(value, config.fraction_digits));
    }
}

/// Renderer backed by a closure. Build with [`render_fn`].
pub struct RenderFn<F>(F);

/// Wrap `f` as a [`Renderer`].
pub fn render_fn<S, F>(f: F) -> RenderFn<F>
where
    S: Surface + ?Sized,
    F: FnMut(f64, &mut S, &TuningConfig),
{
    RenderFn(f)
}

impl<S, F> Renderer<S> for RenderFn<F>
where
    S: Surface + ?Sized,
    F: FnMut(f64, &mut S, &TuningConfig),
{
    fn render(&mut self, value: f64, surface: &mut S, config: &TuningConfig) {
        (self.0)(value, surface, config)
    }
}
