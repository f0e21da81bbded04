//! Value quantization: displacement -> whole step units -> preview value.
//!
//! Everything here is pure. The drag only ever accumulates whole steps, so
//! the unit count truncates toward zero: -19px at sensitivity 10 is -1 unit,
//! -9px is 0 units.

use crate::config::StepTable;
use crate::inputs::Modifiers;

/// Whole step units crossed by `displacement` pixels.
#[inline]
pub fn units(displacement: f64, sensitivity: f64) -> f64 {
    (displacement / sensitivity).trunc()
}

/// Candidate preview for a move of `displacement` pixels from the last
/// accepted point.
pub fn preview_value(
    preview: f64,
    displacement: f64,
    modifiers: Modifiers,
    step: &StepTable,
    sensitivity: f64,
) -> f64 {
    preview + units(displacement, sensitivity) * step.select(modifiers)
}

/// `value` as fixed-point text with `digits` decimals.
pub fn format_fixed(value: f64, digits: u32) -> String {
    format!("{:.*}", digits as usize, value)
}

/// `value` rounded to `digits` decimals, going through the same fixed-point
/// text the renderer shows so reported and displayed values agree.
pub fn round_to(value: f64, digits: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format_fixed(value, digits).parse().unwrap_or(value)
}
