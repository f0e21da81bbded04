//! Session configuration: committed value, axis, step table and precision.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TuningError;
use crate::inputs::{Modifiers, Point};

/// Upper bound accepted for `fraction_digits`, same as fixed-point
/// formatting on the web host.
pub const MAX_FRACTION_DIGITS: u32 = 100;

/// Screen axis the drag displacement is read from.
///
/// Unrecognized names are kept as [`Direction::Other`] so they can be
/// reported when a gesture first needs an axis.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Direction {
    #[default]
    Horizontal,
    Vertical,
    Other(String),
}

impl Direction {
    pub fn as_str(&self) -> &str {
        match self {
            Direction::Horizontal => "horizontal",
            Direction::Vertical => "vertical",
            Direction::Other(name) => name,
        }
    }

    /// Signed displacement from `from` to `to` along this axis.
    pub fn displacement(&self, from: Point, to: Point) -> Result<f64, TuningError> {
        match self {
            Direction::Horizontal => Ok(to.x - from.x),
            Direction::Vertical => Ok(to.y - from.y),
            Direction::Other(name) => Err(TuningError::UnknownDirection(name.clone())),
        }
    }

    /// Presentation class carrying the direction, e.g. `slide-tuning--vertical`.
    pub fn class_name(&self) -> String {
        format!("{}--{}", crate::BASE_CLASS, self.as_str())
    }
}

impl From<String> for Direction {
    fn from(name: String) -> Self {
        match name.as_str() {
            "horizontal" => Direction::Horizontal,
            "vertical" => Direction::Vertical,
            _ => Direction::Other(name),
        }
    }
}

impl From<Direction> for String {
    fn from(direction: Direction) -> Self {
        direction.as_str().to_string()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Step unit per modifier key. Overrides left as `None` fall through to the
/// next modifier in priority order and finally to `default`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepTable {
    pub default: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_alt: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_ctrl: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_shift: Option<f64>,
}

impl StepTable {
    /// A table with only a default step and no modifier overrides.
    pub fn uniform(step: f64) -> Self {
        Self {
            default: step,
            with_alt: None,
            with_ctrl: None,
            with_shift: None,
        }
    }

    /// Step unit for the held modifiers: Alt > Ctrl > Shift > default.
    pub fn select(&self, modifiers: Modifiers) -> f64 {
        let overrides = [
            (modifiers.alt, self.with_alt),
            (modifiers.ctrl, self.with_ctrl),
            (modifiers.shift, self.with_shift),
        ];
        overrides
            .into_iter()
            .find_map(|(held, step)| if held { step } else { None })
            .unwrap_or(self.default)
    }
}

impl Default for StepTable {
    fn default() -> Self {
        Self {
            default: 1.0,
            with_alt: Some(0.1),
            with_ctrl: Some(100.0),
            with_shift: Some(10.0),
        }
    }
}

fn default_sensitivity() -> f64 {
    10.0
}

fn default_fraction_digits() -> u32 {
    2
}

/// Configuration of one tuning session. Only `value` is required on the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TuningConfig {
    /// Committed value. Mutated only when a gesture commits.
    pub value: f64,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub step: StepTable,
    /// Pixels of displacement per step unit. Negative values invert the axis.
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f64,
    /// Decimal places used when reporting, committing and rendering.
    #[serde(default = "default_fraction_digits")]
    pub fraction_digits: u32,
}

impl TuningConfig {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            direction: Direction::default(),
            step: StepTable::default(),
            sensitivity: default_sensitivity(),
            fraction_digits: default_fraction_digits(),
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_step(mut self, step: StepTable) -> Self {
        self.step = step;
        self
    }

    pub fn with_sensitivity(mut self, sensitivity: f64) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn with_fraction_digits(mut self, digits: u32) -> Self {
        self.fraction_digits = digits;
        self
    }

    /// Checks applied at session construction. The direction is deliberately
    /// not checked here; it is resolved when a gesture first moves.
    pub fn validate(&self) -> Result<(), TuningError> {
        // A negative divisor is valid and inverts the drag axis.
        if !self.sensitivity.is_finite() || self.sensitivity == 0.0 {
            return Err(TuningError::InvalidSensitivity(self.sensitivity));
        }
        if self.fraction_digits > MAX_FRACTION_DIGITS {
            return Err(TuningError::InvalidFractionDigits(self.fraction_digits));
        }
        Ok(())
    }
}
