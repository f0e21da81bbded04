//! Errors surfaced by the tuning core.

use thiserror::Error;

/// Configuration faults. Input that merely does not start or advance a
/// gesture is never an error; it is ignored.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuningError {
    #[error("unknown slide direction '{0}' (expected 'horizontal' or 'vertical')")]
    UnknownDirection(String),
    #[error("sensitivity must be a finite, non-zero number, got {0}")]
    InvalidSensitivity(f64),
    #[error("fraction digits must be between 0 and 100, got {0}")]
    InvalidFractionDigits(u32),
}
