use crate::ephemeris::EphemerisError;
use thiserror::Error;

/// Errors raised by the aspect and event engine
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid input for {field}: {value} (expected a finite number)")]
    InvalidInput { field: &'static str, value: f64 },
    #[error("Invalid house cusps: {message}")]
    InvalidCusps { message: String },
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
}

/// Reject NaN and infinite values before they reach comparisons or sorts.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64, EngineError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::InvalidInput { field, value })
    }
}
