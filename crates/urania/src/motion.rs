//! Applying/separating and retrograde classification.

use crate::ephemeris::types::Position;
use crate::error::{ensure_finite, EngineError};
use crate::geometry::{fold_arc, normalize_longitude};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One day forward.
pub const DAILY_STEP: f64 = 1.0;
/// One hour forward, for fast bodies near exactness.
pub const HOURLY_STEP: f64 = 1.0 / 24.0;

/// Direction of apparent motion along the ecliptic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionState {
    Direct,
    Retrograde,
}

impl MotionState {
    pub fn from_speed(speed: f64) -> Self {
        if speed < 0.0 {
            MotionState::Retrograde
        } else {
            MotionState::Direct
        }
    }
}

impl fmt::Display for MotionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionState::Direct => f.write_str("direct"),
            MotionState::Retrograde => f.write_str("retrograde"),
        }
    }
}

/// Determine if an aspect is applying (approaching exact) or separating.
///
/// `moving` is projected forward by its own signed speed over `step_days`
/// while `fixed` holds still; the aspect applies when that projection brings
/// the separation closer to `target_angle`. Retrograde motion reverses the
/// answer through the sign of the speed.
pub fn is_applying(
    moving: &Position,
    fixed: &Position,
    target_angle: f64,
    step_days: f64,
) -> Result<bool, EngineError> {
    moving.validate()?;
    fixed.validate()?;
    ensure_finite("target_angle", target_angle)?;
    ensure_finite("step_days", step_days)?;

    let current_angle = fold_arc(moving.longitude, fixed.longitude);
    let future_lon = normalize_longitude(moving.longitude + moving.speed * step_days);
    let future_angle = fold_arc(future_lon, fixed.longitude);

    Ok((future_angle - target_angle).abs() < (current_angle - target_angle).abs())
}
