//! Linear estimate of when an aspect becomes exact.
//!
//! This is a single extrapolation from the current separation and the moving
//! body's speed, not a root solve. Use [`crate::events::search`] when an exact
//! moment is needed.

use crate::ephemeris::types::Position;
use crate::error::{ensure_finite, EngineError};
use crate::geometry::{fold_signed, signed_delta};
use crate::events::search::duration_from_days;
use chrono::{DateTime, Utc};

/// Below this speed (degrees/day) a body counts as stationary.
pub const STATIONARY_SPEED: f64 = 0.001;

/// Default look-ahead window for peak estimates, in days.
pub const DEFAULT_HORIZON_DAYS: f64 = 365.0;

/// Estimate the moment `moving` reaches `target_angle` from `fixed`.
///
/// Returns `None` for a stationary body or when the estimate falls further
/// than `horizon_days` from `as_of` in either direction. A negative offset
/// means the aspect already peaked.
pub fn estimate_peak(
    moving: &Position,
    fixed: &Position,
    target_angle: f64,
    as_of: DateTime<Utc>,
    horizon_days: f64,
) -> Result<Option<DateTime<Utc>>, EngineError> {
    moving.validate()?;
    fixed.validate()?;
    ensure_finite("target_angle", target_angle)?;

    if moving.speed.abs() < STATIONARY_SPEED {
        return Ok(None);
    }

    // Aim at the side of the fixed body the moving one is already on
    let current = signed_delta(fixed.longitude, moving.longitude);
    let target = if current < 0.0 { -target_angle } else { target_angle };
    let angle_diff = fold_signed(target - current);

    let days_to_exact = angle_diff / moving.speed;
    if days_to_exact.abs() > horizon_days {
        return Ok(None);
    }

    Ok(as_of.checked_add_signed(duration_from_days(days_to_exact)))
}
