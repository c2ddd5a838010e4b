//! Generic root finders.
//!
//! Both solvers take the quantity they search over as a callback, so the
//! same code serves sign ingresses, lunar phases, stations and returns.

use crate::ephemeris::types::Position;
use crate::error::EngineError;
use crate::geometry::signed_delta;
use crate::peak::STATIONARY_SPEED;
use chrono::{DateTime, Duration, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Tuning for the event searches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Bisection stops once the bracket is this narrow (default 1 minute)
    pub precision_minutes: f64,
    /// Newton iteration cap (default 20)
    pub max_iterations: u32,
    /// Newton convergence threshold in degrees (default 1e-5)
    pub tolerance_deg: f64,
    /// Coarse scan step for multi-event searches (default 24 hours)
    pub scan_step_hours: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            precision_minutes: 1.0,
            max_iterations: 20,
            tolerance_deg: 1e-5,
            scan_step_hours: 24.0,
        }
    }
}

impl SearchSettings {
    pub fn precision(&self) -> Duration {
        duration_from_days(self.precision_minutes / 1440.0).max(Duration::milliseconds(1))
    }

    pub fn scan_step(&self) -> Duration {
        duration_from_days(self.scan_step_hours / 24.0).max(Duration::minutes(1))
    }
}

/// Convert fractional days to a duration with millisecond resolution.
pub(crate) fn duration_from_days(days: f64) -> Duration {
    let millis = (days * 86_400_000.0).round() as i64;
    Duration::milliseconds(millis.clamp(-i64::MAX, i64::MAX))
}

/// Bisect for the first instant a predicate turns true.
///
/// The predicate must be false at `start` and stay true once it flips
/// before `end`. Returns `start` when it already holds there and `None`
/// when it is still false at `end`; nothing past `end` is searched. The
/// returned instant is no more than `precision` after the crossing.
pub fn find_exact_moment<E, F>(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    precision: Duration,
    mut predicate: F,
) -> Result<Option<DateTime<Utc>>, E>
where
    F: FnMut(DateTime<Utc>) -> Result<bool, E>,
{
    if predicate(start)? {
        return Ok(Some(start));
    }
    if end < start || !predicate(end)? {
        return Ok(None);
    }

    let precision = precision.max(Duration::milliseconds(1));
    let (mut lo, mut hi) = (start, end);
    while hi - lo > precision {
        let mid = lo + (hi - lo) / 2;
        if predicate(mid)? {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    Ok(Some(hi))
}

/// Outcome of a longitude return solve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LongitudeSolution {
    pub moment: DateTime<Utc>,
    /// Signed distance (degrees) still left to the target at `moment`
    pub residual_deg: f64,
    pub iterations: u32,
    pub converged: bool,
}

/// Newton iteration for the instant a body reaches `target` longitude.
///
/// `sample` returns the body's position at an instant; its speed is used as
/// the local derivative. The solver stops when the residual drops under
/// `tolerance_deg`, when the body is stationary, or at the iteration cap. In
/// the last two cases the best estimate is returned with `converged == false`.
pub fn solve_longitude_return<E, F>(
    target: f64,
    guess: DateTime<Utc>,
    settings: &SearchSettings,
    mut sample: F,
) -> Result<LongitudeSolution, E>
where
    E: From<EngineError>,
    F: FnMut(DateTime<Utc>) -> Result<Position, E>,
{
    let mut estimate = guess;
    for iteration in 1..=settings.max_iterations {
        let pos = sample(estimate)?;
        pos.validate()?;
        let diff = signed_delta(pos.longitude, target);
        debug!("return solve #{}: {} residual {:.7}°", iteration, estimate, diff);

        if diff.abs() < settings.tolerance_deg {
            return Ok(LongitudeSolution {
                moment: estimate,
                residual_deg: diff,
                iterations: iteration,
                converged: true,
            });
        }
        if pos.speed.abs() < STATIONARY_SPEED {
            warn!("return solve stalled at {}: body is stationary", estimate);
            return Ok(LongitudeSolution {
                moment: estimate,
                residual_deg: diff,
                iterations: iteration,
                converged: false,
            });
        }

        let step = duration_from_days(diff / pos.speed);
        estimate = estimate.checked_add_signed(step).unwrap_or(estimate);
    }

    let pos = sample(estimate)?;
    pos.validate()?;
    let residual = signed_delta(pos.longitude, target);
    let converged = residual.abs() < settings.tolerance_deg;
    if !converged {
        warn!(
            "return solve hit {} iterations, residual {:.7}°",
            settings.max_iterations, residual
        );
    }
    Ok(LongitudeSolution {
        moment: estimate,
        residual_deg: residual,
        iterations: settings.max_iterations,
        converged,
    })
}
