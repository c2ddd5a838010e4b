//! Angular geometry on the ecliptic circle.
//!
//! Every longitude handled by the engine passes through these helpers so the
//! 360°/0° wrap is treated the same way everywhere.

use crate::error::{ensure_finite, EngineError};
use crate::zodiac::Sign;

/// Bring any finite angle into [0, 360).
pub fn normalize_longitude(longitude: f64) -> f64 {
    let wrapped = longitude.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Shortest arc between two longitudes, in [0, 180].
///
/// Symmetric and direction-less: it cannot tell applying from separating on
/// its own (see [`crate::motion::is_applying`]).
pub fn angle_between(lon_a: f64, lon_b: f64) -> Result<f64, EngineError> {
    let lon_a = ensure_finite("lon_a", lon_a)?;
    let lon_b = ensure_finite("lon_b", lon_b)?;
    Ok(fold_arc(lon_a, lon_b))
}

/// Infallible variant for values already validated by the caller.
pub(crate) fn fold_arc(lon_a: f64, lon_b: f64) -> f64 {
    let raw_diff = (normalize_longitude(lon_a) - normalize_longitude(lon_b)).abs();
    if raw_diff > 180.0 {
        360.0 - raw_diff
    } else {
        raw_diff
    }
}

/// Signed shortest rotation that takes `from` onto `to`, in (-180, 180].
pub fn signed_delta(from: f64, to: f64) -> f64 {
    fold_signed(to - from)
}

/// Fold any angle difference into (-180, 180].
pub fn fold_signed(diff: f64) -> f64 {
    let mut folded = diff.rem_euclid(360.0);
    if folded > 180.0 {
        folded -= 360.0;
    }
    folded
}

/// Format a longitude as degrees and minutes within its sign, e.g. `15°30' Aries`.
pub fn format_degrees(longitude: f64) -> String {
    let (sign, degrees, minutes) = split_degrees(longitude);
    format!("{}°{:02}' {}", degrees, minutes, sign.display_name())
}

/// Format only the in-sign part, e.g. `15°30'`.
pub fn format_degrees_in_sign(longitude: f64) -> String {
    let (_, degrees, minutes) = split_degrees(longitude);
    format!("{}°{:02}'", degrees, minutes)
}

fn split_degrees(longitude: f64) -> (Sign, u32, u32) {
    let normalized = normalize_longitude(longitude);
    let mut total_minutes = (normalized * 60.0).round() as u32;
    if total_minutes >= 360 * 60 {
        total_minutes = 0;
    }
    let whole_degrees = total_minutes / 60;
    let sign = Sign::from_index((whole_degrees / 30) as usize);
    (sign, whole_degrees % 30, total_minutes % 60)
}
