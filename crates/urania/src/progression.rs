//! Instants for derived charts.
//!
//! Progressed and solar-return charts reuse the whole engine; only the
//! instant fed to the ephemeris changes.

use crate::events::search::duration_from_days;
use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};

/// Mean tropical year in days.
pub const TROPICAL_YEAR_DAYS: f64 = 365.2422;

/// Secondary progression: one day after birth for each year of life.
pub fn progressed_instant(birth: DateTime<Utc>, as_of: DateTime<Utc>) -> DateTime<Utc> {
    let elapsed_days = (as_of - birth).num_milliseconds() as f64 / 86_400_000.0;
    let progressed_days = elapsed_days / TROPICAL_YEAR_DAYS;
    birth
        .checked_add_signed(duration_from_days(progressed_days))
        .unwrap_or(birth)
}

/// Birthday in `year` at the birth time of day, the starting point of a
/// solar-return solve. A 29 February birthday maps to 28 February in common
/// years. `None` if `year` is out of range.
pub fn solar_return_guess(birth: DateTime<Utc>, year: i32) -> Option<DateTime<Utc>> {
    let at = |day: u32| {
        Utc.with_ymd_and_hms(year, birth.month(), day, birth.hour(), birth.minute(), birth.second())
            .single()
    };
    at(birth.day()).or_else(|| at(birth.day() - 1))
}
