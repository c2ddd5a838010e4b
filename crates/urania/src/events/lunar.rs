//! Lunar phase names from the Sun–Moon elongation.

use crate::ephemeris::types::Position;
use crate::geometry::normalize_longitude;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mean synodic month in days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.530588853;

/// Eight phases, each a 45° sector centred on its principal angle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LunarPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

const PHASES: [LunarPhase; 8] = [
    LunarPhase::NewMoon,
    LunarPhase::WaxingCrescent,
    LunarPhase::FirstQuarter,
    LunarPhase::WaxingGibbous,
    LunarPhase::FullMoon,
    LunarPhase::WaningGibbous,
    LunarPhase::LastQuarter,
    LunarPhase::WaningCrescent,
];

impl LunarPhase {
    /// Phase for a Moon-minus-Sun elongation in degrees.
    pub fn from_elongation(elongation: f64) -> Self {
        let shifted = normalize_longitude(elongation + 22.5);
        PHASES[((shifted / 45.0).floor() as usize) % 8]
    }

    pub fn from_positions(sun: &Position, moon: &Position) -> Self {
        Self::from_elongation(elongation(sun, moon))
    }

    pub fn name(self) -> &'static str {
        match self {
            LunarPhase::NewMoon => "new_moon",
            LunarPhase::WaxingCrescent => "waxing_crescent",
            LunarPhase::FirstQuarter => "first_quarter",
            LunarPhase::WaxingGibbous => "waxing_gibbous",
            LunarPhase::FullMoon => "full_moon",
            LunarPhase::WaningGibbous => "waning_gibbous",
            LunarPhase::LastQuarter => "last_quarter",
            LunarPhase::WaningCrescent => "waning_crescent",
        }
    }
}

impl fmt::Display for LunarPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Moon longitude minus Sun longitude, in [0, 360).
pub fn elongation(sun: &Position, moon: &Position) -> f64 {
    normalize_longitude(moon.longitude - sun.longitude)
}

/// Approximate days since new moon.
pub fn lunar_age_days(sun: &Position, moon: &Position) -> f64 {
    elongation(sun, moon) / 360.0 * SYNODIC_MONTH_DAYS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_sectors() {
        assert_eq!(LunarPhase::from_elongation(0.0), LunarPhase::NewMoon);
        assert_eq!(LunarPhase::from_elongation(350.0), LunarPhase::NewMoon);
        assert_eq!(LunarPhase::from_elongation(22.5), LunarPhase::WaxingCrescent);
        assert_eq!(LunarPhase::from_elongation(90.0), LunarPhase::FirstQuarter);
        assert_eq!(LunarPhase::from_elongation(180.0), LunarPhase::FullMoon);
        assert_eq!(LunarPhase::from_elongation(270.0), LunarPhase::LastQuarter);
        assert_eq!(LunarPhase::from_elongation(300.0), LunarPhase::WaningCrescent);
    }

    #[test]
    fn test_lunar_age() {
        let sun = Position { longitude: 350.0, speed: 1.0 };
        let moon = Position { longitude: 170.0, speed: 13.0 };
        let age = lunar_age_days(&sun, &moon);
        assert!((age - SYNODIC_MONTH_DAYS / 2.0).abs() < 1e-9);
    }
}
