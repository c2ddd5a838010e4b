//! Synthetic ephemeris for integration tests.
//!
//! Each body moves with constant acceleration from a reference epoch, so
//! every crossing, station and return has a closed-form answer.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashMap;
use urania::ephemeris::{EphemerisError, EphemerisProvider, GeoLocation, Position};
use urania::geometry::normalize_longitude;
use urania::houses::{HouseCusps, HouseSystem};

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap()
}

pub fn days_since_epoch(instant: DateTime<Utc>) -> f64 {
    (instant - epoch()).num_milliseconds() as f64 / 86_400_000.0
}

#[derive(Debug, Clone, Copy)]
struct Track {
    longitude: f64,
    speed: f64,
    acceleration: f64,
}

#[derive(Debug, Clone, Default)]
pub struct SyntheticProvider {
    tracks: HashMap<String, Track>,
    failing: Vec<String>,
    failing_from: Vec<(String, DateTime<Utc>)>,
    ascendant: f64,
    midheaven: f64,
}

impl SyntheticProvider {
    pub fn new() -> Self {
        Self {
            ascendant: 0.0,
            midheaven: 270.0,
            ..Self::default()
        }
    }

    /// Body at `longitude` on the epoch, moving `speed` degrees per day.
    pub fn linear(self, body: &str, longitude: f64, speed: f64) -> Self {
        self.accelerating(body, longitude, speed, 0.0)
    }

    pub fn accelerating(mut self, body: &str, longitude: f64, speed: f64, acceleration: f64) -> Self {
        self.tracks.insert(
            body.to_string(),
            Track {
                longitude,
                speed,
                acceleration,
            },
        );
        self
    }

    /// Body the provider knows but cannot compute.
    pub fn failing(mut self, body: &str) -> Self {
        self.failing.push(body.to_string());
        self
    }

    /// Body that computes normally until `cutoff`, then fails.
    pub fn failing_from(mut self, body: &str, cutoff: DateTime<Utc>) -> Self {
        self.failing_from.push((body.to_string(), cutoff));
        self
    }

    pub fn with_angles(mut self, ascendant: f64, midheaven: f64) -> Self {
        self.ascendant = ascendant;
        self.midheaven = midheaven;
        self
    }
}

impl EphemerisProvider for SyntheticProvider {
    fn position(&self, instant: DateTime<Utc>, body: &str) -> Result<Position, EphemerisError> {
        let expired = self
            .failing_from
            .iter()
            .any(|(b, cutoff)| b == body && instant >= *cutoff);
        if expired || self.failing.iter().any(|b| b == body) {
            return Err(EphemerisError::CalculationFailed {
                body: body.to_string(),
                datetime: instant,
                message: "no data".to_string(),
            });
        }
        let track = self.tracks.get(body).ok_or_else(|| EphemerisError::UnknownBody {
            body: body.to_string(),
        })?;
        let d = days_since_epoch(instant);
        Ok(Position {
            longitude: normalize_longitude(
                track.longitude + track.speed * d + 0.5 * track.acceleration * d * d,
            ),
            speed: track.speed + track.acceleration * d,
        })
    }

    fn house_cusps(
        &self,
        _instant: DateTime<Utc>,
        _location: GeoLocation,
        system: HouseSystem,
    ) -> Result<HouseCusps, EphemerisError> {
        match system {
            HouseSystem::WholeSign => Ok(HouseCusps::whole_sign(self.ascendant, self.midheaven)),
            HouseSystem::Equal => Ok(HouseCusps::equal(self.ascendant, self.midheaven)),
            other => Err(EphemerisError::HouseCalculationFailed {
                message: format!("{} not supported by the synthetic provider", other.name()),
            }),
        }
    }
}
