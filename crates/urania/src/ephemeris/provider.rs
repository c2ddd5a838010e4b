use crate::ephemeris::types::{BodyPosition, ChartLayer, GeoLocation, Position};
use crate::geometry::normalize_longitude;
use crate::houses::{HouseCusps, HouseSystem};
use chrono::{DateTime, Utc};
use log::warn;
use thiserror::Error;

/// Errors that can occur while querying an ephemeris
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Unknown body: {body}")]
    UnknownBody { body: String },
    #[error("Invalid house system: {system}. Valid systems: {valid:?}")]
    InvalidHouseSystem { system: String, valid: Vec<String> },
    #[error("Invalid ayanamsa: {ayanamsa}. Valid ayanamsas: {valid:?}")]
    InvalidAyanamsa { ayanamsa: String, valid: Vec<String> },
    #[error("Failed to calculate position for {body} at {datetime}: {message}")]
    CalculationFailed {
        body: String,
        datetime: DateTime<Utc>,
        message: String,
    },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
}

/// Source of raw body positions and house cusps.
///
/// Implementations must be side-effect free: the root finders call back into
/// the provider at instants of their own choosing.
pub trait EphemerisProvider {
    /// Longitude and longitude speed of `body` at `instant`.
    fn position(&self, instant: DateTime<Utc>, body: &str) -> Result<Position, EphemerisError>;

    /// House cusps and angles for a place and house system.
    fn house_cusps(
        &self,
        instant: DateTime<Utc>,
        location: GeoLocation,
        system: HouseSystem,
    ) -> Result<HouseCusps, EphemerisError>;
}

impl<P: EphemerisProvider + ?Sized> EphemerisProvider for &P {
    fn position(&self, instant: DateTime<Utc>, body: &str) -> Result<Position, EphemerisError> {
        (**self).position(instant, body)
    }

    fn house_cusps(
        &self,
        instant: DateTime<Utc>,
        location: GeoLocation,
        system: HouseSystem,
    ) -> Result<HouseCusps, EphemerisError> {
        (**self).house_cusps(instant, location, system)
    }
}

/// Fetch a whole chart layer.
///
/// A body whose position cannot be computed is logged and left out; it never
/// aborts the batch. `south_node` is derived from `north_node` when the
/// provider does not know it. House failures are propagated since the caller
/// explicitly asked for houses.
pub fn fetch_layer<P: EphemerisProvider + ?Sized>(
    provider: &P,
    instant: DateTime<Utc>,
    bodies: &[String],
    location: Option<GeoLocation>,
    system: HouseSystem,
) -> Result<ChartLayer, EphemerisError> {
    let mut layer = ChartLayer::new();
    for body in bodies {
        let id = body.to_lowercase();
        match fetch_body(provider, instant, &id) {
            Ok(position) => layer.push(BodyPosition::body(id, position)),
            Err(e) => warn!("skipping {} at {}: {}", id, instant, e),
        }
    }

    if let Some(loc) = location {
        layer.houses = Some(provider.house_cusps(instant, loc, system)?);
        layer = layer.with_angles();
    }
    Ok(layer)
}

/// Position of one body, deriving `south_node` from `north_node` when needed.
pub(crate) fn fetch_body<P: EphemerisProvider + ?Sized>(
    provider: &P,
    instant: DateTime<Utc>,
    id: &str,
) -> Result<Position, EphemerisError> {
    match provider.position(instant, id) {
        Err(EphemerisError::UnknownBody { .. }) if id == "south_node" => {
            let north = provider.position(instant, "north_node")?;
            Ok(Position {
                longitude: normalize_longitude(north.longitude + 180.0),
                speed: north.speed,
            })
        }
        other => other,
    }
}
