pub mod provider;
pub mod types;

#[cfg(feature = "swiss-ephemeris")]
pub mod adapter;

#[cfg(feature = "swiss-ephemeris")]
pub use adapter::{SwissEphemerisAdapter, Zodiac};
pub use provider::{fetch_layer, EphemerisError, EphemerisProvider};
pub use types::{BodyPosition, ChartLayer, GeoLocation, PointKind, Position};
