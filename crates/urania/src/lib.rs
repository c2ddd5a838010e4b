//! Aspect and event engine for astrological charts.
//!
//! Positions come from an [`EphemerisProvider`]; everything downstream
//! (houses, aspects, applying/separating, peaks, ingresses, stations,
//! lunar phases, returns) is pure computation over them.

pub mod aspects;
pub mod config;
pub mod ephemeris;
pub mod error;
pub mod events;
pub mod geometry;
pub mod houses;
pub mod motion;
pub mod peak;
pub mod progression;
pub mod transits;
pub mod zodiac;

pub use aspects::{
    build_aspects, find_aspect, AspectCalculator, AspectKind, AspectMatch, AspectSet,
    AspectSettings, AspectSummary, MatchPolicy, Orb, OrbPolicy, Pairing, Timing,
};
pub use config::{load_default_config, load_engine_config, EngineConfig};
pub use ephemeris::{
    fetch_layer, BodyPosition, ChartLayer, EphemerisError, EphemerisProvider, GeoLocation,
    Position,
};
#[cfg(feature = "swiss-ephemeris")]
pub use ephemeris::{SwissEphemerisAdapter, Zodiac};
pub use error::EngineError;
pub use events::{
    find_exact_moment, search_events, solar_return, solve_longitude_return, Detector, EventKind,
    EventRecord, EventState, LunarPhase, SearchSettings,
};
pub use geometry::{angle_between, format_degrees, normalize_longitude, signed_delta};
pub use houses::{house_of, HouseCusps, HouseSystem};
pub use motion::{is_applying, MotionState};
pub use peak::estimate_peak;
pub use progression::progressed_instant;
pub use transits::{transits_in_period, DailyTransits};
pub use zodiac::Sign;
