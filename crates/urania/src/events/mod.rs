pub mod detect;
pub mod lunar;
pub mod search;
pub mod types;

pub use detect::{
    detect_transition, longitude_return, phase_change, retrograde_station, search_events,
    sign_change, solar_return, Detector, Transition,
};
pub use lunar::{elongation, lunar_age_days, LunarPhase, SYNODIC_MONTH_DAYS};
pub use search::{find_exact_moment, solve_longitude_return, LongitudeSolution, SearchSettings};
pub use types::{EventKind, EventRecord, EventState};
