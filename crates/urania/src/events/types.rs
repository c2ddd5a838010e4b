use crate::events::lunar::LunarPhase;
use crate::motion::MotionState;
use crate::zodiac::Sign;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    SignChange,
    PhaseChange,
    RetrogradeStation,
    SolarReturn,
}

/// State on either side of an event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum EventState {
    Sign(Sign),
    Phase(LunarPhase),
    Motion(MotionState),
    /// Longitude in degrees (returns)
    Longitude(f64),
}

/// A timed chart event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub kind: EventKind,
    pub body: String,
    pub from: EventState,
    pub to: EventState,
    /// `None` when the crossing could not be bracketed
    pub exact_moment: Option<DateTime<Utc>>,
}
