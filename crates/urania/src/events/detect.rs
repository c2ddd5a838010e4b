//! Event detectors built on the generic root finders.
//!
//! A detector samples a discrete state (sign, phase, motion) at the ends of a
//! window and bisects the first instant the state changes. Multi-event
//! searches coarse-scan with [`SearchSettings::scan_step`] and refine each
//! step that changes state.

use crate::ephemeris::provider::{fetch_body, EphemerisProvider};
use crate::ephemeris::types::Position;
use crate::error::EngineError;
use crate::events::lunar::LunarPhase;
use crate::events::search::{solve_longitude_return, LongitudeSolution, SearchSettings};
use crate::events::types::{EventKind, EventRecord, EventState};
use crate::geometry::normalize_longitude;
use crate::progression::solar_return_guess;
use chrono::{DateTime, Duration, Utc};
use log::debug;

/// A state change found inside a window
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<S> {
    pub from: S,
    pub to: S,
    pub moment: Option<DateTime<Utc>>,
}

/// Compare the state at both ends of `[start, end]` and bisect the change.
///
/// Returns `None` when both ends agree. Only the first change is located;
/// windows should be short enough to hold at most one.
pub fn detect_transition<S, E, F>(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    precision: Duration,
    mut state_at: F,
) -> Result<Option<Transition<S>>, E>
where
    S: PartialEq + Clone,
    F: FnMut(DateTime<Utc>) -> Result<S, E>,
{
    if end < start {
        return Ok(None);
    }
    let from = state_at(start)?;
    let to = state_at(end)?;
    if from == to {
        return Ok(None);
    }

    // Endpoints are already known to differ; bisect between them.
    let precision = precision.max(Duration::milliseconds(1));
    let (mut lo, mut hi) = (start, end);
    while hi - lo > precision {
        let mid = lo + (hi - lo) / 2;
        if state_at(mid)? != from {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    Ok(Some(Transition {
        from,
        to,
        moment: Some(hi),
    }))
}

/// What a multi-event search looks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detector {
    /// Sign ingress of one body
    Sign(String),
    /// Retrograde or direct station of one body
    Station(String),
    /// Change of lunar phase name
    LunarPhase,
}

impl Detector {
    pub fn kind(&self) -> EventKind {
        match self {
            Detector::Sign(_) => EventKind::SignChange,
            Detector::Station(_) => EventKind::RetrogradeStation,
            Detector::LunarPhase => EventKind::PhaseChange,
        }
    }

    pub fn body(&self) -> &str {
        match self {
            Detector::Sign(body) | Detector::Station(body) => body.as_str(),
            Detector::LunarPhase => "moon",
        }
    }

    fn state_at<P: EphemerisProvider + ?Sized>(
        &self,
        provider: &P,
        instant: DateTime<Utc>,
    ) -> Result<EventState, EngineError> {
        match self {
            Detector::Sign(body) => Ok(EventState::Sign(checked(provider, instant, body)?.sign())),
            Detector::Station(body) => {
                Ok(EventState::Motion(checked(provider, instant, body)?.motion_state()))
            }
            Detector::LunarPhase => {
                let sun = checked(provider, instant, "sun")?;
                let moon = checked(provider, instant, "moon")?;
                Ok(EventState::Phase(LunarPhase::from_positions(&sun, &moon)))
            }
        }
    }

    /// The event inside `[start, end]`, if the state differs at the two ends.
    pub fn detect<P: EphemerisProvider + ?Sized>(
        &self,
        provider: &P,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        settings: &SearchSettings,
    ) -> Result<Option<EventRecord>, EngineError> {
        let transition = detect_transition(start, end, settings.precision(), |t| {
            self.state_at(provider, t)
        })?;
        Ok(transition.map(|tr| EventRecord {
            kind: self.kind(),
            body: self.body().to_string(),
            from: tr.from,
            to: tr.to,
            exact_moment: tr.moment,
        }))
    }
}

fn checked<P: EphemerisProvider + ?Sized>(
    provider: &P,
    instant: DateTime<Utc>,
    body: &str,
) -> Result<Position, EngineError> {
    let pos = fetch_body(provider, instant, body)?;
    pos.validate()?;
    Ok(pos)
}

/// Sign ingress of `body` inside the window.
pub fn sign_change<P: EphemerisProvider + ?Sized>(
    provider: &P,
    body: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    settings: &SearchSettings,
) -> Result<Option<EventRecord>, EngineError> {
    Detector::Sign(body.to_string()).detect(provider, start, end, settings)
}

/// Station (retrograde or direct) of `body` inside the window.
pub fn retrograde_station<P: EphemerisProvider + ?Sized>(
    provider: &P,
    body: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    settings: &SearchSettings,
) -> Result<Option<EventRecord>, EngineError> {
    Detector::Station(body.to_string()).detect(provider, start, end, settings)
}

/// Lunar phase change inside the window.
pub fn phase_change<P: EphemerisProvider + ?Sized>(
    provider: &P,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    settings: &SearchSettings,
) -> Result<Option<EventRecord>, EngineError> {
    Detector::LunarPhase.detect(provider, start, end, settings)
}

/// All events of one detector between `start` and `end`.
pub fn search_events<P: EphemerisProvider + ?Sized>(
    provider: &P,
    detector: &Detector,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    settings: &SearchSettings,
) -> Result<Vec<EventRecord>, EngineError> {
    let step = settings.scan_step();
    let mut events = Vec::new();
    let mut t_prev = start;
    while t_prev < end {
        let t_curr = (t_prev + step).min(end);
        if let Some(event) = detector.detect(provider, t_prev, t_curr, settings)? {
            debug!("{:?} {} at {:?}", event.kind, event.body, event.exact_moment);
            events.push(event);
        }
        t_prev = t_curr;
    }
    Ok(events)
}

/// Newton solve for the moment `body` returns to `target` longitude.
pub fn longitude_return<P: EphemerisProvider + ?Sized>(
    provider: &P,
    body: &str,
    target: f64,
    guess: DateTime<Utc>,
    settings: &SearchSettings,
) -> Result<LongitudeSolution, EngineError> {
    solve_longitude_return(target, guess, settings, |t| {
        provider.position(t, body).map_err(EngineError::from)
    })
}

/// Solar return for `year`: the Sun back on its natal longitude.
///
/// Iteration starts from the birthday (same month, day and time) in `year`.
pub fn solar_return<P: EphemerisProvider + ?Sized>(
    provider: &P,
    natal_sun: f64,
    birth: DateTime<Utc>,
    year: i32,
    settings: &SearchSettings,
) -> Result<(EventRecord, LongitudeSolution), EngineError> {
    let guess = solar_return_guess(birth, year).ok_or(EngineError::InvalidInput {
        field: "year",
        value: year as f64,
    })?;
    let solution = longitude_return(provider, "sun", natal_sun, guess, settings)?;
    let record = EventRecord {
        kind: EventKind::SolarReturn,
        body: "sun".to_string(),
        from: EventState::Longitude(natal_sun),
        to: EventState::Longitude(normalize_longitude(natal_sun - solution.residual_deg)),
        exact_moment: Some(solution.moment),
    };
    Ok((record, solution))
}
