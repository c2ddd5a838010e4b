//! Day-by-day transit sweep against a natal chart.

use crate::aspects::{AspectCalculator, AspectSet, AspectSettings, Timing};
use crate::ephemeris::provider::{fetch_layer, EphemerisProvider};
use crate::ephemeris::types::ChartLayer;
use crate::error::EngineError;
use crate::events::detect::Detector;
use crate::events::search::SearchSettings;
use crate::events::types::EventRecord;
use crate::houses::HouseSystem;
use chrono::{DateTime, Duration, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Transits for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTransits {
    pub date: DateTime<Utc>,
    /// Transit (moving) to natal (fixed) aspects at `date`, with peak estimates
    pub aspects: AspectSet,
    /// Ingresses, stations and lunar phase changes within the day
    pub events: Vec<EventRecord>,
}

/// Sweep `days` days from `start`, one sample per day.
///
/// Bodies the provider cannot compute on a given day are left out of that
/// day, and a detector whose body fails partway through the day is skipped.
/// Lunar phase changes are reported when both `sun` and `moon` were fetched.
pub fn transits_in_period<P: EphemerisProvider + ?Sized>(
    provider: &P,
    natal: &ChartLayer,
    bodies: &[String],
    start: DateTime<Utc>,
    days: u32,
    aspect_settings: &AspectSettings,
    search_settings: &SearchSettings,
) -> Result<Vec<DailyTransits>, EngineError> {
    let calculator = AspectCalculator::new(aspect_settings.clone());

    let mut out = Vec::with_capacity(days as usize);
    for day in 0..days {
        let date = start + Duration::days(day as i64);
        let next = date + Duration::days(1);
        let layer = fetch_layer(provider, date, bodies, None, HouseSystem::default())?;
        let aspects = calculator.between_charts("transit", "natal", &layer, natal, Timing::TransitAt(date))?;

        let mut detectors: Vec<Detector> = Vec::new();
        for body in &layer.bodies {
            detectors.push(Detector::Sign(body.id.clone()));
            detectors.push(Detector::Station(body.id.clone()));
        }
        if layer.get("sun").is_some() && layer.get("moon").is_some() {
            detectors.push(Detector::LunarPhase);
        }

        let mut events = Vec::new();
        for detector in &detectors {
            match detector.detect(provider, date, next, search_settings) {
                Ok(Some(event)) => events.push(event),
                Ok(None) => {}
                Err(EngineError::Ephemeris(e)) => {
                    warn!("skipping {:?} of {} on {}: {}", detector.kind(), detector.body(), date, e)
                }
                Err(e) => return Err(e),
            }
        }

        debug!(
            "transits {}: {} aspects, {} events",
            date,
            aspects.matches.len(),
            events.len()
        );
        out.push(DailyTransits { date, aspects, events });
    }
    Ok(out)
}
