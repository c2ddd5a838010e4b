use crate::aspects::catalog::{AspectKind, MatchPolicy};
use crate::aspects::orbs::OrbPolicy;
use crate::motion::DAILY_STEP;
use crate::peak::DEFAULT_HORIZON_DAYS;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One aspect between two chart points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectMatch {
    pub body_a: String,
    pub body_b: String,
    pub aspect: AspectKind,
    /// Exact angle for this aspect (0, 60, 90, 120, 180)
    pub exact_angle: f64,
    /// Actual separation in [0, 180]
    pub angle: f64,
    /// Deviation from the exact angle
    pub orb: f64,
    /// Whether the aspect is applying (approaching exact)
    pub applying: bool,
    /// Whether the orb is under the exact threshold
    pub exact: bool,
    /// Whether either point is retrograde
    pub retrograde: bool,
    /// Estimated moment of exactness (transit-like sets only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peak: Option<DateTime<Utc>>,
}

/// Counts over an aspect set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AspectSummary {
    pub total: usize,
    pub applying: usize,
    pub separating: usize,
    pub exact: usize,
    pub by_aspect: BTreeMap<AspectKind, usize>,
    /// A pair counts once for each of its two bodies
    pub by_body: BTreeMap<String, usize>,
}

impl AspectSummary {
    pub fn from_matches(matches: &[AspectMatch]) -> Self {
        let mut summary = Self::default();
        for m in matches {
            summary.total += 1;
            if m.applying {
                summary.applying += 1;
            } else {
                summary.separating += 1;
            }
            if m.exact {
                summary.exact += 1;
            }
            *summary.by_aspect.entry(m.aspect).or_insert(0) += 1;
            *summary.by_body.entry(m.body_a.clone()).or_insert(0) += 1;
            *summary.by_body.entry(m.body_b.clone()).or_insert(0) += 1;
        }
        summary
    }
}

/// How the two position collections are paired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pairing {
    /// Unordered pairs within one chart
    WithinChart,
    /// Every point of chart A against every point of chart B
    BetweenCharts,
}

/// Whether matches get a peak estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timing {
    /// Natal-style sets: no peak estimate
    Static,
    /// Transit-like sets: peaks estimated from this instant, A moving and B fixed
    TransitAt(DateTime<Utc>),
}

/// A set of aspects (within one chart or between two)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectSet {
    pub id: String,
    pub label: String,
    pub pairing: Pairing,
    pub layer_ids: Vec<String>,
    /// Sorted by orb, tightest first
    pub matches: Vec<AspectMatch>,
    pub summary: AspectSummary,
}

/// Settings for aspect calculations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectSettings {
    pub orbs: OrbPolicy,
    pub match_policy: MatchPolicy,
    /// Orb under which an aspect counts as exact
    pub exact_threshold: f64,
    /// Forward projection used by the applying test, in days
    pub projection_step_days: f64,
    /// Peaks further than this many days away are dropped
    pub peak_horizon_days: f64,
    /// Drop oppositions to the north node (the south node conjunction covers them)
    pub suppress_node_opposition: bool,
    /// Element/polarity compatibility filter
    pub compatibility_mode: bool,
    /// List of point IDs to include (empty = all)
    pub include_objects: Vec<String>,
}

impl Default for AspectSettings {
    fn default() -> Self {
        Self {
            orbs: OrbPolicy::default(),
            match_policy: MatchPolicy::FirstMatch,
            exact_threshold: 0.5,
            projection_step_days: DAILY_STEP,
            peak_horizon_days: DEFAULT_HORIZON_DAYS,
            suppress_node_opposition: true,
            compatibility_mode: false,
            include_objects: Vec::new(),
        }
    }
}
