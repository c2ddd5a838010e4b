use crate::aspects::catalog::{AspectKind, MatchPolicy, CATALOG};
use crate::aspects::orbs::OrbPolicy;
use crate::error::EngineError;
use crate::geometry::angle_between;
use serde::{Deserialize, Serialize};

/// Raw result of matching two longitudes against the catalog
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectHit {
    pub kind: AspectKind,
    /// Exact angle for this aspect (0, 60, 90, 120, 180)
    pub exact_angle: f64,
    /// Actual separation in [0, 180]
    pub angle: f64,
    /// Deviation from the exact angle
    pub orb: f64,
}

/// Find the aspect two longitudes form, using the owner body's orbs.
///
/// Returns `None` when the nearest catalog angle is outside the owner's
/// tolerance for it.
pub fn find_aspect(
    lon_a: f64,
    lon_b: f64,
    owner: &str,
    orbs: &OrbPolicy,
    policy: MatchPolicy,
) -> Result<Option<AspectHit>, EngineError> {
    let angle = angle_between(lon_a, lon_b)?;

    let mut best: Option<AspectHit> = None;
    for entry in CATALOG.iter() {
        let allowed = orbs.orb_for(owner, entry.kind);
        let diff = (angle - entry.angle).abs();
        if diff > allowed {
            continue;
        }

        let hit = AspectHit {
            kind: entry.kind,
            exact_angle: entry.angle,
            angle,
            orb: diff,
        };
        match policy {
            MatchPolicy::FirstMatch => return Ok(Some(hit)),
            MatchPolicy::Closest => {
                if best.map_or(true, |b| hit.orb < b.orb) {
                    best = Some(hit);
                }
            }
        }
    }

    Ok(best)
}
