use crate::aspects::filters::active_filters;
use crate::aspects::matcher::find_aspect;
use crate::aspects::types::{AspectMatch, AspectSet, AspectSettings, AspectSummary, Pairing, Timing};
use crate::ephemeris::types::{BodyPosition, ChartLayer};
use crate::error::EngineError;
use crate::motion::is_applying;
use crate::peak::estimate_peak;
use log::debug;
use std::collections::BTreeMap;

/// Build the aspect set between two collections of chart points.
///
/// With [`Pairing::WithinChart`] only `set_a` is read and each unordered pair
/// is visited once; identically named points are skipped unless one of them
/// is a chart angle. With [`Pairing::BetweenCharts`] every point of `set_a`
/// meets every point of `set_b`, same names included. The first point of a
/// pair owns the orb and is the moving side for the applying test and peak
/// estimate. Matches are sorted by orb with a stable sort, so ties keep the
/// order in which pairs were visited.
pub fn build_aspects(
    set_a: &[BodyPosition],
    set_b: &[BodyPosition],
    pairing: Pairing,
    timing: Timing,
    settings: &AspectSettings,
) -> Result<(Vec<AspectMatch>, AspectSummary), EngineError> {
    let a = included(set_a, settings);
    let b = included(set_b, settings);
    let filters = active_filters(settings);

    let mut matches = Vec::new();
    let mut visit = |p: &BodyPosition, q: &BodyPosition| -> Result<(), EngineError> {
        let Some(m) = match_pair(p, q, timing, settings)? else {
            return Ok(());
        };
        if let Some(stage) = filters.iter().find(|f| !f.keep(&m, &p.position, &q.position)) {
            debug!("{} dropped {} {} {}", stage.name(), m.body_a, m.aspect, m.body_b);
            return Ok(());
        }
        matches.push(m);
        Ok(())
    };

    match pairing {
        Pairing::WithinChart => {
            for i in 0..a.len() {
                for j in (i + 1)..a.len() {
                    let (p, q) = (a[i], a[j]);
                    if p.id == q.id && !(p.is_angle() || q.is_angle()) {
                        continue;
                    }
                    visit(p, q)?;
                }
            }
        }
        Pairing::BetweenCharts => {
            for p in a.iter().copied() {
                for q in b.iter().copied() {
                    visit(p, q)?;
                }
            }
        }
    }

    // Orbs are finite here, so total_cmp gives the plain numeric order
    matches.sort_by(|x, y| x.orb.total_cmp(&y.orb));
    let summary = AspectSummary::from_matches(&matches);
    Ok((matches, summary))
}

fn included<'a>(set: &'a [BodyPosition], settings: &AspectSettings) -> Vec<&'a BodyPosition> {
    set.iter()
        .filter(|b| settings.include_objects.is_empty() || settings.include_objects.contains(&b.id))
        .collect()
}

fn match_pair(
    p: &BodyPosition,
    q: &BodyPosition,
    timing: Timing,
    settings: &AspectSettings,
) -> Result<Option<AspectMatch>, EngineError> {
    p.position.validate()?;
    q.position.validate()?;

    let Some(hit) = find_aspect(
        p.position.longitude,
        q.position.longitude,
        &p.id,
        &settings.orbs,
        settings.match_policy,
    )?
    else {
        return Ok(None);
    };

    let applying = is_applying(&p.position, &q.position, hit.exact_angle, settings.projection_step_days)?;
    let peak = match timing {
        Timing::Static => None,
        Timing::TransitAt(as_of) => estimate_peak(
            &p.position,
            &q.position,
            hit.exact_angle,
            as_of,
            settings.peak_horizon_days,
        )?,
    };

    Ok(Some(AspectMatch {
        body_a: p.id.clone(),
        body_b: q.id.clone(),
        aspect: hit.kind,
        exact_angle: hit.exact_angle,
        angle: hit.angle,
        orb: hit.orb,
        applying,
        exact: hit.orb < settings.exact_threshold,
        retrograde: p.position.is_retrograde() || q.position.is_retrograde(),
        peak,
    }))
}

/// Aspect calculator bound to one set of settings
pub struct AspectCalculator {
    settings: AspectSettings,
}

impl AspectCalculator {
    pub fn new(settings: AspectSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &AspectSettings {
        &self.settings
    }

    /// Compute aspects within a single layer
    pub fn within_chart(&self, layer_id: &str, layer: &ChartLayer) -> Result<AspectSet, EngineError> {
        let (matches, summary) = build_aspects(
            &layer.bodies,
            &layer.bodies,
            Pairing::WithinChart,
            Timing::Static,
            &self.settings,
        )?;
        Ok(AspectSet {
            id: layer_id.to_string(),
            label: format!("{} Aspects", capitalize_first(layer_id)),
            pairing: Pairing::WithinChart,
            layer_ids: vec![layer_id.to_string()],
            matches,
            summary,
        })
    }

    /// Compute aspects from layer A (moving side) to layer B
    pub fn between_charts(
        &self,
        layer_id_a: &str,
        layer_id_b: &str,
        layer_a: &ChartLayer,
        layer_b: &ChartLayer,
        timing: Timing,
    ) -> Result<AspectSet, EngineError> {
        let (matches, summary) = build_aspects(
            &layer_a.bodies,
            &layer_b.bodies,
            Pairing::BetweenCharts,
            timing,
            &self.settings,
        )?;
        Ok(AspectSet {
            id: format!("{}:{}", layer_id_a, layer_id_b),
            label: format!(
                "{} / {} Aspects",
                capitalize_first(layer_id_a),
                capitalize_first(layer_id_b)
            ),
            pairing: Pairing::BetweenCharts,
            layer_ids: vec![layer_id_a.to_string(), layer_id_b.to_string()],
            matches,
            summary,
        })
    }

    /// Compute every within-chart set and every pairwise between-chart set.
    ///
    /// Layers are visited in key order; between-chart sets are static.
    pub fn all_aspect_sets(
        &self,
        layers: &BTreeMap<String, ChartLayer>,
    ) -> Result<BTreeMap<String, AspectSet>, EngineError> {
        let mut sets = BTreeMap::new();
        for (id, layer) in layers {
            let set = self.within_chart(id, layer)?;
            sets.insert(set.id.clone(), set);
        }

        let ids: Vec<&String> = layers.keys().collect();
        for i in 0..ids.len() {
            for j in (i + 1)..ids.len() {
                let set = self.between_charts(
                    ids[i],
                    ids[j],
                    &layers[ids[i]],
                    &layers[ids[j]],
                    Timing::Static,
                )?;
                sets.insert(set.id.clone(), set);
            }
        }
        Ok(sets)
    }
}

impl Default for AspectCalculator {
    fn default() -> Self {
        Self::new(AspectSettings::default())
    }
}

/// Capitalize first letter of a string
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
