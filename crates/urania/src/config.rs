//! TOML configuration for the engine.
//!
//! Every field is optional; anything missing keeps the built-in default.

use crate::aspects::{AspectSettings, MatchPolicy, Orb, OrbPolicy, DEFAULT_ORB};
use crate::ephemeris::{fetch_layer, ChartLayer, EphemerisError, EphemerisProvider, GeoLocation};
use crate::events::SearchSettings;
use crate::houses::HouseSystem;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Locations tried by [`load_default_config`], in order.
pub const CONFIG_PATHS: &[&str] = &["configs/urania.toml", "../../configs/urania.toml"];

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub match_policy: MatchPolicy,
    pub exact_threshold: f64,
    pub projection_step_days: f64,
    pub peak_horizon_days: f64,
    pub suppress_node_opposition: bool,
    pub compatibility_mode: bool,
    pub house_system: HouseSystem,
    pub include_objects: Vec<String>,
    pub default_orb: Orb,
    /// Per-body overrides merged over the built-in table
    pub orbs: HashMap<String, Orb>,
    pub search: SearchSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let aspects = AspectSettings::default();
        Self {
            match_policy: aspects.match_policy,
            exact_threshold: aspects.exact_threshold,
            projection_step_days: aspects.projection_step_days,
            peak_horizon_days: aspects.peak_horizon_days,
            suppress_node_opposition: aspects.suppress_node_opposition,
            compatibility_mode: aspects.compatibility_mode,
            house_system: HouseSystem::default(),
            include_objects: Vec::new(),
            default_orb: DEFAULT_ORB,
            orbs: HashMap::new(),
            search: SearchSettings::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let config: EngineConfig = toml::from_str(text)
            .map_err(|e| anyhow::anyhow!("Failed to parse urania config: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let orbs = std::iter::once(("default_orb", &self.default_orb))
            .chain(self.orbs.iter().map(|(k, v)| (k.as_str(), v)));
        for (name, orb) in orbs {
            if !(orb.major.is_finite() && orb.minor.is_finite()) || orb.major < 0.0 || orb.minor < 0.0 {
                anyhow::bail!("orb for {name} must be a non-negative number, got {:?}", orb);
            }
        }
        if !(self.projection_step_days.is_finite() && self.projection_step_days > 0.0) {
            anyhow::bail!("projection_step_days must be positive");
        }
        if !(self.search.precision_minutes.is_finite() && self.search.precision_minutes > 0.0) {
            anyhow::bail!("search.precision_minutes must be positive");
        }
        if !(self.search.scan_step_hours.is_finite() && self.search.scan_step_hours > 0.0) {
            anyhow::bail!("search.scan_step_hours must be positive");
        }
        if self.search.max_iterations == 0 {
            anyhow::bail!("search.max_iterations must be at least 1");
        }
        Ok(())
    }

    /// Runtime aspect settings; configured orbs override the built-in table.
    pub fn aspect_settings(&self) -> AspectSettings {
        let mut orbs = OrbPolicy {
            fallback: self.default_orb,
            ..OrbPolicy::default()
        };
        for (body, orb) in &self.orbs {
            orbs = orbs.with_body(body, *orb);
        }
        AspectSettings {
            orbs,
            match_policy: self.match_policy,
            exact_threshold: self.exact_threshold,
            projection_step_days: self.projection_step_days,
            peak_horizon_days: self.peak_horizon_days,
            suppress_node_opposition: self.suppress_node_opposition,
            compatibility_mode: self.compatibility_mode,
            include_objects: self.include_objects.clone(),
        }
    }

    pub fn search_settings(&self) -> SearchSettings {
        self.search
    }

    /// Fetch a chart with houses in the configured system when `location` is given.
    pub fn chart_layer<P: EphemerisProvider + ?Sized>(
        &self,
        provider: &P,
        instant: DateTime<Utc>,
        bodies: &[String],
        location: Option<GeoLocation>,
    ) -> Result<ChartLayer, EphemerisError> {
        fetch_layer(provider, instant, bodies, location, self.house_system)
    }
}

pub fn load_engine_config(path: &Path) -> anyhow::Result<EngineConfig> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Could not read {}: {e}", path.display()))?;
    EngineConfig::from_toml_str(&text)
}

/// Try the common relative locations, falling back to defaults when none exists.
pub fn load_default_config() -> anyhow::Result<EngineConfig> {
    for p in CONFIG_PATHS {
        let path = Path::new(p);
        if path.exists() {
            return load_engine_config(path);
        }
    }
    Ok(EngineConfig::default())
}
