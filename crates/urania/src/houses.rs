//! House cusps and house placement.
//!
//! The house system is always an explicit argument: nothing here keeps a
//! "current" system around between calls.

use crate::ephemeris::types::ChartLayer;
use crate::error::{ensure_finite, EngineError};
use crate::geometry::normalize_longitude;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Supported house systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    #[default]
    Placidus,
    WholeSign,
    Koch,
    Equal,
    Regiomontanus,
    Campanus,
    Alcabitius,
    Morinus,
}

/// House system mapping (name, Swiss Ephemeris code)
const HOUSE_SYSTEMS: &[(&str, HouseSystem, u8)] = &[
    ("placidus", HouseSystem::Placidus, b'P'),
    ("whole_sign", HouseSystem::WholeSign, b'W'),
    ("koch", HouseSystem::Koch, b'K'),
    ("equal", HouseSystem::Equal, b'E'),
    ("regiomontanus", HouseSystem::Regiomontanus, b'R'),
    ("campanus", HouseSystem::Campanus, b'C'),
    ("alcabitius", HouseSystem::Alcabitius, b'A'),
    ("morinus", HouseSystem::Morinus, b'M'),
];

impl HouseSystem {
    /// Single-letter code understood by Swiss Ephemeris.
    pub fn code(self) -> u8 {
        HOUSE_SYSTEMS
            .iter()
            .find(|(_, system, _)| *system == self)
            .map(|(_, _, code)| *code)
            .unwrap_or(b'P')
    }

    pub fn name(self) -> &'static str {
        HOUSE_SYSTEMS
            .iter()
            .find(|(_, system, _)| *system == self)
            .map(|(name, _, _)| *name)
            .unwrap_or("placidus")
    }
}

impl FromStr for HouseSystem {
    type Err = crate::ephemeris::EphemerisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_lowercase();
        HOUSE_SYSTEMS
            .iter()
            .find(|(name, _, _)| *name == wanted)
            .map(|(_, system, _)| *system)
            .ok_or_else(|| crate::ephemeris::EphemerisError::InvalidHouseSystem {
                system: s.to_string(),
                valid: HOUSE_SYSTEMS.iter().map(|(name, _, _)| name.to_string()).collect(),
            })
    }
}

/// House cusps and the two primary angles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseCusps {
    #[serde(default)]
    pub system: HouseSystem,
    /// Cusp longitudes, index = house - 1
    pub cusps: [f64; 12],
    pub ascendant: f64,
    pub midheaven: f64,
}

impl HouseCusps {
    /// Equal houses: 30° segments starting at the ascendant.
    pub fn equal(ascendant: f64, midheaven: f64) -> Self {
        let asc = normalize_longitude(ascendant);
        let cusps = std::array::from_fn(|i| normalize_longitude(asc + 30.0 * i as f64));
        Self {
            system: HouseSystem::Equal,
            cusps,
            ascendant: asc,
            midheaven: normalize_longitude(midheaven),
        }
    }

    /// Whole-sign houses: the ascendant's sign is the first house.
    pub fn whole_sign(ascendant: f64, midheaven: f64) -> Self {
        let asc = normalize_longitude(ascendant);
        let first = (asc / 30.0).floor() * 30.0;
        let cusps = std::array::from_fn(|i| normalize_longitude(first + 30.0 * i as f64));
        Self {
            system: HouseSystem::WholeSign,
            cusps,
            ascendant: asc,
            midheaven: normalize_longitude(midheaven),
        }
    }

    pub fn descendant(&self) -> f64 {
        normalize_longitude(self.ascendant + 180.0)
    }

    pub fn imum_coeli(&self) -> f64 {
        normalize_longitude(self.midheaven + 180.0)
    }

    /// Angles as (id, longitude) pairs: asc, mc, dc, ic.
    pub fn angle_points(&self) -> [(&'static str, f64); 4] {
        [
            ("asc", normalize_longitude(self.ascendant)),
            ("mc", normalize_longitude(self.midheaven)),
            ("dc", self.descendant()),
            ("ic", self.imum_coeli()),
        ]
    }

    /// House (1-12) containing a longitude.
    pub fn house_of(&self, longitude: f64) -> Result<u8, EngineError> {
        house_of(longitude, &self.cusps)
    }
}

/// Map a longitude to its house given the 12 cusp longitudes.
///
/// House `i` runs from `cusps[i]` forward to `cusps[i + 1]`; a house whose end
/// is smaller than its start crosses 0° Aries. The first matching house in
/// cusp order wins.
pub fn house_of(longitude: f64, cusps: &[f64; 12]) -> Result<u8, EngineError> {
    let lon = normalize_longitude(ensure_finite("longitude", longitude)?);
    if let Some(i) = cusps.iter().position(|c| !c.is_finite()) {
        return Err(EngineError::InvalidCusps {
            message: format!("cusp {} is {}", i + 1, cusps[i]),
        });
    }

    for i in 0..12 {
        let start = normalize_longitude(cusps[i]);
        let end = normalize_longitude(cusps[(i + 1) % 12]);
        let inside = if end < start {
            lon >= start || lon < end
        } else {
            lon >= start && lon < end
        };
        if inside {
            return Ok((i + 1) as u8);
        }
    }

    // Unreachable for twelve cusps that cover the circle
    Ok(1)
}

/// House placement of one chart point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousePlacement {
    pub body: String,
    pub longitude: f64,
    pub house: u8,
}

/// Place every point of a layer into the given houses.
pub fn place_bodies(
    layer: &ChartLayer,
    cusps: &HouseCusps,
) -> Result<Vec<HousePlacement>, EngineError> {
    layer
        .bodies
        .iter()
        .map(|body| {
            Ok(HousePlacement {
                body: body.id.clone(),
                longitude: body.position.longitude,
                house: cusps.house_of(body.position.longitude)?,
            })
        })
        .collect()
}
