use crate::error::{ensure_finite, EngineError};
use crate::geometry::normalize_longitude;
use crate::houses::HouseCusps;
use crate::motion::MotionState;
use crate::zodiac::{self, Sign};
use serde::{Deserialize, Serialize};

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

/// Ecliptic position of a body at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Longitude in degrees (0-360)
    pub longitude: f64,
    /// Speed in longitude (degrees per day, negative when retrograde)
    pub speed: f64,
}

impl Position {
    /// Build a validated position; the longitude is normalized into [0, 360).
    pub fn new(longitude: f64, speed: f64) -> Result<Self, EngineError> {
        let longitude = ensure_finite("longitude", longitude)?;
        let speed = ensure_finite("speed", speed)?;
        Ok(Self {
            longitude: normalize_longitude(longitude),
            speed,
        })
    }

    pub(crate) fn validate(&self) -> Result<(), EngineError> {
        ensure_finite("longitude", self.longitude)?;
        ensure_finite("speed", self.speed)?;
        Ok(())
    }

    pub fn sign(&self) -> Sign {
        Sign::from_longitude(self.longitude)
    }

    pub fn degree_in_sign(&self) -> f64 {
        zodiac::degree_in_sign(self.longitude)
    }

    pub fn is_retrograde(&self) -> bool {
        self.speed < 0.0
    }

    pub fn motion_state(&self) -> MotionState {
        MotionState::from_speed(self.speed)
    }
}

/// Whether a chart point is a moving body or a chart angle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointKind {
    #[default]
    Body,
    Angle,
}

/// A named point inside a chart layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    /// Lower-case id: "sun", "north_node", "asc", ...
    pub id: String,
    #[serde(default)]
    pub kind: PointKind,
    #[serde(flatten)]
    pub position: Position,
}

impl BodyPosition {
    pub fn body(id: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            kind: PointKind::Body,
            position,
        }
    }

    pub fn angle(id: impl Into<String>, longitude: f64) -> Self {
        Self {
            id: id.into(),
            kind: PointKind::Angle,
            position: Position {
                longitude: normalize_longitude(longitude),
                speed: 0.0,
            },
        }
    }

    pub fn is_angle(&self) -> bool {
        self.kind == PointKind::Angle
    }
}

/// Complete position data for one chart (natal, transit, progressed, ...).
///
/// Body order is preserved; it is the insertion order used to break orb ties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartLayer {
    #[serde(default)]
    pub bodies: Vec<BodyPosition>,
    /// House positions (None if no location provided)
    #[serde(default)]
    pub houses: Option<HouseCusps>,
}

impl ChartLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, body: BodyPosition) {
        self.bodies.push(body);
    }

    pub fn get(&self, id: &str) -> Option<&BodyPosition> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn position(&self, id: &str) -> Option<Position> {
        self.get(id).map(|b| b.position)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Append the four chart angles as aspectable points.
    ///
    /// No-op when the layer has no houses or the angles are already present.
    pub fn with_angles(mut self) -> Self {
        if let Some(houses) = self.houses.clone() {
            for (id, lon) in houses.angle_points() {
                if self.get(id).is_none() {
                    self.bodies.push(BodyPosition::angle(id, lon));
                }
            }
        }
        self
    }
}
