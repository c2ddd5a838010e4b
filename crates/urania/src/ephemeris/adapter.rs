use crate::ephemeris::provider::{EphemerisError, EphemerisProvider};
use crate::ephemeris::types::{GeoLocation, Position};
use crate::geometry::normalize_longitude;
use crate::houses::{HouseCusps, HouseSystem};
use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use std::env;
use std::path::PathBuf;
use swisseph::swe::{calc_ut, houses_ex, julday, revjul};
use swisseph::{AscMc, Cusp};

// Swiss Ephemeris body codes
const BODY_IDS: &[(&str, i32)] = &[
    ("sun", 0),
    ("moon", 1),
    ("mercury", 2),
    ("venus", 3),
    ("mars", 4),
    ("jupiter", 5),
    ("saturn", 6),
    ("uranus", 7),
    ("neptune", 8),
    ("pluto", 9),
    ("north_node", 11), // TRUE_NODE
    ("lilith", 12),     // OSCU_APOG
    ("chiron", 15),
];

/// Ayanamsa mapping - Swiss Ephemeris SIDM_* constants
const AYANAMSAS: &[(&str, i32)] = &[
    ("fagan_bradley", 0),
    ("lahiri", 1),
    ("de_luce", 2),
    ("raman", 3),
    ("krishnamurti", 5),
    ("djwhal_khul", 6),
    ("yukteshwar", 7),
    ("true_citra", 27),
    ("true_revati", 28),
];

const FLG_SWIEPH: i32 = 2;
const FLG_SPEED: i32 = 256;
const FLG_SIDEREAL: i32 = 64 * 1024;

/// Zodiac selection, fixed for the lifetime of an adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Zodiac {
    Tropical,
    Sidereal { ayanamsa: String },
}

/// Swiss Ephemeris backed provider
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
    flags: i32,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path.
    ///
    /// Falls back to `SWISS_EPHEMERIS_PATH`, then `/usr/local/share/swisseph`.
    pub fn new(ephemeris_path: Option<PathBuf>, zodiac: Zodiac) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/usr/local/share/swisseph"))
        });

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }

        let mut flags = FLG_SWIEPH | FLG_SPEED;
        if let Zodiac::Sidereal { ayanamsa } = &zodiac {
            // swisseph 0.1 has no set_sid_mode binding: the name is validated
            // but the library's default ayanamsa is what gets applied.
            resolve_ayanamsa(ayanamsa)?;
            flags |= FLG_SIDEREAL;
        }

        Ok(Self {
            ephemeris_path: path,
            flags,
        })
    }

    pub fn ephemeris_path(&self) -> &PathBuf {
        &self.ephemeris_path
    }
}

impl EphemerisProvider for SwissEphemerisAdapter {
    fn position(&self, instant: DateTime<Utc>, body: &str) -> Result<Position, EphemerisError> {
        let code = BODY_IDS
            .iter()
            .find(|(id, _)| *id == body)
            .map(|(_, code)| *code)
            .ok_or_else(|| EphemerisError::UnknownBody {
                body: body.to_string(),
            })?;

        let jd = datetime_to_julian_day(instant);
        let result = calc_ut(jd, code as u32, self.flags as u32).map_err(|e| {
            EphemerisError::CalculationFailed {
                body: body.to_string(),
                datetime: julian_day_to_datetime(jd).unwrap_or(instant),
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        let out = result.out;
        if !out[0].is_finite() || !out[3].is_finite() {
            return Err(EphemerisError::CalculationFailed {
                body: body.to_string(),
                datetime: instant,
                message: "non-finite longitude or speed".to_string(),
            });
        }

        Ok(Position {
            longitude: normalize_longitude(out[0]),
            speed: out[3],
        })
    }

    fn house_cusps(
        &self,
        instant: DateTime<Utc>,
        location: GeoLocation,
        system: HouseSystem,
    ) -> Result<HouseCusps, EphemerisError> {
        let jd = datetime_to_julian_day(instant);
        let (c, a) = houses_ex(jd, self.flags, location.lat, location.lon, system.code() as i32);
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let values = [
            cusps.first,
            cusps.second,
            cusps.third,
            cusps.fourth,
            cusps.fifth,
            cusps.sixth,
            cusps.seventh,
            cusps.eighth,
            cusps.ninth,
            cusps.tenth,
            cusps.eleventh,
            cusps.twelfth,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!("non-finite cusp for {:?} at {}", system, instant),
            });
        }

        Ok(HouseCusps {
            system,
            cusps: values.map(normalize_longitude),
            ascendant: normalize_longitude(ascmc.ascendant),
            midheaven: normalize_longitude(ascmc.mc),
        })
    }
}

/// Map ayanamsa string to Swiss constant
fn resolve_ayanamsa(ayanamsa: &str) -> Result<i32, EphemerisError> {
    AYANAMSAS
        .iter()
        .find(|(name, _)| *name == ayanamsa.to_lowercase())
        .map(|(_, mode)| *mode)
        .ok_or_else(|| EphemerisError::InvalidAyanamsa {
            ayanamsa: ayanamsa.to_string(),
            valid: AYANAMSAS.iter().map(|(name, _)| name.to_string()).collect(),
        })
}

/// Convert UTC datetime to Julian Day
fn datetime_to_julian_day(dt: DateTime<Utc>) -> f64 {
    let hour_decimal = dt.hour() as f64
        + dt.minute() as f64 / 60.0
        + (dt.second() as f64 + dt.nanosecond() as f64 / 1e9) / 3600.0;
    // GREG_CAL = 1
    julday(dt.year(), dt.month() as i32, dt.day() as i32, hour_decimal, 1)
}

/// Convert Julian Day to UTC datetime
fn julian_day_to_datetime(jd: f64) -> Option<DateTime<Utc>> {
    let (year, month, day, hour_decimal) = revjul(jd, 1);
    let hour = hour_decimal as u32;
    let minute = ((hour_decimal - hour as f64) * 60.0) as u32;
    let second = (((hour_decimal - hour as f64) * 60.0 - minute as f64) * 60.0) as u32;
    Utc.with_ymd_and_hms(year, month as u32, day as u32, hour, minute, second)
        .single()
}
