//! Zodiac signs and their elemental metadata.
//!
//! Each sign spans 30° of ecliptic longitude starting at 0° Aries. Element and
//! polarity drive the sign-compatibility filter stage; rulers are exposed for
//! chart consumers.

use crate::geometry::normalize_longitude;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
}

const SIGN_ORDER: [Sign; 12] = [
    Sign::Aries,
    Sign::Taurus,
    Sign::Gemini,
    Sign::Cancer,
    Sign::Leo,
    Sign::Virgo,
    Sign::Libra,
    Sign::Scorpio,
    Sign::Sagittarius,
    Sign::Capricorn,
    Sign::Aquarius,
    Sign::Pisces,
];

impl Sign {
    /// All twelve signs in zodiac order.
    pub fn all() -> &'static [Sign; 12] {
        &SIGN_ORDER
    }

    /// Sign for an index, wrapping past Pisces.
    pub fn from_index(index: usize) -> Sign {
        SIGN_ORDER[index % 12]
    }

    /// Sign containing the given ecliptic longitude.
    pub fn from_longitude(longitude: f64) -> Sign {
        let normalized = normalize_longitude(longitude);
        Sign::from_index((normalized / 30.0).floor() as usize)
    }

    /// Zero-based position in the zodiac (Aries = 0).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Longitude at which this sign begins.
    pub fn start_longitude(self) -> f64 {
        self.index() as f64 * 30.0
    }

    pub fn element(self) -> Element {
        match self.index() % 4 {
            0 => Element::Fire,
            1 => Element::Earth,
            2 => Element::Air,
            _ => Element::Water,
        }
    }

    /// Fire and air signs are positive; earth and water signs negative.
    pub fn polarity(self) -> Polarity {
        if self.index() % 2 == 0 {
            Polarity::Positive
        } else {
            Polarity::Negative
        }
    }

    /// Sign ruler; `modern` swaps in the outer planets for Scorpio, Aquarius and Pisces.
    pub fn ruler(self, modern: bool) -> &'static str {
        match self {
            Sign::Aries => "mars",
            Sign::Taurus | Sign::Libra => "venus",
            Sign::Gemini | Sign::Virgo => "mercury",
            Sign::Cancer => "moon",
            Sign::Leo => "sun",
            Sign::Scorpio => {
                if modern {
                    "pluto"
                } else {
                    "mars"
                }
            }
            Sign::Sagittarius => "jupiter",
            Sign::Capricorn => "saturn",
            Sign::Aquarius => {
                if modern {
                    "uranus"
                } else {
                    "saturn"
                }
            }
            Sign::Pisces => {
                if modern {
                    "neptune"
                } else {
                    "jupiter"
                }
            }
        }
    }

    /// The sign 180° away.
    pub fn opposite(self) -> Sign {
        Sign::from_index(self.index() + 6)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Sign::Aries => "Aries",
            Sign::Taurus => "Taurus",
            Sign::Gemini => "Gemini",
            Sign::Cancer => "Cancer",
            Sign::Leo => "Leo",
            Sign::Virgo => "Virgo",
            Sign::Libra => "Libra",
            Sign::Scorpio => "Scorpio",
            Sign::Sagittarius => "Sagittarius",
            Sign::Capricorn => "Capricorn",
            Sign::Aquarius => "Aquarius",
            Sign::Pisces => "Pisces",
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Degrees elapsed within the sign, 0 <= x < 30.
pub fn degree_in_sign(longitude: f64) -> f64 {
    normalize_longitude(longitude) % 30.0
}
