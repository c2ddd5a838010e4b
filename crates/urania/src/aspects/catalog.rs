use serde::{Deserialize, Serialize};
use std::fmt;

/// The five aspects recognised by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

/// Orb class an aspect draws its tolerance from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectClass {
    Major,
    /// Reserved for quincunx-family aspects; nothing in the catalog uses it yet.
    Minor,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectDefinition {
    pub kind: AspectKind,
    pub angle: f64,
    pub class: AspectClass,
}

/// Fixed enumeration order used by the matcher.
pub const CATALOG: [AspectDefinition; 5] = [
    AspectDefinition { kind: AspectKind::Conjunction, angle: 0.0, class: AspectClass::Major },
    AspectDefinition { kind: AspectKind::Sextile, angle: 60.0, class: AspectClass::Major },
    AspectDefinition { kind: AspectKind::Square, angle: 90.0, class: AspectClass::Major },
    AspectDefinition { kind: AspectKind::Trine, angle: 120.0, class: AspectClass::Major },
    AspectDefinition { kind: AspectKind::Opposition, angle: 180.0, class: AspectClass::Major },
];

impl AspectKind {
    pub fn definition(self) -> &'static AspectDefinition {
        // CATALOG is ordered like the enum
        &CATALOG[self as usize]
    }

    pub fn angle(self) -> f64 {
        self.definition().angle
    }

    pub fn class(self) -> AspectClass {
        self.definition().class
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "conjunction",
            AspectKind::Sextile => "sextile",
            AspectKind::Square => "square",
            AspectKind::Trine => "trine",
            AspectKind::Opposition => "opposition",
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the matcher picks among catalog entries whose tolerance windows overlap.
///
/// With orbs under 15° the windows never overlap and both policies agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// First qualifying entry in catalog order.
    #[default]
    FirstMatch,
    /// Qualifying entry with the smallest deviation; ties go to the earlier entry.
    Closest,
}
