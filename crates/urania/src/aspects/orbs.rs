use crate::aspects::catalog::{AspectClass, AspectKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tolerance pair for one body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orb {
    pub major: f64,
    pub minor: f64,
}

impl Orb {
    pub const fn new(major: f64, minor: f64) -> Self {
        Self { major, minor }
    }
}

/// Orb for bodies missing from the table.
pub const DEFAULT_ORB: Orb = Orb::new(1.0, 0.5);

lazy_static::lazy_static! {
    // Slow outer bodies hold an aspect longer and get a wider tolerance.
    static ref DEFAULT_TABLE: HashMap<String, Orb> = {
        let entries: &[(&str, Orb)] = &[
            ("sun", Orb::new(1.0, 0.5)),
            ("moon", Orb::new(1.0, 0.5)),
            ("mercury", Orb::new(1.0, 0.5)),
            ("venus", Orb::new(1.0, 0.5)),
            ("mars", Orb::new(1.0, 0.5)),
            ("jupiter", Orb::new(1.5, 0.75)),
            ("saturn", Orb::new(1.5, 0.75)),
            ("uranus", Orb::new(2.0, 1.0)),
            ("neptune", Orb::new(2.0, 1.0)),
            ("pluto", Orb::new(2.0, 1.0)),
            ("north_node", Orb::new(1.0, 0.5)),
            ("south_node", Orb::new(1.0, 0.5)),
            ("chiron", Orb::new(1.0, 0.5)),
            ("lilith", Orb::new(1.0, 0.5)),
        ];
        entries.iter().map(|(id, orb)| (id.to_string(), *orb)).collect()
    };
}

/// Per-body orb table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbPolicy {
    pub bodies: HashMap<String, Orb>,
    pub fallback: Orb,
}

impl Default for OrbPolicy {
    fn default() -> Self {
        Self {
            bodies: DEFAULT_TABLE.clone(),
            fallback: DEFAULT_ORB,
        }
    }
}

impl OrbPolicy {
    /// An empty table where every body uses `fallback`.
    pub fn uniform(fallback: Orb) -> Self {
        Self {
            bodies: HashMap::new(),
            fallback,
        }
    }

    pub fn with_body(mut self, body: &str, orb: Orb) -> Self {
        self.bodies.insert(body.to_lowercase(), orb);
        self
    }

    pub fn orb_entry(&self, body: &str) -> Orb {
        self.bodies
            .get(body)
            .or_else(|| self.bodies.get(&body.to_lowercase()))
            .copied()
            .unwrap_or(self.fallback)
    }

    /// Tolerance in degrees for `body` forming `aspect`.
    pub fn orb_for(&self, body: &str, aspect: AspectKind) -> f64 {
        let entry = self.orb_entry(body);
        match aspect.class() {
            AspectClass::Major => entry.major,
            AspectClass::Minor => entry.minor,
        }
    }

    /// Widest orb any body can get.
    pub fn max_orb(&self) -> f64 {
        self.bodies
            .values()
            .map(|o| o.major.max(o.minor))
            .fold(self.fallback.major.max(self.fallback.minor), f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outer_bodies_get_wider_orbs() {
        let policy = OrbPolicy::default();
        assert_eq!(policy.orb_for("pluto", AspectKind::Square), 2.0);
        assert_eq!(policy.orb_for("moon", AspectKind::Trine), 1.0);
    }

    #[test]
    fn test_unknown_body_falls_back() {
        let policy = OrbPolicy::default();
        assert_eq!(policy.orb_entry("vesta"), DEFAULT_ORB);
        assert_eq!(policy.orb_for("vesta", AspectKind::Opposition), 1.0);
    }

    #[test]
    fn test_lookup_ignores_case() {
        let policy = OrbPolicy::default();
        assert_eq!(policy.orb_for("Pluto", AspectKind::Square), 2.0);
        assert_eq!(policy.orb_entry("SATURN"), policy.orb_entry("saturn"));
    }

    #[test]
    fn test_max_orb() {
        let policy = OrbPolicy::uniform(DEFAULT_ORB).with_body("sun", Orb::new(8.0, 3.0));
        assert_eq!(policy.max_orb(), 8.0);
    }
}
