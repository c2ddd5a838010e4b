//! Post-processing stages applied after matching.
//!
//! The matcher only does geometry. Domain rules that drop otherwise valid
//! matches live here as named stages so they can be switched independently.

use crate::aspects::catalog::AspectKind;
use crate::aspects::types::{AspectMatch, AspectSettings};
use crate::ephemeris::types::Position;

/// A stage that may drop a match
pub trait AspectFilter {
    fn name(&self) -> &'static str;

    /// `a` and `b` are the positions of `m.body_a` and `m.body_b`.
    fn keep(&self, m: &AspectMatch, a: &Position, b: &Position) -> bool;
}

/// Drops oppositions to the north node.
pub struct NodeOppositionFilter;

impl AspectFilter for NodeOppositionFilter {
    fn name(&self) -> &'static str {
        "node_opposition"
    }

    fn keep(&self, m: &AspectMatch, _a: &Position, _b: &Position) -> bool {
        !(m.aspect == AspectKind::Opposition
            && (m.body_a == "north_node" || m.body_b == "north_node"))
    }
}

/// Keeps only aspects whose signs agree with the aspect's nature.
///
/// Square: signs must not share an element. Trine: signs must share an
/// element. Sextile: signs must share polarity. Conjunction: same sign.
/// Oppositions pass through.
pub struct SignCompatibilityFilter;

impl AspectFilter for SignCompatibilityFilter {
    fn name(&self) -> &'static str {
        "sign_compatibility"
    }

    fn keep(&self, m: &AspectMatch, a: &Position, b: &Position) -> bool {
        let (sign_a, sign_b) = (a.sign(), b.sign());
        match m.aspect {
            AspectKind::Square => sign_a.element() != sign_b.element(),
            AspectKind::Trine => sign_a.element() == sign_b.element(),
            AspectKind::Sextile => sign_a.polarity() == sign_b.polarity(),
            AspectKind::Conjunction => sign_a == sign_b,
            AspectKind::Opposition => true,
        }
    }
}

/// Stages enabled by the settings, in application order.
pub fn active_filters(settings: &AspectSettings) -> Vec<Box<dyn AspectFilter>> {
    let mut stages: Vec<Box<dyn AspectFilter>> = Vec::new();
    if settings.suppress_node_opposition {
        stages.push(Box::new(NodeOppositionFilter));
    }
    if settings.compatibility_mode {
        stages.push(Box::new(SignCompatibilityFilter));
    }
    stages
}
