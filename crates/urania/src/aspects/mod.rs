pub mod calculator;
pub mod catalog;
pub mod filters;
pub mod matcher;
pub mod orbs;
pub mod types;

pub use calculator::{build_aspects, AspectCalculator};
pub use catalog::{AspectClass, AspectDefinition, AspectKind, MatchPolicy, CATALOG};
pub use filters::{AspectFilter, NodeOppositionFilter, SignCompatibilityFilter};
pub use matcher::{find_aspect, AspectHit};
pub use orbs::{Orb, OrbPolicy, DEFAULT_ORB};
pub use types::{AspectMatch, AspectSet, AspectSettings, AspectSummary, Pairing, Timing};
