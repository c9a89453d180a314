pub mod calculator;
pub mod types;

pub use calculator::{angular_separation, find_aspects, matching_aspects, AspectCalculator};
pub use types::{Aspect, AspectSet, AspectSetKind, AspectStrength, AspectType, OrbPreset, OrbTable};
