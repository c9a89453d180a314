//! Closed-form birth charts and birth time rectification.
//!
//! Positions come from truncated trigonometric series rather than an
//! ephemeris data file, so every calculation is a pure function of its
//! inputs and never needs I/O.

pub mod aspects;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod rectification;
pub mod vedic;
pub mod western;

pub use aspects::{find_aspects, Aspect, AspectStrength, AspectType, OrbPreset, OrbTable};
pub use chart::{build_chart, BirthInput, Chart, ChartBuilder, ChartSettings, TransitSnapshot};
pub use ephemeris::{AyanamsaSystem, Body, HouseSystem, PrecisionTier, Zodiac};
pub use error::AstroError;
pub use rectification::{
    rectify_birth_time, BirthTimeRectifier, EventCategory, LifeEvent, RectificationRequest,
    RectificationResult, RectifierSettings,
};
pub use western::ZodiacSign;
