use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported to the caller for input that cannot be charted.
///
/// Unknown house-system or ayanamsa names are not errors; they fall back to
/// a default when parsed (see [`crate::ephemeris::HouseSystem::parse_or_default`]).
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AstroError {
    #[error("Invalid latitude {value}: must be within [-90, 90]")]
    InvalidLatitude { value: f64 },
    #[error("Invalid longitude {value}: must be within [-180, 180]")]
    InvalidLongitude { value: f64 },
    #[error("Invalid timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },
    #[error("Invalid importance {value} for life event #{index}: must be within [0, 1]")]
    InvalidImportance { index: usize, value: f64 },
    #[error("At least {required} life events are required for rectification, got {provided}")]
    InsufficientEvents { required: usize, provided: usize },
    #[error("Invalid time window {hours}h: must be at most {max}h")]
    InvalidTimeWindow { hours: u32, max: u32 },
}

impl AstroError {
    /// Name of the input field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            AstroError::InvalidLatitude { .. } => "latitude",
            AstroError::InvalidLongitude { .. } => "longitude",
            AstroError::InvalidTimestamp { .. } => "timestamp",
            AstroError::InvalidImportance { .. } => "life_events.importance",
            AstroError::InsufficientEvents { .. } => "life_events",
            AstroError::InvalidTimeWindow { .. } => "time_window_hours",
        }
    }
}

pub(crate) fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), AstroError> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(AstroError::InvalidLatitude { value: latitude });
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(AstroError::InvalidLongitude { value: longitude });
    }
    Ok(())
}
