//! Zodiac signs for Western and sidereal charts.
//!
//! Each sign spans exactly 30° of ecliptic longitude starting at Aries 0°.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ephemeris::types::normalize_degrees;

pub const SIGN_SPAN: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ZodiacSign {
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

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    /// Sign containing the given longitude.
    pub fn from_longitude(longitude: f64) -> ZodiacSign {
        ZodiacSign::ALL[get_sign_index(longitude)]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Get sign index (0-11) from longitude
pub fn get_sign_index(longitude: f64) -> usize {
    let normalized = normalize_degrees(longitude);
    ((normalized / SIGN_SPAN).floor() as usize).min(11)
}

/// Degrees past the start of the containing sign, in [0, 30).
pub fn degrees_in_sign(longitude: f64) -> f64 {
    let normalized = normalize_degrees(longitude);
    let within = normalized - get_sign_index(normalized) as f64 * SIGN_SPAN;
    within.clamp(0.0, SIGN_SPAN - f64::EPSILON * SIGN_SPAN)
}

/// Render a longitude as `"{degrees_in_sign:.1}° {Sign}"`.
pub fn format_position(longitude: f64) -> String {
    format!(
        "{:.1}° {}",
        degrees_in_sign(longitude),
        ZodiacSign::from_longitude(longitude)
    )
}
