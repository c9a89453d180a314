//! Ayanamsa (tropical to sidereal offset) for a few reference systems.
//!
//! Each system is a base offset at J2000.0 plus a linear precession rate.
//! This is coarser than the IAU precession polynomial but keeps every
//! sidereal conversion a closed-form function of the Julian Day.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ephemeris::time::years_since_j2000;
use crate::ephemeris::types::normalize_degrees;

/// General precession in longitude, arcseconds per Julian year.
pub const PRECESSION_ARCSEC_PER_YEAR: f64 = 50.290966;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AyanamsaSystem {
    /// Lahiri (Chitrapaksha): Spica at 0° Libra sidereal.
    #[default]
    Lahiri,
    /// B.V. Raman.
    Raman,
    /// Krishnamurti Paddhati, a few arcseconds short of Lahiri.
    Krishnamurti,
    /// Fagan-Bradley, the Western sidereal reference.
    FaganBradley,
}

/// Ayanamsa mapping, aliases included
const AYANAMSAS: &[(&str, AyanamsaSystem)] = &[
    ("lahiri", AyanamsaSystem::Lahiri),
    ("chitrapaksha", AyanamsaSystem::Lahiri),
    ("raman", AyanamsaSystem::Raman),
    ("krishnamurti", AyanamsaSystem::Krishnamurti),
    ("kp", AyanamsaSystem::Krishnamurti),
    ("fagan_bradley", AyanamsaSystem::FaganBradley),
    ("fagan-bradley", AyanamsaSystem::FaganBradley),
];

impl AyanamsaSystem {
    pub const ALL: [AyanamsaSystem; 4] = [
        AyanamsaSystem::Lahiri,
        AyanamsaSystem::Raman,
        AyanamsaSystem::Krishnamurti,
        AyanamsaSystem::FaganBradley,
    ];

    /// Offset at J2000.0 in degrees.
    pub const fn reference_j2000_deg(self) -> f64 {
        match self {
            Self::Lahiri => 23.85208333,
            Self::Raman => 21.94613889,
            Self::Krishnamurti => 23.84916667,
            Self::FaganBradley => 24.73583333,
        }
    }

    /// Precession rate in arcseconds per year.
    pub const fn rate_arcsec_per_year(self) -> f64 {
        match self {
            // Fagan-Bradley is tied to the synetic vernal point drift
            Self::FaganBradley => 50.2564,
            _ => PRECESSION_ARCSEC_PER_YEAR,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Lahiri => "LAHIRI",
            Self::Raman => "RAMAN",
            Self::Krishnamurti => "KP",
            Self::FaganBradley => "FAGAN_BRADLEY",
        }
    }

    /// Look up a system by name; `None` if unknown.
    pub fn from_name(name: &str) -> Option<AyanamsaSystem> {
        let key = name.trim().to_lowercase();
        AYANAMSAS
            .iter()
            .find(|(n, _)| *n == key)
            .map(|(_, system)| *system)
    }

    /// Look up a system by name, falling back to Lahiri.
    pub fn parse_or_default(name: &str) -> AyanamsaSystem {
        Self::from_name(name).unwrap_or_else(|| {
            log::warn!("Unknown ayanamsa '{}', using Lahiri", name);
            AyanamsaSystem::Lahiri
        })
    }
}

impl fmt::Display for AyanamsaSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Zodiac in which chart longitudes are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zodiac {
    #[default]
    Tropical,
    Sidereal(AyanamsaSystem),
}

impl Zodiac {
    /// `"tropical"` (or an empty name) selects the tropical zodiac; any
    /// other name is an ayanamsa, defaulting to Lahiri when unknown.
    pub fn parse_or_default(name: &str) -> Zodiac {
        match name.trim().to_lowercase().as_str() {
            "" | "tropical" | "none" => Zodiac::Tropical,
            other => Zodiac::Sidereal(AyanamsaSystem::parse_or_default(other)),
        }
    }

    pub fn ayanamsa_system(self) -> Option<AyanamsaSystem> {
        match self {
            Zodiac::Tropical => None,
            Zodiac::Sidereal(system) => Some(system),
        }
    }
}

/// Ayanamsa in degrees at the given Julian Day.
pub fn ayanamsa(jd: f64, system: AyanamsaSystem) -> f64 {
    system.reference_j2000_deg() + system.rate_arcsec_per_year() / 3600.0 * years_since_j2000(jd)
}

/// `(tropical - ayanamsa) mod 360`.
pub fn tropical_to_sidereal(tropical_longitude: f64, jd: f64, system: AyanamsaSystem) -> f64 {
    normalize_degrees(tropical_longitude - ayanamsa(jd, system))
}

/// `(sidereal + ayanamsa) mod 360`.
pub fn sidereal_to_tropical(sidereal_longitude: f64, jd: f64, system: AyanamsaSystem) -> f64 {
    normalize_degrees(sidereal_longitude + ayanamsa(jd, system))
}

/// Render an ayanamsa value as `"{value:.6}°"`.
pub fn format_ayanamsa(value: f64) -> String {
    format!("{:.6}°", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::time::J2000_JD;

    #[test]
    fn test_lahiri_at_j2000() {
        assert_eq!(ayanamsa(J2000_JD, AyanamsaSystem::Lahiri), 23.85208333);
    }

    #[test]
    fn test_distinct_reference_values() {
        for (i, a) in AyanamsaSystem::ALL.iter().enumerate() {
            for b in &AyanamsaSystem::ALL[i + 1..] {
                assert_ne!(a.reference_j2000_deg(), b.reference_j2000_deg());
            }
        }
    }

    #[test]
    fn test_precession_forward() {
        let century = J2000_JD + 36525.0;
        let drift = ayanamsa(century, AyanamsaSystem::Lahiri) - ayanamsa(J2000_JD, AyanamsaSystem::Lahiri);
        assert!((drift - 1.397).abs() < 0.001, "one century drift = {drift}");
    }

    #[test]
    fn test_unknown_name_falls_back() {
        assert_eq!(AyanamsaSystem::parse_or_default("KP"), AyanamsaSystem::Krishnamurti);
        assert_eq!(AyanamsaSystem::parse_or_default("yukteshwar"), AyanamsaSystem::Lahiri);
        assert_eq!(Zodiac::parse_or_default("tropical"), Zodiac::Tropical);
        assert_eq!(
            Zodiac::parse_or_default("raman"),
            Zodiac::Sidereal(AyanamsaSystem::Raman)
        );
    }

    #[test]
    fn test_format_ayanamsa() {
        assert_eq!(format_ayanamsa(23.85208333), "23.852083°");
    }
}
