//! Approximate house cusps from local sidereal time.
//!
//! Cusps are laid out from the local sidereal time rather than from a true
//! spherical-trigonometry ascendant. The whole house subsystem is a coarse
//! placeholder: `PlacidusApprox` is equal houses plus a latitude term of at
//! most ±3°, not iterative Placidus.
//!
//! Poles: every formula stays finite at latitude ±90°; the Placidus
//! correction simply reaches its ±3° maximum there.

use crate::ephemeris::time::{centuries_since_j2000, days_since_j2000};
use crate::ephemeris::types::{normalize_degrees, HouseCusp, HousePositions, HouseSystem};
use crate::western::signs::SIGN_SPAN;

/// Maximum latitude correction applied by the Placidus approximation.
const PLACIDUS_LAT_CORRECTION_DEG: f64 = 3.0;

/// Greenwich mean sidereal time plus observer longitude, in degrees.
pub fn local_sidereal_time_degrees(jd: f64, longitude: f64) -> f64 {
    let t = centuries_since_j2000(jd);
    let theta0 = 280.46061837 + 360.98564736629 * days_since_j2000(jd) + 0.000387933 * t * t
        - t * t * t / 38_710_000.0;
    normalize_degrees(theta0 + longitude)
}

/// Compute the 12 house cusps.
///
/// When `ayanamsa` is given the cusps are sidereal: the offset is
/// subtracted from every cusp. For whole-sign houses the offset is applied
/// to the sidereal time before picking the rising sign so every cusp stays
/// on a sign boundary.
pub fn compute_houses(
    jd: f64,
    latitude: f64,
    longitude: f64,
    system: HouseSystem,
    ayanamsa: Option<f64>,
) -> HousePositions {
    let lst = local_sidereal_time_degrees(jd, longitude);
    let offset = ayanamsa.unwrap_or(0.0);

    let cusps = (0..12u8)
        .map(|i| {
            let step = f64::from(i) * SIGN_SPAN;
            let cusp = match system {
                HouseSystem::Equal => normalize_degrees(lst + step - offset),
                HouseSystem::WholeSign => {
                    let rising = (normalize_degrees(lst - offset) / SIGN_SPAN).floor() as u32;
                    f64::from((rising + u32::from(i)) % 12) * SIGN_SPAN
                }
                HouseSystem::PlacidusApprox => {
                    let base = normalize_degrees(step + lst);
                    let correction = latitude.to_radians().sin()
                        * PLACIDUS_LAT_CORRECTION_DEG
                        * base.to_radians().cos();
                    normalize_degrees(normalize_degrees(base + correction) - offset)
                }
            };
            HouseCusp::new(i + 1, cusp)
        })
        .collect();

    HousePositions {
        system,
        local_sidereal_time: lst,
        cusps,
    }
}

/// Single-point ascendant estimate `(LST + latitude / 4) mod 360`, used
/// where only the rising degree matters.
pub fn approximate_ascendant(jd: f64, latitude: f64, longitude: f64) -> f64 {
    normalize_degrees(local_sidereal_time_degrees(jd, longitude) + latitude / 4.0)
}
