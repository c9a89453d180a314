//! Closed-form ecliptic longitudes for the Sun, Moon and planets.
//!
//! Two tiers are available. `Basic` uses mean motion with at most one or two
//! periodic terms; `Enhanced` evaluates mean elements as polynomials in
//! Julian centuries and applies an equation-of-center correction. Neither
//! tier is research grade: expect arcminute accuracy for the Sun, about a
//! degree for the Moon and several degrees for the outer planets.
//!
//! Every function here is a pure function of the Julian Day.

use crate::ephemeris::time::{centuries_since_j2000, days_since_j2000};
use crate::ephemeris::types::{normalize_degrees, Body, PrecisionTier};

/// Linear mean-motion model: (longitude at J2000, degrees per day).
const LINEAR_ELEMENTS: &[(Body, f64, f64)] = &[
    (Body::Mercury, 252.25, 4.092317),
    (Body::Venus, 181.98, 1.602129),
    (Body::Mars, 355.43, 0.524071),
    (Body::Jupiter, 34.35, 0.083091),
    (Body::Saturn, 50.08, 0.033494),
    (Body::Uranus, 313.23, 0.011773),
    (Body::Neptune, 304.35, 0.006027),
    (Body::Pluto, 238.92, 0.003968),
];

/// Quadratic polynomial in Julian centuries: c0 + c1*T + c2*T^2.
#[derive(Debug, Clone, Copy)]
struct Poly(f64, f64, f64);

impl Poly {
    fn at(self, t: f64) -> f64 {
        self.0 + self.1 * t + self.2 * t * t
    }
}

/// Mean orbital elements for the enhanced tier.
#[derive(Debug, Clone, Copy)]
struct OrbitalElements {
    mean_longitude: Poly,
    mean_anomaly: Poly,
    eccentricity: Poly,
}

const ENHANCED_ELEMENTS: &[(Body, OrbitalElements)] = &[
    (
        Body::Mercury,
        OrbitalElements {
            mean_longitude: Poly(252.250906, 149474.0722491, 0.00030397),
            mean_anomaly: Poly(174.7948, 149472.51529, 0.00008444),
            eccentricity: Poly(0.20563175, 0.000020406, -0.0000000284),
        },
    ),
    (
        Body::Venus,
        OrbitalElements {
            mean_longitude: Poly(181.979801, 58519.2130302, 0.00031014),
            mean_anomaly: Poly(50.4161, 58517.81539, 0.00008567),
            eccentricity: Poly(0.00677188, -0.000047766, 0.0000000975),
        },
    ),
    (
        Body::Mars,
        OrbitalElements {
            mean_longitude: Poly(355.433275, 19141.6964746, 0.00031097),
            mean_anomaly: Poly(19.3730, 19139.85475, 0.00000181),
            eccentricity: Poly(0.09340062, 0.000090483, -0.0000000806),
        },
    ),
    (
        Body::Jupiter,
        OrbitalElements {
            mean_longitude: Poly(34.351484, 3036.3027748, 0.00022330),
            mean_anomaly: Poly(20.0202, 3034.90567, -0.00000023),
            eccentricity: Poly(0.04849485, 0.000163244, -0.0000004719),
        },
    ),
    (
        Body::Saturn,
        OrbitalElements {
            mean_longitude: Poly(50.077471, 1223.5110686, 0.00051952),
            mean_anomaly: Poly(317.0207, 1222.11494, 0.00000611),
            eccentricity: Poly(0.05554814, -0.000346641, -0.0000006436),
        },
    ),
];

/// Longitude of any chart body in the requested tier.
pub fn body_longitude(jd: f64, body: Body, tier: PrecisionTier) -> f64 {
    match body {
        Body::Sun => sun_longitude(jd, tier),
        Body::Moon => moon_longitude(jd, tier),
        planet => planet_longitude(jd, planet, tier),
    }
}

/// Apparent solar longitude.
pub fn sun_longitude(jd: f64, tier: PrecisionTier) -> f64 {
    match tier {
        PrecisionTier::Basic => basic_sun_longitude(jd),
        PrecisionTier::Enhanced => enhanced_sun_longitude(jd),
    }
}

/// Lunar longitude.
pub fn moon_longitude(jd: f64, tier: PrecisionTier) -> f64 {
    match tier {
        PrecisionTier::Basic => basic_moon_longitude(jd),
        PrecisionTier::Enhanced => enhanced_moon_longitude(jd),
    }
}

/// Planet longitude. Bodies without enhanced elements (Uranus, Neptune,
/// Pluto) always use the linear model.
pub fn planet_longitude(jd: f64, planet: Body, tier: PrecisionTier) -> f64 {
    match planet {
        Body::Sun | Body::Moon => body_longitude(jd, planet, tier),
        _ => match tier {
            PrecisionTier::Basic => linear_planet_longitude(jd, planet),
            PrecisionTier::Enhanced => enhanced_planet_longitude(jd, planet).unwrap_or_else(|| {
                log::trace!("No enhanced elements for {}, using linear model", planet.id());
                linear_planet_longitude(jd, planet)
            }),
        },
    }
}

/// `(L0 + rate * (JD - J2000)) mod 360` for one planet.
pub fn linear_planet_longitude(jd: f64, planet: Body) -> f64 {
    LINEAR_ELEMENTS
        .iter()
        .find(|(body, _, _)| *body == planet)
        .map(|(_, l0, rate)| normalize_degrees(l0 + rate * days_since_j2000(jd)))
        .unwrap_or(0.0)
}

/// Mean elements plus `2e sin M + 1.25 e^2 sin 2M`. `None` when the planet
/// has no enhanced elements.
pub fn enhanced_planet_longitude(jd: f64, planet: Body) -> Option<f64> {
    let (_, elements) = ENHANCED_ELEMENTS.iter().find(|(body, _)| *body == planet)?;
    let t = centuries_since_j2000(jd);

    let mean_longitude = elements.mean_longitude.at(t);
    let m = normalize_degrees(elements.mean_anomaly.at(t)).to_radians();
    let e = elements.eccentricity.at(t);

    let center = 2.0 * e * m.sin() + 1.25 * e * e * (2.0 * m).sin();
    Some(normalize_degrees(mean_longitude + center.to_degrees()))
}

fn basic_sun_longitude(jd: f64) -> f64 {
    let n = days_since_j2000(jd);
    let mean_longitude = normalize_degrees(280.460 + 0.9856474 * n);
    let g = normalize_degrees(357.528 + 0.9856003 * n).to_radians();
    normalize_degrees(mean_longitude + 1.915 * g.sin() + 0.020 * (2.0 * g).sin())
}

fn enhanced_sun_longitude(jd: f64) -> f64 {
    let t = centuries_since_j2000(jd);
    let l0 = 280.46646 + 36000.76983 * t + 0.0003032 * t * t;
    let m = (357.52911 + 35999.05029 * t - 0.0001537 * t * t).to_radians();

    let center = (1.914602 - 0.004817 * t - 0.000014 * t * t) * m.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m).sin()
        + 0.000289 * (3.0 * m).sin();
    normalize_degrees(l0 + center)
}

fn basic_moon_longitude(jd: f64) -> f64 {
    let n = days_since_j2000(jd);
    let mean_longitude = normalize_degrees(218.316 + 13.176396 * n);
    let m = normalize_degrees(134.963 + 13.064993 * n).to_radians();
    normalize_degrees(mean_longitude + 6.289 * m.sin())
}

fn enhanced_moon_longitude(jd: f64) -> f64 {
    let t = centuries_since_j2000(jd);
    let l = 218.3164477 + 481267.88123421 * t - 0.0015786 * t * t;
    let m = (134.9633964 + 477198.8675055 * t + 0.0087414 * t * t).to_radians();
    let m_sun = 357.5291092 + 35999.0502909 * t - 0.0001536 * t * t;

    // Evection and variation arguments use the Sun's mean anomaly in place of elongation
    let d2 = 2.0 * (l - m_sun).to_radians();
    let longitude = l
        + 6.288774 * m.sin()
        + 1.274027 * (d2 - m).sin()
        + 0.658314 * d2.sin()
        + 0.213618 * (2.0 * m).sin();
    normalize_degrees(longitude)
}
