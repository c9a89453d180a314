use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::western::signs::{degrees_in_sign, format_position, ZodiacSign};

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

/// Bodies carried by a chart, in canonical chart order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Body {
    pub const ALL: [Body; 10] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    /// Bodies with closed-form orbital elements in the enhanced tier.
    pub const CLASSICAL: [Body; 7] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Body::Sun => "sun",
            Body::Moon => "moon",
            Body::Mercury => "mercury",
            Body::Venus => "venus",
            Body::Mars => "mars",
            Body::Jupiter => "jupiter",
            Body::Saturn => "saturn",
            Body::Uranus => "uranus",
            Body::Neptune => "neptune",
            Body::Pluto => "pluto",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
        }
    }

    pub fn from_id(id: &str) -> Option<Body> {
        let id = id.trim().to_lowercase();
        Body::ALL.iter().copied().find(|b| b.id() == id)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which closed-form model produced a set of positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrecisionTier {
    /// Linear mean-motion planets and single-term Sun/Moon corrections.
    Basic,
    /// Polynomial mean elements with equation-of-center corrections.
    #[default]
    Enhanced,
}

impl PrecisionTier {
    /// Parse a tier name, falling back to `Enhanced` for unknown names.
    pub fn parse_or_default(name: &str) -> PrecisionTier {
        match name.trim().to_lowercase().as_str() {
            "basic" | "standard" => PrecisionTier::Basic,
            "enhanced" | "high" => PrecisionTier::Enhanced,
            other => {
                log::warn!("Unknown precision tier '{}', using enhanced", other);
                PrecisionTier::Enhanced
            }
        }
    }
}

/// House system selector.
///
/// All three systems are deliberately simplified: cusps are derived from the
/// local sidereal time rather than a spherical-trigonometry ascendant, and
/// `PlacidusApprox` only adds a small latitude-dependent wobble to equal
/// houses. It is not iterative Placidus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HouseSystem {
    #[serde(rename = "equal")]
    Equal,
    #[serde(rename = "whole")]
    WholeSign,
    #[default]
    #[serde(rename = "placidus")]
    PlacidusApprox,
}

/// House system mapping
const HOUSE_SYSTEMS: &[(&str, HouseSystem)] = &[
    ("placidus", HouseSystem::PlacidusApprox),
    ("placidus-approx", HouseSystem::PlacidusApprox),
    ("placidus_approx", HouseSystem::PlacidusApprox),
    ("koch", HouseSystem::PlacidusApprox),
    ("equal", HouseSystem::Equal),
    ("whole", HouseSystem::WholeSign),
    ("whole_sign", HouseSystem::WholeSign),
    ("whole-sign", HouseSystem::WholeSign),
];

impl HouseSystem {
    /// Parse a house system name, falling back to the Placidus approximation.
    pub fn parse_or_default(name: &str) -> HouseSystem {
        let key = name.trim().to_lowercase();
        HOUSE_SYSTEMS
            .iter()
            .find(|(n, _)| *n == key)
            .map(|(_, system)| *system)
            .unwrap_or_else(|| {
                log::warn!("Unknown house system '{}', using placidus approximation", name);
                HouseSystem::PlacidusApprox
            })
    }

    pub fn display_name(self) -> &'static str {
        match self {
            HouseSystem::Equal => "Equal House",
            HouseSystem::WholeSign => "Whole Sign",
            HouseSystem::PlacidusApprox => "Placidus",
        }
    }
}

/// Position of one body, derived fresh for every calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    pub body: Body,
    /// Tropical ecliptic longitude in degrees [0, 360)
    pub tropical_longitude: f64,
    /// Sidereal longitude, present only when an ayanamsa is selected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidereal_longitude: Option<f64>,
    pub sign: ZodiacSign,
    pub degrees_in_sign: f64,
}

impl BodyPosition {
    /// Build a position; sign placement follows the sidereal longitude when given.
    pub fn new(body: Body, tropical_longitude: f64, sidereal_longitude: Option<f64>) -> Self {
        let effective = sidereal_longitude.unwrap_or(tropical_longitude);
        Self {
            body,
            tropical_longitude,
            sidereal_longitude,
            sign: ZodiacSign::from_longitude(effective),
            degrees_in_sign: degrees_in_sign(effective),
        }
    }

    /// Longitude in the chart's zodiac (sidereal if selected, else tropical).
    pub fn longitude(&self) -> f64 {
        self.sidereal_longitude.unwrap_or(self.tropical_longitude)
    }

    pub fn formatted(&self) -> String {
        format_position(self.longitude())
    }
}

/// One house cusp. House 1 is the ascendant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseCusp {
    pub house: u8,
    pub longitude: f64,
    pub sign: ZodiacSign,
    pub degrees_in_sign: f64,
}

impl HouseCusp {
    pub fn new(house: u8, longitude: f64) -> Self {
        Self {
            house,
            longitude,
            sign: ZodiacSign::from_longitude(longitude),
            degrees_in_sign: degrees_in_sign(longitude),
        }
    }

    pub fn formatted(&self) -> String {
        format!("House {}: {}", self.house, format_position(self.longitude))
    }
}

/// House system positions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HousePositions {
    pub system: HouseSystem,
    /// Local sidereal time in degrees used to derive the cusps
    pub local_sidereal_time: f64,
    /// Exactly 12 cusps, houses 1..=12 in order
    pub cusps: Vec<HouseCusp>,
}

impl HousePositions {
    pub fn ascendant(&self) -> &HouseCusp {
        &self.cusps[0]
    }
}

/// Complete body position data for one instant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerPositions {
    pub julian_day: f64,
    pub tier: PrecisionTier,
    /// Ayanamsa in degrees when positions were converted to sidereal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ayanamsa: Option<f64>,
    pub bodies: BTreeMap<Body, BodyPosition>,
}

impl LayerPositions {
    /// Longitudes in the layer's zodiac, keyed by body.
    pub fn longitudes(&self) -> BTreeMap<Body, f64> {
        self.bodies
            .iter()
            .map(|(body, pos)| (*body, pos.longitude()))
            .collect()
    }
}

/// Normalize degrees to [0, 360).
pub fn normalize_degrees(value: f64) -> f64 {
    let normalized = value.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}
