use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::aspects::types::{Aspect, OrbPreset};
use crate::ephemeris::ayanamsa::{format_ayanamsa, tropical_to_sidereal, AyanamsaSystem, Zodiac};
use crate::ephemeris::time::{parse_timestamp, to_julian_day};
use crate::ephemeris::types::{
    Body, BodyPosition, GeoLocation, HousePositions, HouseSystem, LayerPositions, PrecisionTier,
};
use crate::error::{validate_coordinates, AstroError};
use crate::vedic::dashas::{compute_vimshottari_dasha, DashaLevel, VimshottariResponse};
use crate::western::signs::ZodiacSign;

/// Validated birth data. Fields are private so a constructed value is
/// always in range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BirthInput {
    timestamp: DateTime<FixedOffset>,
    location: GeoLocation,
    house_system: HouseSystem,
    zodiac: Zodiac,
}

impl BirthInput {
    pub fn new(
        timestamp: DateTime<FixedOffset>,
        latitude: f64,
        longitude: f64,
        house_system: HouseSystem,
        zodiac: Zodiac,
    ) -> Result<Self, AstroError> {
        validate_coordinates(latitude, longitude)?;
        Ok(Self {
            timestamp,
            location: GeoLocation {
                lat: latitude,
                lon: longitude,
            },
            house_system,
            zodiac,
        })
    }

    /// Build from loosely typed input. The timestamp must parse; unknown
    /// house system or ayanamsa names fall back to their defaults.
    pub fn parse(
        timestamp: &str,
        latitude: f64,
        longitude: f64,
        house_system: &str,
        ayanamsa: &str,
    ) -> Result<Self, AstroError> {
        let timestamp = parse_timestamp(timestamp)?;
        Self::new(
            timestamp,
            latitude,
            longitude,
            HouseSystem::parse_or_default(house_system),
            Zodiac::parse_or_default(ayanamsa),
        )
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn location(&self) -> GeoLocation {
        self.location
    }

    pub fn latitude(&self) -> f64 {
        self.location.lat
    }

    pub fn longitude(&self) -> f64 {
        self.location.lon
    }

    pub fn house_system(&self) -> HouseSystem {
        self.house_system
    }

    pub fn zodiac(&self) -> Zodiac {
        self.zodiac
    }

    pub fn julian_day(&self) -> f64 {
        to_julian_day(&self.timestamp)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartSummary {
    pub sun_sign: ZodiacSign,
    pub moon_sign: ZodiacSign,
    pub ascendant_sign: ZodiacSign,
}

/// A complete birth chart, tagged with the precision tier that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    pub input: BirthInput,
    pub julian_day: f64,
    pub tier: PrecisionTier,
    /// Ayanamsa in degrees for sidereal charts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ayanamsa: Option<f64>,
    pub orb_preset: OrbPreset,
    pub bodies: BTreeMap<Body, BodyPosition>,
    pub houses: HousePositions,
    pub aspects: Vec<Aspect>,
    pub summary: ChartSummary,
}

impl Chart {
    pub fn body(&self, body: Body) -> Option<&BodyPosition> {
        self.bodies.get(&body)
    }

    /// Longitudes in the chart's zodiac.
    pub fn longitudes(&self) -> BTreeMap<Body, f64> {
        self.bodies
            .iter()
            .map(|(body, pos)| (*body, pos.longitude()))
            .collect()
    }

    /// The chart's bodies as a position layer.
    pub fn positions(&self) -> LayerPositions {
        LayerPositions {
            julian_day: self.julian_day,
            tier: self.tier,
            ayanamsa: self.ayanamsa,
            bodies: self.bodies.clone(),
        }
    }

    pub fn ascendant(&self) -> f64 {
        self.houses.ascendant().longitude
    }

    pub fn formatted_ayanamsa(&self) -> Option<String> {
        self.ayanamsa.map(format_ayanamsa)
    }

    /// Sidereal Moon longitude; tropical charts are converted with Lahiri.
    pub fn moon_sidereal_longitude(&self) -> f64 {
        let moon = self.body(Body::Moon);
        match moon.and_then(|pos| pos.sidereal_longitude) {
            Some(sidereal) => sidereal,
            None => {
                let tropical = moon.map(|pos| pos.tropical_longitude).unwrap_or(0.0);
                tropical_to_sidereal(tropical, self.julian_day, AyanamsaSystem::Lahiri)
            }
        }
    }

    /// Vimshottari timeline from birth, seeded by the sidereal Moon.
    pub fn vimshottari(&self, depth: DashaLevel) -> VimshottariResponse {
        compute_vimshottari_dasha(
            self.input.timestamp().with_timezone(&Utc),
            self.moon_sidereal_longitude(),
            depth,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_birth_input_validation() {
        let err = BirthInput::parse("1990-06-15 14:30", 91.0, 0.0, "equal", "tropical").unwrap_err();
        assert_eq!(err.field(), "latitude");

        let err = BirthInput::parse("1990-06-15 14:30", 0.0, -180.5, "equal", "tropical").unwrap_err();
        assert_eq!(err.field(), "longitude");

        let err = BirthInput::parse("June 15th", 0.0, 0.0, "equal", "tropical").unwrap_err();
        assert_eq!(err.field(), "timestamp");
    }

    #[test]
    fn test_unknown_identifiers_fall_back() {
        let input = BirthInput::parse("1990-06-15 14:30", 51.5, -0.1, "regiomontanus", "mystery").unwrap();
        assert_eq!(input.house_system(), HouseSystem::PlacidusApprox);
        assert_eq!(input.zodiac(), Zodiac::Sidereal(AyanamsaSystem::Lahiri));
    }
}
