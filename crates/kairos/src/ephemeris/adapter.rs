use std::collections::BTreeMap;

use crate::ephemeris::ayanamsa::{ayanamsa, Zodiac};
use crate::ephemeris::bodies::body_longitude;
use crate::ephemeris::houses::compute_houses;
use crate::ephemeris::types::{
    normalize_degrees, Body, BodyPosition, GeoLocation, HousePositions, HouseSystem,
    LayerPositions, PrecisionTier,
};

/// Closed-form ephemeris: positions from truncated series, no data files.
///
/// Holds only the selected tier and zodiac, so one instance can be shared
/// freely between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClosedFormEphemeris {
    pub tier: PrecisionTier,
    pub zodiac: Zodiac,
}

impl ClosedFormEphemeris {
    pub fn new(tier: PrecisionTier, zodiac: Zodiac) -> Self {
        Self { tier, zodiac }
    }

    /// Ayanamsa in degrees at `jd`, or `None` for a tropical zodiac.
    pub fn ayanamsa_at(&self, jd: f64) -> Option<f64> {
        self.zodiac.ayanamsa_system().map(|system| ayanamsa(jd, system))
    }

    /// Calculate positions for the requested bodies at one instant
    pub fn calc_positions(&self, jd: f64, include: &[Body]) -> LayerPositions {
        let offset = self.ayanamsa_at(jd);
        let bodies: BTreeMap<Body, BodyPosition> = include
            .iter()
            .map(|&body| (body, self.position_with_offset(jd, body, offset)))
            .collect();

        LayerPositions {
            julian_day: jd,
            tier: self.tier,
            ayanamsa: offset,
            bodies,
        }
    }

    /// Calculate position for a single body
    pub fn calc_body_position(&self, jd: f64, body: Body) -> BodyPosition {
        self.position_with_offset(jd, body, self.ayanamsa_at(jd))
    }

    /// Calculate house cusps in this ephemeris' zodiac
    pub fn calc_houses(&self, jd: f64, location: GeoLocation, system: HouseSystem) -> HousePositions {
        compute_houses(jd, location.lat, location.lon, system, self.ayanamsa_at(jd))
    }

    fn position_with_offset(&self, jd: f64, body: Body, offset: Option<f64>) -> BodyPosition {
        let tropical = body_longitude(jd, body, self.tier);
        let sidereal = offset.map(|value| normalize_degrees(tropical - value));
        BodyPosition::new(body, tropical, sidereal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::ayanamsa::AyanamsaSystem;
    use crate::ephemeris::time::J2000_JD;

    #[test]
    fn test_tropical_layer_has_no_sidereal_values() {
        let eph = ClosedFormEphemeris::new(PrecisionTier::Enhanced, Zodiac::Tropical);
        let layer = eph.calc_positions(J2000_JD, &Body::ALL);
        assert_eq!(layer.bodies.len(), 10);
        assert!(layer.ayanamsa.is_none());
        assert!(layer.bodies.values().all(|p| p.sidereal_longitude.is_none()));
    }

    #[test]
    fn test_sidereal_layer_round_trips() {
        let eph = ClosedFormEphemeris::new(
            PrecisionTier::Basic,
            Zodiac::Sidereal(AyanamsaSystem::Lahiri),
        );
        let jd = J2000_JD + 8000.25;
        let layer = eph.calc_positions(jd, &Body::CLASSICAL);
        let offset = layer.ayanamsa.unwrap();
        for pos in layer.bodies.values() {
            let sidereal = pos.sidereal_longitude.unwrap();
            let back = normalize_degrees(sidereal + offset);
            let mut diff = (back - pos.tropical_longitude).abs();
            if diff > 180.0 {
                diff = 360.0 - diff;
            }
            assert!(diff < 1e-9);
        }
    }
}
