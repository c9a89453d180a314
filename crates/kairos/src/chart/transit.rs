use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::aspects::calculator::AspectCalculator;
use crate::aspects::types::{Aspect, OrbTable};
use crate::chart::data::Chart;
use crate::ephemeris::adapter::ClosedFormEphemeris;
use crate::ephemeris::time::to_julian_day;
use crate::ephemeris::types::{Body, BodyPosition, PrecisionTier};
use crate::western::signs::ZodiacSign;

/// Transiting bodies at a later instant, in the natal chart's zodiac, with
/// their aspects to the natal bodies.
#[derive(Debug, Clone, Serialize)]
pub struct TransitSnapshot {
    pub when: DateTime<FixedOffset>,
    pub julian_day: f64,
    pub tier: PrecisionTier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ayanamsa: Option<f64>,
    pub bodies: BTreeMap<Body, BodyPosition>,
    pub sun_sign: ZodiacSign,
    pub moon_sign: ZodiacSign,
    /// `body_a` is the transiting body, `body_b` the natal one
    pub aspects: Vec<Aspect>,
}

impl TransitSnapshot {
    pub fn compute(natal: &Chart, when: DateTime<FixedOffset>, tier: PrecisionTier) -> Self {
        let jd = to_julian_day(&when);
        let ephemeris = ClosedFormEphemeris::new(tier, natal.input.zodiac());
        let include: Vec<Body> = natal.bodies.keys().copied().collect();
        let transit = ephemeris.calc_positions(jd, &include);

        let aspects = AspectCalculator::new(OrbTable::standard())
            .compute_cross_aspects(&transit.longitudes(), &natal.longitudes());

        let sign_of = |body: Body| {
            transit
                .bodies
                .get(&body)
                .map(|pos| pos.sign)
                .unwrap_or_else(|| ZodiacSign::from_longitude(ephemeris.calc_body_position(jd, body).longitude()))
        };

        let sun_sign = sign_of(Body::Sun);
        let moon_sign = sign_of(Body::Moon);

        Self {
            when,
            julian_day: jd,
            tier,
            ayanamsa: transit.ayanamsa,
            sun_sign,
            moon_sign,
            bodies: transit.bodies,
            aspects,
        }
    }
}
