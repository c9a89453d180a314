//! Scoring of one candidate chart against life events.
//!
//! Every method returns a value in [0, 1]. With no events (or no
//! personality flags for the trait method) a method returns a neutral 0.5.

use std::collections::BTreeMap;

use crate::aspects::calculator::angular_separation;
use crate::aspects::types::AspectType;
use crate::ephemeris::ayanamsa::{tropical_to_sidereal, AyanamsaSystem};
use crate::ephemeris::bodies::planet_longitude;
use crate::ephemeris::time::{date_to_julian_day, DAYS_PER_YEAR};
use crate::ephemeris::types::{Body, PrecisionTier};
use crate::rectification::types::{CandidateChart, EventCategory, LifeEvent, MethodScores};
use crate::vedic::dashas::{active_period_lord, correlated_lords};
use crate::western::signs::ZodiacSign;

pub const NEUTRAL_SCORE: f64 = 0.5;
/// Orb for transit-to-natal aspects.
pub const TRANSIT_ORB: f64 = 2.0;
const JUPITER_HIT: f64 = 0.3;
const SATURN_HIT: f64 = 0.25;

/// A life event with the values every candidate needs, computed once.
#[derive(Debug, Clone)]
pub struct EventContext {
    pub event: LifeEvent,
    /// Julian Day at 00:00 UTC on the event date
    pub julian_day: f64,
    pub jupiter_sidereal: f64,
    pub saturn_sidereal: f64,
}

impl EventContext {
    pub fn prepare(event: &LifeEvent, tier: PrecisionTier, ayanamsa_system: AyanamsaSystem) -> Self {
        let jd = date_to_julian_day(event.event_date);
        let sidereal = |body| tropical_to_sidereal(planet_longitude(jd, body, tier), jd, ayanamsa_system);
        Self {
            event: event.clone(),
            julian_day: jd,
            jupiter_sidereal: sidereal(Body::Jupiter),
            saturn_sidereal: sidereal(Body::Saturn),
        }
    }
}

pub fn prepare_events(
    events: &[LifeEvent],
    tier: PrecisionTier,
    ayanamsa_system: AyanamsaSystem,
) -> Vec<EventContext> {
    events
        .iter()
        .map(|event| EventContext::prepare(event, tier, ayanamsa_system))
        .collect()
}

/// Whether two longitudes are within `orb` of any of the five major aspects.
pub fn is_major_aspect(lon1: f64, lon2: f64, orb: f64) -> bool {
    let separation = angular_separation(lon1, lon2);
    AspectType::ALL
        .iter()
        .any(|aspect| (separation - aspect.angle()).abs() <= orb)
}

/// Correlate the running mahadasha at each event with the event category.
pub fn score_dasha_events(chart: &CandidateChart, events: &[EventContext]) -> f64 {
    average(events, |ctx| {
        let years_elapsed = (ctx.julian_day - chart.julian_day) / DAYS_PER_YEAR;
        let running = active_period_lord(chart.moon_longitude(), years_elapsed);

        match &ctx.event.event_type {
            EventCategory::Other(_) => NEUTRAL_SCORE,
            category if correlated_lords(category).contains(&running) => {
                0.8 + ctx.event.importance * 0.2
            }
            _ => 0.3,
        }
    })
}

/// Credit transiting Jupiter (and Saturn) aspects to natal points at each
/// event. Jupiter checks the Sun, Moon and ascendant; Saturn the Sun and
/// Moon. Each event is capped at 1.0.
pub fn score_transit_timing(chart: &CandidateChart, events: &[EventContext]) -> f64 {
    let sun = chart.body(Body::Sun);
    let moon = chart.moon_longitude();

    average(events, |ctx| {
        let category = &ctx.event.event_type;
        let mut score = 0.0;

        if category.is_jupiter_favorable() {
            let hits = [sun, moon, chart.ascendant]
                .iter()
                .filter(|&&natal| is_major_aspect(ctx.jupiter_sidereal, natal, TRANSIT_ORB))
                .count();
            score += JUPITER_HIT * hits as f64;
        }
        if category.is_saturn_challenging() {
            let hits = [sun, moon]
                .iter()
                .filter(|&&natal| is_major_aspect(ctx.saturn_sidereal, natal, TRANSIT_ORB))
                .count();
            score += SATURN_HIT * hits as f64;
        }
        f64::min(score, 1.0)
    })
}

/// Trait keywords expected for each ascendant sign.
pub fn sign_traits(sign: ZodiacSign) -> &'static [&'static str] {
    match sign {
        ZodiacSign::Aries => &["energetic", "impulsive", "leadership", "athletic", "direct"],
        ZodiacSign::Taurus => &["stable", "practical", "stubborn", "artistic", "patient"],
        ZodiacSign::Gemini => &["communicative", "versatile", "curious", "restless", "witty"],
        ZodiacSign::Cancer => &["emotional", "nurturing", "moody", "protective", "intuitive"],
        ZodiacSign::Leo => &["confident", "dramatic", "generous", "prideful", "creative"],
        ZodiacSign::Virgo => &["analytical", "perfectionist", "helpful", "critical", "precise"],
        ZodiacSign::Libra => &["diplomatic", "charming", "indecisive", "harmonious", "social"],
        ZodiacSign::Scorpio => &["intense", "mysterious", "passionate", "secretive", "transformative"],
        ZodiacSign::Sagittarius => &["adventurous", "philosophical", "optimistic", "direct", "freedom_loving"],
        ZodiacSign::Capricorn => &["ambitious", "disciplined", "serious", "responsible", "structured"],
        ZodiacSign::Aquarius => &["innovative", "eccentric", "humanitarian", "detached", "progressive"],
        ZodiacSign::Pisces => &["intuitive", "dreamy", "compassionate", "sensitive", "artistic"],
    }
}

/// Match personality flags against the ascendant sign's trait keywords.
///
/// Listed trait: +1 when present, -0.5 when absent. Unlisted trait: +0.2
/// when absent, nothing when present. Normalized with `(sum/n + 1) / 2`.
pub fn score_ascendant_traits(ascendant_sign: ZodiacSign, personality: &BTreeMap<String, bool>) -> f64 {
    if personality.is_empty() {
        return NEUTRAL_SCORE;
    }

    let expected = sign_traits(ascendant_sign);
    let total: f64 = personality
        .iter()
        .map(|(trait_name, &has_trait)| {
            let listed = expected.contains(&trait_name.trim().to_lowercase().as_str());
            match (listed, has_trait) {
                (true, true) => 1.0,
                (true, false) => -0.5,
                (false, false) => 0.2,
                (false, true) => 0.0,
            }
        })
        .sum();

    ((total / personality.len() as f64 + 1.0) / 2.0).clamp(0.0, 1.0)
}

/// Placeholder house correlation: 0.6 for categories with a house mapping,
/// 0.4 otherwise. Cusps are not consulted.
pub fn score_house_events(events: &[EventContext]) -> f64 {
    average(events, |ctx| {
        if ctx.event.event_type.correlated_houses().is_empty() {
            0.4
        } else {
            0.6
        }
    })
}

/// All four method scores for one candidate.
pub fn score_candidate(
    chart: &CandidateChart,
    events: &[EventContext],
    personality: &BTreeMap<String, bool>,
) -> MethodScores {
    MethodScores {
        dasha_events: score_dasha_events(chart, events),
        transit_timing: score_transit_timing(chart, events),
        ascendant_traits: score_ascendant_traits(chart.ascendant_sign, personality),
        house_events: score_house_events(events),
    }
}

fn average<F>(events: &[EventContext], score: F) -> f64
where
    F: Fn(&EventContext) -> f64,
{
    if events.is_empty() {
        return NEUTRAL_SCORE;
    }
    events.iter().map(score).sum::<f64>() / events.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn context(category: EventCategory, jd: f64, jupiter: f64, saturn: f64) -> EventContext {
        EventContext {
            event: LifeEvent::new(NaiveDate::from_ymd_opt(2010, 1, 1).unwrap(), category),
            julian_day: jd,
            jupiter_sidereal: jupiter,
            saturn_sidereal: saturn,
        }
    }

    fn chart(moon: f64, sun: f64, ascendant: f64) -> CandidateChart {
        CandidateChart {
            julian_day: 2_447_000.5,
            ayanamsa_system: AyanamsaSystem::Lahiri,
            ayanamsa: 23.7,
            bodies: BTreeMap::from([(Body::Sun, sun), (Body::Moon, moon)]),
            ascendant,
            ascendant_sign: ZodiacSign::from_longitude(ascendant),
        }
    }

    #[test]
    fn test_major_aspect_orb() {
        assert!(is_major_aspect(10.0, 71.9, 2.0));
        assert!(!is_major_aspect(10.0, 72.1, 2.0));
        assert!(is_major_aspect(359.0, 1.0, 2.0));
    }

    #[test]
    fn test_dasha_score_correlated_and_not() {
        // Moon at 0°: Ketu runs for the first 7 years
        let c = chart(0.0, 100.0, 200.0);
        let soon = c.julian_day + 365.25;
        let uncorrelated = [context(EventCategory::Accident, soon, 0.0, 0.0)];
        assert!((score_dasha_events(&c, &uncorrelated) - 0.3).abs() < 1e-12);

        // Venus runs from year 7 to 27
        let later = c.julian_day + 10.0 * 365.25;
        let marriage = [context(EventCategory::Marriage, later, 0.0, 0.0)];
        assert!((score_dasha_events(&c, &marriage) - (0.8 + 0.7 * 0.2)).abs() < 1e-12);

        let other = [context(EventCategory::parse("lottery"), later, 0.0, 0.0)];
        assert_eq!(score_dasha_events(&c, &other), NEUTRAL_SCORE);
    }

    #[test]
    fn test_transit_hits_and_cap() {
        let c = chart(100.0, 40.0, 160.0);
        let career = [context(EventCategory::Career, c.julian_day, 40.0, 220.0)];
        // Jupiter: Sun 0, Moon 60, ascendant 120 -> 0.9; Saturn: Sun 180, Moon 120 -> 0.5
        assert_eq!(score_transit_timing(&c, &career), 1.0);

        let travel = [context(EventCategory::Travel, c.julian_day, 40.0, 220.0)];
        assert_eq!(score_transit_timing(&c, &travel), 0.0);
        assert_eq!(score_transit_timing(&c, &[]), NEUTRAL_SCORE);
    }

    #[test]
    fn test_ascendant_traits() {
        let none = BTreeMap::new();
        assert_eq!(score_ascendant_traits(ZodiacSign::Aries, &none), NEUTRAL_SCORE);

        let flags = BTreeMap::from([
            ("energetic".to_string(), true),
            ("leadership".to_string(), true),
        ]);
        assert_eq!(score_ascendant_traits(ZodiacSign::Aries, &flags), 1.0);

        let mixed = BTreeMap::from([
            ("energetic".to_string(), false),
            ("shy".to_string(), false),
        ]);
        // (-0.5 + 0.2) / 2 = -0.15 -> (0.85) / 2
        let score = score_ascendant_traits(ZodiacSign::Aries, &mixed);
        assert!((score - 0.425).abs() < 1e-12);
    }

    #[test]
    fn test_house_events() {
        let events = [
            context(EventCategory::Marriage, 0.0, 0.0, 0.0),
            context(EventCategory::Accident, 0.0, 0.0, 0.0),
        ];
        assert!((score_house_events(&events) - 0.5).abs() < 1e-12);
        assert_eq!(score_house_events(&[]), NEUTRAL_SCORE);
    }
}
