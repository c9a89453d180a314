//! Brute-force birth time rectification.
//!
//! Candidates are generated every two minutes across the window, each gets
//! a reduced sidereal chart, and the four scoring methods are combined into
//! a weighted composite. Candidates are independent, so scoring may run on
//! the rayon pool; collection keeps generation order either way.

use chrono::{DateTime, Duration, FixedOffset};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ephemeris::ayanamsa::{ayanamsa, AyanamsaSystem};
use crate::ephemeris::bodies::body_longitude;
use crate::ephemeris::houses::approximate_ascendant;
use crate::ephemeris::time::to_julian_day;
use crate::ephemeris::types::{normalize_degrees, Body, GeoLocation, PrecisionTier};
use crate::rectification::scoring::{prepare_events, score_candidate, EventContext};
use crate::rectification::types::{
    CandidateChart, Confidence, LifeEvent, RectificationCandidate, RectificationRequest,
    RectificationResult, SearchState,
};
use crate::western::signs::ZodiacSign;

/// Spacing between candidate times.
pub const CANDIDATE_STEP_SECONDS: i64 = 120;
pub const DEFAULT_WINDOW_HOURS: u32 = 4;
const MAX_ALTERNATIVES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectifierSettings {
    pub tier: PrecisionTier,
    pub ayanamsa: AyanamsaSystem,
    /// Score candidates on the rayon thread pool
    pub parallel: bool,
}

impl Default for RectifierSettings {
    fn default() -> Self {
        Self {
            tier: PrecisionTier::Enhanced,
            ayanamsa: AyanamsaSystem::Lahiri,
            parallel: true,
        }
    }
}

/// Every two minutes from `approx - window/2` to `approx + window/2`
/// inclusive. A 4-hour window yields 121 candidates. Callers bound the
/// window first; see [`crate::rectification::MAX_WINDOW_HOURS`].
pub fn generate_candidates(
    approx_time: DateTime<FixedOffset>,
    window_hours: u32,
) -> Vec<DateTime<FixedOffset>> {
    let half_window = i64::from(window_hours) * 1800;
    let steps = 2 * half_window / CANDIDATE_STEP_SECONDS;

    (0..=steps)
        .map(|i| approx_time + Duration::seconds(i * CANDIDATE_STEP_SECONDS - half_window))
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct BirthTimeRectifier {
    pub settings: RectifierSettings,
}

impl BirthTimeRectifier {
    pub fn new(settings: RectifierSettings) -> Self {
        Self { settings }
    }

    /// Sidereal Sun, Moon and Mercury through Saturn plus the approximate
    /// ascendant. No house cusps are computed.
    pub fn candidate_chart(&self, jd: f64, location: GeoLocation) -> CandidateChart {
        let offset = ayanamsa(jd, self.settings.ayanamsa);
        let bodies: BTreeMap<Body, f64> = Body::CLASSICAL
            .iter()
            .map(|&body| {
                let tropical = body_longitude(jd, body, self.settings.tier);
                (body, normalize_degrees(tropical - offset))
            })
            .collect();
        let ascendant = approximate_ascendant(jd, location.lat, location.lon);

        CandidateChart {
            julian_day: jd,
            ayanamsa_system: self.settings.ayanamsa,
            ayanamsa: offset,
            bodies,
            ascendant,
            ascendant_sign: ZodiacSign::from_longitude(ascendant),
        }
    }

    /// Run the full search. Invalid input yields a failed result carrying
    /// the error rather than a partial ranking.
    pub fn rectify(&self, request: &RectificationRequest) -> RectificationResult {
        log::debug!("Rectification state: {:?}", SearchState::ValidatingInput);
        if let Err(error) = request.validate() {
            log::warn!("Rectification rejected: {}", error);
            return RectificationResult::failed(error);
        }

        log::debug!("Rectification state: {:?}", SearchState::GeneratingCandidates);
        let candidates = generate_candidates(request.approx_time, request.time_window_hours);
        log::debug!(
            "Generated {} candidates across a {}h window",
            candidates.len(),
            request.time_window_hours
        );

        log::debug!("Rectification state: {:?}", SearchState::ScoringCandidates);
        let events = prepare_events(&request.life_events, self.settings.tier, self.settings.ayanamsa);
        let mut scored: Vec<RectificationCandidate> = if self.settings.parallel {
            candidates
                .par_iter()
                .map(|time| self.score_time(*time, request, &events))
                .collect()
        } else {
            candidates
                .iter()
                .map(|time| self.score_time(*time, request, &events))
                .collect()
        };

        log::debug!("Rectification state: {:?}", SearchState::Ranking);
        rank_candidates(&mut scored);
        let recommendations = generate_recommendations(&scored);
        let total = scored.len();

        let mut ranked = scored.into_iter();
        let best = ranked.next();
        let alternatives: Vec<RectificationCandidate> = ranked.take(MAX_ALTERNATIVES).collect();

        if let Some(best) = &best {
            log::info!(
                "Rectified to {} ({} confidence, score {:.3}) from {} candidates",
                best.candidate_timestamp,
                best.confidence,
                best.composite_score,
                total
            );
        }
        log::debug!("Rectification state: {:?}", SearchState::Done);

        RectificationResult {
            success: true,
            state: SearchState::Done,
            rectified_time: best.as_ref().map(|b| b.candidate_timestamp),
            best,
            alternatives,
            total_candidates_tested: total,
            recommendations,
            error: None,
        }
    }

    fn score_time(
        &self,
        time: DateTime<FixedOffset>,
        request: &RectificationRequest,
        events: &[EventContext],
    ) -> RectificationCandidate {
        let chart = self.candidate_chart(to_julian_day(&time), request.location);
        let scores = score_candidate(&chart, events, &request.personality);
        let composite_score = scores.composite();

        RectificationCandidate {
            candidate_timestamp: time,
            chart,
            scores,
            composite_score,
            confidence: Confidence::classify(composite_score, &scores),
        }
    }
}

/// Rectify with default settings.
pub fn rectify_birth_time(
    approx_time: DateTime<FixedOffset>,
    latitude: f64,
    longitude: f64,
    life_events: Vec<LifeEvent>,
    time_window_hours: u32,
    personality: BTreeMap<String, bool>,
) -> RectificationResult {
    let request = RectificationRequest::new(approx_time, latitude, longitude, life_events, time_window_hours)
        .with_personality(personality);
    BirthTimeRectifier::default().rectify(&request)
}

/// Stable descending sort by composite score; ties keep chronological order.
pub fn rank_candidates(candidates: &mut [RectificationCandidate]) {
    candidates.sort_by(|a, b| b.composite_score.total_cmp(&a.composite_score));
}

/// Advice derived from the ranked candidates (best first).
pub fn generate_recommendations(ranked: &[RectificationCandidate]) -> Vec<String> {
    let Some(best) = ranked.first() else {
        return Vec::new();
    };
    let mut recommendations = Vec::new();

    recommendations.push(
        match best.confidence {
            Confidence::High => "High confidence rectification. Time is likely accurate within ±2 minutes.",
            Confidence::Medium => "Moderate confidence. Consider additional life events for verification.",
            Confidence::Low => "Low confidence. More detailed life events or different approach recommended.",
        }
        .to_string(),
    );

    let score_gap = ranked
        .get(1)
        .map(|second| best.composite_score - second.composite_score)
        .unwrap_or(0.0);
    if score_gap < 0.1 {
        recommendations.push("Multiple times show similar scores. Consider narrower time window.".to_string());
    }

    let scores = &best.scores;
    if scores.dasha_events > 0.8 {
        recommendations.push("Strong dasha correlation supports this timing.".to_string());
    } else if scores.dasha_events < 0.5 {
        recommendations.push("Weak dasha correlation. Verify event dates and types.".to_string());
    }

    if scores.transit_timing > 0.7 {
        recommendations.push("Transit timing supports major life events.".to_string());
    }

    if scores.ascendant_traits > 0.8 {
        recommendations.push("Personality traits strongly match ascendant sign.".to_string());
    } else if scores.ascendant_traits < 0.4 {
        recommendations.push("Personality traits don't strongly match. Consider different ascendant.".to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::time::parse_timestamp;

    #[test]
    fn test_four_hour_window_has_121_candidates() {
        let approx = parse_timestamp("1990-06-15T14:30:00+02:00").unwrap();
        let candidates = generate_candidates(approx, 4);
        assert_eq!(candidates.len(), 121);
        assert_eq!(candidates[0], approx - Duration::hours(2));
        assert_eq!(candidates[60], approx);
        assert_eq!(candidates[120], approx + Duration::hours(2));
        assert_eq!(candidates[1] - candidates[0], Duration::minutes(2));
    }

    #[test]
    fn test_odd_and_zero_windows() {
        let approx = parse_timestamp("1990-06-15 14:30").unwrap();
        assert_eq!(generate_candidates(approx, 3).len(), 91);
        assert_eq!(generate_candidates(approx, 0), vec![approx]);
    }

    #[test]
    fn test_candidate_chart_ranges() {
        let rectifier = BirthTimeRectifier::default();
        let chart = rectifier.candidate_chart(2_448_058.0, GeoLocation { lat: 40.7, lon: -74.0 });
        assert_eq!(chart.bodies.len(), 7);
        for lon in chart.bodies.values() {
            assert!((0.0..360.0).contains(lon));
        }
        assert!((0.0..360.0).contains(&chart.ascendant));
        assert_eq!(chart.ascendant_sign, ZodiacSign::from_longitude(chart.ascendant));
    }
}
