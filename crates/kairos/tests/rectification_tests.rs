use chrono::{DateTime, FixedOffset, NaiveDate};
use kairos::ephemeris::{parse_timestamp, AyanamsaSystem, PrecisionTier};
use kairos::rectification::{
    rectify_birth_time, score_ascendant_traits, BirthTimeRectifier, EventCategory, LifeEvent,
    RectificationRequest, RectificationResult, RectifierSettings, SearchState, MAX_WINDOW_HOURS,
};
use kairos::{AstroError, ZodiacSign};
use std::collections::BTreeMap;

fn event(y: i32, m: u32, d: u32, kind: &str) -> LifeEvent {
    LifeEvent::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), EventCategory::parse(kind))
}

fn sample_events() -> Vec<LifeEvent> {
    vec![
        event(2008, 9, 1, "education"),
        event(2014, 6, 21, "marriage").with_importance(0.9),
        event(2016, 2, 3, "career"),
        event(2019, 11, 12, "property").with_importance(0.5),
    ]
}

fn sample_request() -> RectificationRequest {
    let approx = parse_timestamp("1990-06-15T14:30:00+02:00").unwrap();
    RectificationRequest::new(approx, 52.52, 13.405, sample_events(), 4)
        .with_personality(BTreeMap::from([
            ("energetic".to_string(), true),
            ("patient".to_string(), false),
            ("curious".to_string(), true),
        ]))
}

fn serial() -> BirthTimeRectifier {
    BirthTimeRectifier::new(RectifierSettings {
        parallel: false,
        ..RectifierSettings::default()
    })
}

#[test]
fn test_too_few_events_fails() {
    let approx = parse_timestamp("1990-06-15 14:30").unwrap();
    let events = sample_events().into_iter().take(2).collect();
    let result = rectify_birth_time(approx, 40.0, -74.0, events, 4, BTreeMap::new());

    assert!(!result.success);
    assert_eq!(result.state, SearchState::Failed);
    assert!(result.best.is_none());
    assert!(result.rectified_time.is_none());
    assert_eq!(result.total_candidates_tested, 0);
    assert_eq!(
        result.error,
        Some(AstroError::InsufficientEvents {
            required: 3,
            provided: 2
        })
    );
    assert_eq!(
        result.recommendations,
        vec!["Please provide at least 3 significant life events".to_string()]
    );

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["error"]["kind"], "insufficient_events");
    assert_eq!(json["success"], false);
}

#[test]
fn test_invalid_importance_and_location_fail() {
    let mut request = sample_request();
    request.life_events[1].importance = 1.5;
    let result = serial().rectify(&request);
    assert!(!result.success);
    assert_eq!(
        result.error,
        Some(AstroError::InvalidImportance {
            index: 1,
            value: 1.5
        })
    );
    assert!(result.recommendations.is_empty());

    let mut request = sample_request();
    request.location.lat = 95.0;
    let result = serial().rectify(&request);
    assert_eq!(result.error.map(|e| e.field()), Some("latitude"));
}

#[test]
fn test_oversized_window_is_rejected() {
    let mut request = sample_request();
    request.time_window_hours = u32::MAX;
    assert_eq!(
        request.validate(),
        Err(AstroError::InvalidTimeWindow {
            hours: u32::MAX,
            max: MAX_WINDOW_HOURS
        })
    );

    let result = serial().rectify(&request);
    assert!(!result.success);
    assert_eq!(result.total_candidates_tested, 0);
    assert_eq!(result.error.as_ref().map(|e| e.field()), Some("time_window_hours"));
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["error"]["kind"], "invalid_time_window");

    request.time_window_hours = MAX_WINDOW_HOURS;
    assert!(request.validate().is_ok());
}

#[test]
fn test_four_hour_search() {
    let request = sample_request();
    let result = serial().rectify(&request);

    assert!(result.success);
    assert_eq!(result.state, SearchState::Done);
    assert!(result.error.is_none());
    assert_eq!(result.total_candidates_tested, 121);
    assert_eq!(result.alternatives.len(), 3);

    let best = result.best.as_ref().unwrap();
    assert_eq!(result.rectified_time, Some(best.candidate_timestamp));
    assert!((best.candidate_timestamp - request.approx_time).num_seconds().abs() <= 7200);
    assert_eq!(best.chart.ayanamsa_system, AyanamsaSystem::Lahiri);

    let mut previous = best.composite_score;
    for alt in &result.alternatives {
        assert!(alt.composite_score <= previous);
        previous = alt.composite_score;
    }

    for candidate in std::iter::once(best).chain(result.alternatives.iter()) {
        for score in candidate.scores.as_array() {
            assert!((0.0..=1.0).contains(&score), "{score}");
        }
        // Every event category here has a house mapping
        assert!((candidate.scores.house_events - 0.6).abs() < 1e-12);
        assert!((candidate.composite_score - candidate.scores.composite()).abs() < 1e-12);
    }

    let first = &result.recommendations[0];
    assert!(
        first.starts_with("High confidence")
            || first.starts_with("Moderate confidence")
            || first.starts_with("Low confidence"),
        "{first}"
    );
}

fn ranking(result: &RectificationResult) -> Vec<(DateTime<FixedOffset>, f64)> {
    result
        .best
        .iter()
        .chain(result.alternatives.iter())
        .map(|c| (c.candidate_timestamp, c.composite_score))
        .collect()
}

#[test]
fn test_parallel_matches_serial() {
    let request = sample_request();
    let parallel = BirthTimeRectifier::default().rectify(&request);
    let serial = serial().rectify(&request);

    assert_eq!(parallel.rectified_time, serial.rectified_time);
    assert_eq!(parallel.recommendations, serial.recommendations);
    assert_eq!(ranking(&parallel), ranking(&serial));
}

#[test]
fn test_zero_window_scores_only_the_estimate() {
    let mut request = sample_request();
    request.time_window_hours = 0;
    let result = serial().rectify(&request);

    assert_eq!(result.total_candidates_tested, 1);
    assert_eq!(result.rectified_time, Some(request.approx_time));
    assert!(result.alternatives.is_empty());
    assert!(result
        .recommendations
        .contains(&"Multiple times show similar scores. Consider narrower time window.".to_string()));
}

#[test]
fn test_unknown_events_score_neutrally() {
    let approx = parse_timestamp("1975-01-20 08:00").unwrap();
    let events = vec![
        event(1995, 5, 5, "lottery"),
        event(2001, 8, 8, "moving_abroad"),
        event(2010, 3, 3, "reunion"),
    ];
    let rectifier = BirthTimeRectifier::new(RectifierSettings {
        tier: PrecisionTier::Basic,
        ayanamsa: AyanamsaSystem::Raman,
        parallel: false,
    });
    let result = rectifier.rectify(&RectificationRequest::new(approx, -33.87, 151.21, events, 2));

    assert_eq!(result.total_candidates_tested, 61);
    let best = result.best.unwrap();
    assert_eq!(best.scores.dasha_events, 0.5);
    assert_eq!(best.scores.transit_timing, 0.0);
    assert!((best.scores.house_events - 0.4).abs() < 1e-12);
    assert_eq!(best.scores.ascendant_traits, 0.5);
    assert!(result
        .recommendations
        .contains(&"Multiple times show similar scores. Consider narrower time window.".to_string()));
}

#[test]
fn test_trait_scoring_by_sign() {
    let traits = BTreeMap::from([("energetic".to_string(), true)]);
    assert_eq!(score_ascendant_traits(ZodiacSign::Aries, &traits), 1.0);
    assert_eq!(score_ascendant_traits(ZodiacSign::Taurus, &traits), 0.5);
    assert_eq!(score_ascendant_traits(ZodiacSign::Taurus, &BTreeMap::new()), 0.5);
}
