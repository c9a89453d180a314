use approx::assert_abs_diff_eq;
use chrono::{Duration, TimeZone, Utc};
use kairos::ephemeris::{AyanamsaSystem, Body, ClosedFormEphemeris, PrecisionTier, Zodiac, J2000_JD};
use kairos::rectification::EventCategory;
use kairos::vedic::nakshatra::{nakshatra_lord, nakshatra_progress, NAKSHATRA_COUNT, NAKSHATRA_SEGMENT_SIZE};
use kairos::vedic::{
    active_period_lord, annotate_layer_nakshatras, compute_vimshottari_dasha, correlated_lords,
    find_active_period, get_nakshatra_for_longitude, DashaLevel, DashaLord,
};

const DAYS_PER_YEAR: f64 = 365.25;

#[test]
fn test_nakshatra_lords_follow_sequence() {
    for i in 0..NAKSHATRA_COUNT {
        let lon = i as f64 * NAKSHATRA_SEGMENT_SIZE + 0.01;
        assert_eq!(nakshatra_lord(lon), DashaLord::SEQUENCE[i % 9]);
        let meta = get_nakshatra_for_longitude(lon);
        assert_eq!(meta.base.index, i);
        assert_eq!(meta.pada, 1);
    }
    assert_eq!(get_nakshatra_for_longitude(-0.5).base.id, "revati");
}

#[test]
fn test_cycle_totals_120_years() {
    let total: f64 = DashaLord::SEQUENCE.iter().map(|l| l.years()).sum();
    assert_eq!(total, 120.0);
    assert_eq!(DashaLord::Mercury.next(), DashaLord::Ketu);
}

#[test]
fn test_running_lord_mid_rohini() {
    // Halfway through Rohini: 5 of the Moon's 10 years remain
    let moon = NAKSHATRA_SEGMENT_SIZE * 3.5;
    assert_abs_diff_eq!(nakshatra_progress(moon), 0.5, epsilon = 1e-12);
    assert_eq!(active_period_lord(moon, 0.0), DashaLord::Moon);
    assert_eq!(active_period_lord(moon, 4.9), DashaLord::Moon);
    assert_eq!(active_period_lord(moon, 5.5), DashaLord::Mars);
    assert_eq!(active_period_lord(moon, 12.5), DashaLord::Rahu);
    assert_eq!(active_period_lord(moon, 30.5), DashaLord::Jupiter);
}

#[test]
fn test_running_lord_repeats_every_cycle() {
    let moon = 100.0;
    for years in [17.9, 44.4, 88.8, 101.3] {
        let lord = active_period_lord(moon, years);
        assert_eq!(active_period_lord(moon, years + 120.0), lord, "{years}");
        assert_eq!(active_period_lord(moon, years + 240.0), lord, "{years}");
    }
    // Pushya (Saturn) half done leaves 9.5 years, then Mercury's 17
    assert_eq!(active_period_lord(moon, 17.9), DashaLord::Mercury);
}

#[test]
fn test_timeline_agrees_with_running_lord() {
    let birth = Utc.with_ymd_and_hms(1985, 3, 10, 6, 0, 0).unwrap();
    let moon = 100.0;
    let response = compute_vimshottari_dasha(birth, moon, DashaLevel::Mahadasha);

    assert_eq!(response.periods[0].lord, DashaLord::Saturn);
    assert_abs_diff_eq!(response.periods[0].duration_days, 9.5 * DAYS_PER_YEAR, epsilon = 1e-6);

    for period in &response.periods {
        let midpoint = period.start + (period.end - period.start) / 2;
        let years = (midpoint - birth).num_milliseconds() as f64 / (86_400_000.0 * DAYS_PER_YEAR);
        assert_eq!(active_period_lord(moon, years), period.lord);
        assert_eq!(find_active_period(&response.periods, midpoint).map(|p| p.lord), Some(period.lord));
    }
    assert!(find_active_period(&response.periods, birth - Duration::days(1)).is_none());
}

#[test]
fn test_sub_periods_partition_parent() {
    let birth = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
    let response = compute_vimshottari_dasha(birth, 200.0, DashaLevel::Pratyantardasha);
    assert_eq!(response.depth, DashaLevel::Pratyantardasha);

    for maha in &response.periods {
        assert_eq!(maha.level, DashaLevel::Mahadasha);
        assert_eq!(maha.children.len(), 9);
        assert_eq!(maha.children[0].lord, maha.lord);
        assert_eq!(maha.children[0].start, maha.start);
        let sum: f64 = maha.children.iter().map(|c| c.duration_days).sum();
        assert_abs_diff_eq!(sum, maha.duration_days, epsilon = 1e-6);

        for antar in &maha.children {
            assert_eq!(antar.level, DashaLevel::Antardasha);
            assert_eq!(antar.children.len(), 9);
            assert!(antar.children.iter().all(|p| p.level == DashaLevel::Pratyantardasha));
            assert!(antar.children.iter().all(|p| p.children.is_empty()));
        }
    }
}

#[test]
fn test_level_names() {
    assert_eq!(DashaLevel::from_name("Antar"), Some(DashaLevel::Antardasha));
    assert_eq!(DashaLevel::from_name("pratyantardasha"), Some(DashaLevel::Pratyantardasha));
    assert_eq!(DashaLevel::from_name("sookshma"), None);
}

#[test]
fn test_event_lord_correlations() {
    assert!(correlated_lords(&EventCategory::Marriage).contains(&DashaLord::Venus));
    assert!(correlated_lords(&EventCategory::Accident).contains(&DashaLord::Mars));
    assert!(correlated_lords(&EventCategory::parse("lottery")).is_empty());
}

#[test]
fn test_annotate_sidereal_layer() {
    let eph = ClosedFormEphemeris::new(PrecisionTier::Enhanced, Zodiac::Sidereal(AyanamsaSystem::Lahiri));
    let layer = eph.calc_positions(J2000_JD + 4321.0, &Body::ALL);
    let annotated = annotate_layer_nakshatras("natal", &layer);

    assert_eq!(annotated.layer_id, "natal");
    assert_eq!(annotated.placements.len(), Body::ALL.len());
    for (body, placement) in &annotated.placements {
        let lon = layer.bodies[body].longitude();
        assert_eq!(placement.lord, nakshatra_lord(lon));
        assert!((1..=4).contains(&placement.pada));
        assert!(placement.start_degree <= placement.longitude && placement.longitude < placement.end_degree);
    }
}
