//! Vimshottari dasha calculations.
//!
//! Dashas are time periods ruled by planets, seeded from the Moon's
//! nakshatra at birth. The nine lords repeat in a fixed 120-year cycle.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::rectification::types::EventCategory;
use crate::vedic::nakshatra::{nakshatra_lord, nakshatra_progress};
use crate::vedic::types::DashaLord;

pub const VIMSHOTTARI_TOTAL_YEARS: f64 = 120.0;
pub const VIMSHOTTARI_YEAR_DAYS: f64 = 365.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashaLevel {
    #[default]
    Mahadasha,
    Antardasha,
    Pratyantardasha,
}

const DEPTH_LEVELS: &[DashaLevel] = &[
    DashaLevel::Mahadasha,
    DashaLevel::Antardasha,
    DashaLevel::Pratyantardasha,
];

impl DashaLevel {
    pub fn from_name(name: &str) -> Option<DashaLevel> {
        match name.trim().to_lowercase().as_str() {
            "mahadasha" | "maha" => Some(DashaLevel::Mahadasha),
            "antardasha" | "antar" => Some(DashaLevel::Antardasha),
            "pratyantardasha" | "pratyantar" => Some(DashaLevel::Pratyantardasha),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashaPeriod {
    pub lord: DashaLord,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_days: f64,
    pub level: DashaLevel,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<DashaPeriod>,
}

impl DashaPeriod {
    /// Whether `at` falls in `[start, end)`.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VimshottariResponse {
    pub depth: DashaLevel,
    pub birth_date_time: DateTime<Utc>,
    pub moon_sidereal_longitude: f64,
    pub periods: Vec<DashaPeriod>,
}

/// Lord whose mahadasha is running `years_elapsed` years after birth.
///
/// The birth lord rules for the unelapsed fraction of its period, then the
/// cycle continues in sequence and wraps indefinitely. On an exact period
/// boundary the later lord is active. Negative elapsed time resolves to the
/// birth lord.
pub fn active_period_lord(moon_sidereal_longitude: f64, years_elapsed: f64) -> DashaLord {
    let birth_lord = nakshatra_lord(moon_sidereal_longitude);
    let remaining = birth_lord.years() * (1.0 - nakshatra_progress(moon_sidereal_longitude));

    if years_elapsed <= remaining || !years_elapsed.is_finite() {
        return birth_lord;
    }

    let mut elapsed = (years_elapsed - remaining) % VIMSHOTTARI_TOTAL_YEARS;
    let mut current = birth_lord.next();
    for _ in 0..DashaLord::SEQUENCE.len() {
        if elapsed < current.years() {
            return current;
        }
        elapsed -= current.years();
        current = current.next();
    }
    // Only reachable through rounding at the very end of a cycle
    current
}

/// Period lords whose dashas are associated with an event category.
pub fn correlated_lords(category: &EventCategory) -> &'static [DashaLord] {
    match category {
        EventCategory::Marriage => &[DashaLord::Venus, DashaLord::Jupiter, DashaLord::Moon],
        EventCategory::Career => &[
            DashaLord::Sun,
            DashaLord::Jupiter,
            DashaLord::Saturn,
            DashaLord::Mercury,
        ],
        EventCategory::Education => &[DashaLord::Jupiter, DashaLord::Mercury, DashaLord::Sun],
        EventCategory::Health => &[DashaLord::Sun, DashaLord::Moon, DashaLord::Mars],
        EventCategory::Travel => &[DashaLord::Jupiter, DashaLord::Mercury, DashaLord::Moon],
        EventCategory::Property => &[DashaLord::Mars, DashaLord::Saturn, DashaLord::Moon],
        EventCategory::Children => &[DashaLord::Jupiter, DashaLord::Sun],
        EventCategory::DeathFamily => &[DashaLord::Saturn, DashaLord::Mars],
        EventCategory::Accident => &[DashaLord::Mars, DashaLord::Saturn],
        EventCategory::Spiritual => &[DashaLord::Jupiter, DashaLord::Moon],
        EventCategory::Other(_) => &[],
    }
}

/// Compute Vimshottari dasha periods from the Moon's sidereal longitude.
///
/// Returns the nine mahadashas following birth; the first is shortened by
/// the part of its nakshatra the Moon has already crossed. Sub-periods down
/// to `depth` are split in proportion to each lord's share of 120 years.
pub fn compute_vimshottari_dasha(
    birth_datetime: DateTime<Utc>,
    moon_sidereal_longitude: f64,
    depth: DashaLevel,
) -> VimshottariResponse {
    let moon_lord = nakshatra_lord(moon_sidereal_longitude);
    let progress = nakshatra_progress(moon_sidereal_longitude);
    let target_depth_index = DEPTH_LEVELS.iter().position(|&d| d == depth).unwrap_or(0);

    let mut current_start = birth_datetime;
    let mut periods: Vec<DashaPeriod> = Vec::with_capacity(DashaLord::SEQUENCE.len());
    let mut lord = moon_lord;

    for offset in 0..DashaLord::SEQUENCE.len() {
        let effective_years = if offset == 0 {
            lord.years() * (1.0 - progress)
        } else {
            lord.years()
        };

        let period = build_period(lord, current_start, effective_years, 0, target_depth_index);
        current_start = period.end;
        periods.push(period);
        lord = lord.next();
    }

    VimshottariResponse {
        depth,
        birth_date_time: birth_datetime,
        moon_sidereal_longitude,
        periods,
    }
}

/// Deepest period containing `at`, walking down through sub-periods.
pub fn find_active_period(periods: &[DashaPeriod], at: DateTime<Utc>) -> Option<&DashaPeriod> {
    let mut found = periods.iter().find(|p| p.contains(at))?;
    while let Some(child) = found.children.iter().find(|p| p.contains(at)) {
        found = child;
    }
    Some(found)
}

fn build_period(
    lord: DashaLord,
    start: DateTime<Utc>,
    duration_years: f64,
    level_index: usize,
    target_depth_index: usize,
) -> DashaPeriod {
    let duration_days = duration_years * VIMSHOTTARI_YEAR_DAYS;
    let end = start + Duration::milliseconds((duration_days * 86_400_000.0).round() as i64);
    let level = DEPTH_LEVELS[level_index.min(DEPTH_LEVELS.len() - 1)];

    let mut period = DashaPeriod {
        lord,
        start,
        end,
        duration_days,
        level,
        children: Vec::new(),
    };

    if level_index >= target_depth_index {
        return period;
    }

    let mut child_start = start;
    let mut child_lord = lord;
    for _ in 0..DashaLord::SEQUENCE.len() {
        let child_years = duration_years * (child_lord.years() / VIMSHOTTARI_TOTAL_YEARS);
        let child = build_period(
            child_lord,
            child_start,
            child_years,
            level_index + 1,
            target_depth_index,
        );
        child_start = child.end;
        period.children.push(child);
        child_lord = child_lord.next();
    }

    period
}
