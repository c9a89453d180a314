//! Civil time to Julian Day conversion.

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Timelike, Utc,
};

use crate::error::AstroError;

/// Julian Day of the J2000.0 epoch (2000-01-01T12:00:00 UTC).
pub const J2000_JD: f64 = 2_451_545.0;
pub const DAYS_PER_CENTURY: f64 = 36_525.0;
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Naive layouts accepted when the timestamp carries no UTC offset.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Convert a timestamp to Julian Day, normalizing to UTC first.
///
/// Gregorian-calendar day number plus the fractional day from the
/// hour, minute, second and sub-second parts.
pub fn to_julian_day<Tz: TimeZone>(dt: &DateTime<Tz>) -> f64 {
    let utc = dt.with_timezone(&Utc);
    let day_number = gregorian_day_number(utc.year() as i64, utc.month() as i64, utc.day() as i64);

    let seconds = utc.second() as f64 + utc.nanosecond() as f64 / 1_000_000_000.0;
    let hour_decimal = utc.hour() as f64 + utc.minute() as f64 / 60.0 + seconds / 3600.0;

    day_number as f64 + hour_decimal / 24.0 - 0.5
}

/// Julian Day at 00:00 UTC of a calendar date.
pub fn date_to_julian_day(date: NaiveDate) -> f64 {
    gregorian_day_number(date.year() as i64, date.month() as i64, date.day() as i64) as f64 - 0.5
}

/// Julian centuries since J2000.0.
pub fn centuries_since_j2000(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

/// Days since J2000.0.
pub fn days_since_j2000(jd: f64) -> f64 {
    jd - J2000_JD
}

/// Julian years since J2000.0.
pub fn years_since_j2000(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_YEAR
}

/// Parse a civil timestamp.
///
/// RFC 3339 strings keep their offset. Naive `YYYY-MM-DD HH:MM[:SS]`
/// forms (space or `T` separator) are taken as UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>, AstroError> {
    let trimmed = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt);
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(utc_offset().from_utc_datetime(&naive));
        }
    }
    Err(AstroError::InvalidTimestamp {
        value: value.to_string(),
        reason: "expected RFC 3339 or 'YYYY-MM-DD HH:MM[:SS]'".to_string(),
    })
}

/// Zero UTC offset.
pub fn utc_offset() -> FixedOffset {
    Utc.fix()
}

fn gregorian_day_number(year: i64, month: i64, day: i64) -> i64 {
    let a = (14 - month) / 12;
    let y = year + 4800 - a;
    let m = month + 12 * a - 3;
    day + (153 * m + 2) / 5 + 365 * y + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400)
        - 32045
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_j2000_epoch() {
        let epoch = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(to_julian_day(&epoch), 2_451_545.0);
        assert_eq!(centuries_since_j2000(to_julian_day(&epoch)), 0.0);
    }

    #[test]
    fn test_offset_is_normalized() {
        let local = DateTime::parse_from_rfc3339("2000-01-01T17:30:00+05:30").unwrap();
        assert_eq!(to_julian_day(&local), 2_451_545.0);
    }

    #[test]
    fn test_midnight_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(date_to_julian_day(date), 2_460_310.5);
    }

    #[test]
    fn test_parse_timestamp_forms() {
        let naive = parse_timestamp("1990-06-15 14:30").unwrap();
        assert_eq!(naive.offset().local_minus_utc(), 0);
        let seconds = parse_timestamp("1990-06-15T14:30:05").unwrap();
        assert_eq!(seconds.second(), 5);
        let offset = parse_timestamp("1990-06-15T14:30:00-04:00").unwrap();
        assert_eq!(offset.offset().local_minus_utc(), -4 * 3600);
        assert!(matches!(
            parse_timestamp("yesterday"),
            Err(AstroError::InvalidTimestamp { .. })
        ));
    }
}
