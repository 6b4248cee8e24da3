//! UTC+7 civil calendar helpers.
//!
//! Every date the app shows or stores is interpreted in a fixed UTC+7
//! wall clock, regardless of the host machine's local timezone. Vietnam
//! has no daylight saving, so the offset is a constant and no timezone
//! database is consulted.

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Timelike, Utc,
};

const UTC_PLUS_7_SECS: i32 = 7 * 3600;

/// The fixed +07:00 offset.
pub fn offset() -> FixedOffset {
    FixedOffset::east_opt(UTC_PLUS_7_SECS).unwrap()
}

/// Current instant as a UTC+7 wall clock.
pub fn now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&offset())
}

/// Reinterpret an arbitrary instant in UTC+7.
pub fn to_zoned<Tz: TimeZone>(instant: &DateTime<Tz>) -> DateTime<FixedOffset> {
    instant.with_timezone(&offset())
}

/// Civil fields of an instant in the UTC+7 calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilComponents {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

pub fn components<Tz: TimeZone>(instant: &DateTime<Tz>) -> CivilComponents {
    let zoned = to_zoned(instant);
    CivilComponents {
        year: zoned.year(),
        month: zoned.month(),
        day: zoned.day(),
        hour: zoned.hour(),
        minute: zoned.minute(),
        second: zoned.second(),
    }
}

/// Construct an instant from UTC+7 civil fields.
/// Returns `None` when any field is out of range.
pub fn from_components(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    millisecond: u32,
) -> Option<DateTime<FixedOffset>> {
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = NaiveTime::from_hms_milli_opt(hour, minute, second, millisecond)?;
    offset().from_local_datetime(&date.and_time(time)).single()
}

/// `YYYY-MM-DD` in the UTC+7 calendar.
pub fn format_iso_date<Tz: TimeZone>(instant: &DateTime<Tz>) -> String {
    to_zoned(instant).format("%Y-%m-%d").to_string()
}

/// The UTC+7 civil date an instant falls on.
pub fn civil_date<Tz: TimeZone>(instant: &DateTime<Tz>) -> NaiveDate {
    to_zoned(instant).date_naive()
}

/// 00:00:00.000 of a civil date, as an instant.
pub fn start_of_day(date: NaiveDate) -> DateTime<FixedOffset> {
    offset()
        .from_local_datetime(&date.and_hms_opt(0, 0, 0).unwrap())
        .single()
        .unwrap()
}

/// 23:59:59.999 of a civil date, as an instant.
pub fn end_of_day(date: NaiveDate) -> DateTime<FixedOffset> {
    offset()
        .from_local_datetime(&date.and_hms_milli_opt(23, 59, 59, 999).unwrap())
        .single()
        .unwrap()
}

pub fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

pub fn last_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, days_in_month(year, month)?)
}

/// The Monday of the week a civil date falls in.
pub fn monday_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 => Some(if is_leap_year(year) { 29 } else { 28 }),
        _ => None,
    }
}

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Parse a `YYYY-MM-DD` civil date.
pub fn parse_civil_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parse a wall-clock time, `HH:MM` or `HH:MM:SS`.
pub fn parse_civil_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_components_round_trip() {
        let instant = from_components(2025, 3, 14, 9, 26, 53, 0).unwrap();
        let c = components(&instant);
        let rebuilt =
            from_components(c.year, c.month, c.day, c.hour, c.minute, c.second, 0).unwrap();
        assert_eq!(instant, rebuilt);
    }

    #[test]
    fn test_iso_date_crosses_utc_midnight() {
        // 20:00 UTC is already the next civil day in UTC+7.
        let utc = Utc.with_ymd_and_hms(2025, 1, 1, 20, 0, 0).unwrap();
        assert_eq!(format_iso_date(&utc), "2025-01-02");
        assert_eq!(components(&utc).hour, 3);
    }

    #[test]
    fn test_monday_of_week() {
        // 2025-01-01 is a Wednesday.
        let wed = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(
            monday_of_week(wed),
            NaiveDate::from_ymd_opt(2024, 12, 30).unwrap()
        );
        // A Monday maps to itself.
        let mon = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        assert_eq!(monday_of_week(mon), mon);
        // A Sunday belongs to the week that started six days earlier.
        let sun = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(
            monday_of_week(sun),
            NaiveDate::from_ymd_opt(2024, 12, 30).unwrap()
        );
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2025, 2), Some(28));
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2000, 2), Some(29));
        assert_eq!(days_in_month(2025, 4), Some(30));
        assert_eq!(days_in_month(2025, 13), None);
    }

    #[test]
    fn test_month_boundaries() {
        assert_eq!(
            first_of_month(2025, 2),
            NaiveDate::from_ymd_opt(2025, 2, 1)
        );
        assert_eq!(
            last_of_month(2025, 2),
            NaiveDate::from_ymd_opt(2025, 2, 28)
        );
        assert_eq!(last_of_month(2024, 2), NaiveDate::from_ymd_opt(2024, 2, 29));
    }

    #[test]
    fn test_day_boundaries() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let start = start_of_day(date);
        let end = end_of_day(date);
        assert_eq!(format_iso_date(&start), "2025-06-15");
        assert_eq!(format_iso_date(&end), "2025-06-15");
        assert!(start < end);
        assert_eq!(components(&start).hour, 0);
        assert_eq!(components(&end).second, 59);
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(
            parse_civil_date("2025-08-06"),
            NaiveDate::from_ymd_opt(2025, 8, 6)
        );
        assert_eq!(parse_civil_date("2025-13-01"), None);
        assert_eq!(
            parse_civil_time("07:30"),
            NaiveTime::from_hms_opt(7, 30, 0)
        );
        assert_eq!(
            parse_civil_time("07:30:15"),
            NaiveTime::from_hms_opt(7, 30, 15)
        );
        assert_eq!(parse_civil_time("25:00"), None);
    }

    #[test]
    fn test_from_components_rejects_out_of_range() {
        assert!(from_components(2025, 2, 30, 0, 0, 0, 0).is_none());
        assert!(from_components(2025, 1, 1, 24, 0, 0, 0).is_none());
    }
}
