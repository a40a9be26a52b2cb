//! # Calendar Date Conversion
//!
//! Date helpers work on naive wall-clock timestamps. This module lets them
//! accept whatever the caller happens to hold (chrono values, ISO strings, JSON
//! strings) and treat anything else as "not a date".

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde_json::Value;

const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Anything that may resolve to a naive calendar timestamp.
///
/// Returning `None` marks the input as a non-date; date helpers then fall back
/// to their documented sentinel instead of failing.
///
/// # Example
/// ```rust
/// use chrono::NaiveDate;
/// use datakit_types::AsCalendarDate;
///
/// let midnight = NaiveDate::from_ymd_opt(2024, 1, 10).and_then(|d| d.and_hms_opt(0, 0, 0));
/// assert_eq!("2024-01-10".as_calendar_date(), midnight);
/// assert_eq!("yesterday".as_calendar_date(), None);
/// assert_eq!(serde_json::json!(42).as_calendar_date(), None);
/// ```
pub trait AsCalendarDate {
    fn as_calendar_date(&self) -> Option<NaiveDateTime>;
}

impl AsCalendarDate for NaiveDateTime {
    fn as_calendar_date(&self) -> Option<NaiveDateTime> {
        Some(*self)
    }
}

impl AsCalendarDate for NaiveDate {
    fn as_calendar_date(&self) -> Option<NaiveDateTime> {
        Some(self.and_time(NaiveTime::MIN))
    }
}

impl<Tz: TimeZone> AsCalendarDate for DateTime<Tz> {
    fn as_calendar_date(&self) -> Option<NaiveDateTime> {
        Some(self.naive_local())
    }
}

impl AsCalendarDate for str {
    fn as_calendar_date(&self) -> Option<NaiveDateTime> {
        parse_calendar_text(self)
    }
}

impl AsCalendarDate for String {
    fn as_calendar_date(&self) -> Option<NaiveDateTime> {
        parse_calendar_text(self)
    }
}

impl AsCalendarDate for Value {
    fn as_calendar_date(&self) -> Option<NaiveDateTime> {
        self.as_str().and_then(parse_calendar_text)
    }
}

impl<T: AsCalendarDate> AsCalendarDate for Option<T> {
    fn as_calendar_date(&self) -> Option<NaiveDateTime> {
        self.as_ref().and_then(AsCalendarDate::as_calendar_date)
    }
}

impl<T: AsCalendarDate + ?Sized> AsCalendarDate for &T {
    fn as_calendar_date(&self) -> Option<NaiveDateTime> {
        (**self).as_calendar_date()
    }
}

/// Parses RFC 3339 timestamps, ISO date-times, and ISO dates.
///
/// RFC 3339 input keeps the wall clock of its own offset; no timezone
/// normalization happens.
fn parse_calendar_text(text: &str) -> Option<NaiveDateTime> {
    let trimmed = text.trim();

    if let Ok(date_time) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(date_time.naive_local());
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(date_time);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .map(|date| date.and_time(NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use serde_json::json;

    fn timestamp(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, second))
            .expect("valid timestamp")
    }

    #[test]
    fn parses_supported_text_layouts() {
        assert_eq!("2023-12-25".as_calendar_date(), Some(timestamp(2023, 12, 25, 0, 0, 0)));
        assert_eq!("2023/06/15".as_calendar_date(), Some(timestamp(2023, 6, 15, 0, 0, 0)));
        assert_eq!("2023-12-25T10:30:05".as_calendar_date(), Some(timestamp(2023, 12, 25, 10, 30, 5)));
        assert_eq!("2023-12-25 10:30:05".as_calendar_date(), Some(timestamp(2023, 12, 25, 10, 30, 5)));
        assert_eq!("2023-12-25T10:30:00+02:00".as_calendar_date(), Some(timestamp(2023, 12, 25, 10, 30, 0)));
    }

    #[test]
    fn rejects_text_that_is_not_a_date() {
        assert_eq!("".as_calendar_date(), None);
        assert_eq!("invalid".as_calendar_date(), None);
        assert_eq!("2023-13-45".as_calendar_date(), None);
    }

    #[test]
    fn json_values_resolve_only_from_strings() {
        assert_eq!(json!("2024-01-01").as_calendar_date(), Some(timestamp(2024, 1, 1, 0, 0, 0)));
        assert_eq!(json!(1_704_067_200).as_calendar_date(), None);
        assert_eq!(json!(null).as_calendar_date(), None);
        assert_eq!(json!({"date": "2024-01-01"}).as_calendar_date(), None);
    }

    #[test]
    fn chrono_values_keep_their_wall_clock() {
        let naive = timestamp(2024, 2, 29, 23, 59, 59);
        assert_eq!(naive.as_calendar_date(), Some(naive));
        assert_eq!(naive.date().as_calendar_date(), Some(timestamp(2024, 2, 29, 0, 0, 0)));

        let offset = FixedOffset::east_opt(5 * 3600).expect("valid offset");
        let zoned = offset.from_local_datetime(&naive).single().expect("unambiguous");
        assert_eq!(zoned.as_calendar_date(), Some(naive));

        let utc = Utc.from_utc_datetime(&naive);
        assert_eq!(utc.as_calendar_date(), Some(naive));
    }

    #[test]
    fn optional_inputs_fall_through_to_none() {
        let missing: Option<NaiveDate> = None;
        assert_eq!(missing.as_calendar_date(), None);
        assert_eq!(Some("2024-01-01").as_calendar_date(), Some(timestamp(2024, 1, 1, 0, 0, 0)));
    }
}
