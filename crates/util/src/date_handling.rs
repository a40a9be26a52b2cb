//! # Date Handling Utilities
//!
//! Token formatting, fixed-layout parsing, and day arithmetic over naive
//! wall-clock timestamps. There is no timezone model: a "day" is 24 hours of
//! `NaiveDateTime` arithmetic.
//!
//! Every function accepts any [`AsCalendarDate`] input. Input that does not
//! resolve to a date produces a sentinel (`""`, `None`, `0`, `false`) instead
//! of an error.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use datakit_types::AsCalendarDate;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

const MILLISECONDS_PER_DAY: f64 = 86_400_000.0;

static FORMAT_TOKENS: Lazy<Regex> = Lazy::new(|| Regex::new("YYYY|MM|DD|HH|mm|ss").expect("valid token pattern"));
static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{4})-([0-9]{2})-([0-9]{2})").expect("valid ISO date pattern"));

fn resolve(operation: &str, date: &impl AsCalendarDate) -> Option<NaiveDateTime> {
    let resolved = date.as_calendar_date();
    if resolved.is_none() {
        debug!("{} received a non-date input", operation);
    }
    resolved
}

/// Substitutes `YYYY`, `MM`, `DD`, `HH`, `mm`, and `ss` in `format`.
///
/// Fields other than the year are zero-padded to two digits; every other
/// character is copied through. Non-date input yields an empty string.
///
/// # Arguments
/// * `date` - A chrono value or an ISO / RFC 3339 string
/// * `format` - Template containing the tokens above
///
/// # Returns
/// The rendered string
///
/// # Example
/// ```rust
/// use chrono::NaiveDate;
/// use datakit_util::date_handling::format_date;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 7).and_then(|d| d.and_hms_opt(9, 5, 0)).unwrap();
/// assert_eq!(format_date(date, "YYYY-MM-DD HH:mm:ss"), "2024-03-07 09:05:00");
/// assert_eq!(format_date("not a date", "YYYY"), "");
/// ```
pub fn format_date(date: impl AsCalendarDate, format: &str) -> String {
    let Some(date) = resolve("format_date", &date) else {
        return String::new();
    };

    FORMAT_TOKENS
        .replace_all(format, |captures: &Captures| match &captures[0] {
            "YYYY" => date.year().to_string(),
            "MM" => format!("{:02}", date.month()),
            "DD" => format!("{:02}", date.day()),
            "HH" => format!("{:02}", date.hour()),
            "mm" => format!("{:02}", date.minute()),
            _ => format!("{:02}", date.second()),
        })
        .into_owned()
}

/// Parses the first `YYYY-MM-DD` found in `text` into a midnight timestamp.
///
/// `format` is accepted for call-site symmetry with [`format_date`] but only
/// the `YYYY-MM-DD` layout is recognized. Out-of-range months and days roll
/// over (`2023-13-45` is `2024-02-14`). Returns `None` when nothing matches.
///
/// # Example
/// ```rust
/// use datakit_util::date_handling::{format_date, parse_date};
///
/// let parsed = parse_date("due 2024-01-10", "YYYY-MM-DD");
/// assert_eq!(format_date(parsed, "DD/MM/YYYY"), "10/01/2024");
/// assert_eq!(parse_date("10/01/2024", "DD/MM/YYYY"), None);
/// ```
pub fn parse_date(text: &str, format: &str) -> Option<NaiveDateTime> {
    let Some(captures) = ISO_DATE.captures(text) else {
        debug!("parse_date found no YYYY-MM-DD date (format {:?} is not consulted)", format);
        return None;
    };

    let year: i64 = captures[1].parse().ok()?;
    let month: i64 = captures[2].parse().ok()?;
    let day: i64 = captures[3].parse().ok()?;
    rolled_over_date(year, month, day)
}

/// Builds a date the way calendar arithmetic does, carrying excess months into
/// years and excess days into months.
fn rolled_over_date(year: i64, month: i64, day: i64) -> Option<NaiveDateTime> {
    let total_months = year * 12 + (month - 1);
    let normalized_year = i32::try_from(total_months.div_euclid(12)).ok()?;
    let normalized_month = u32::try_from(total_months.rem_euclid(12) + 1).ok()?;

    let first_of_month = NaiveDate::from_ymd_opt(normalized_year, normalized_month, 1)?;
    let date = first_of_month.checked_add_signed(TimeDelta::try_days(day - 1)?)?;
    Some(date.and_time(NaiveTime::MIN))
}

/// Shifts `date` by whole days. `None` for non-date input or overflow.
pub fn add_days(date: impl AsCalendarDate, days: i64) -> Option<NaiveDateTime> {
    let date = resolve("add_days", &date)?;
    date.checked_add_signed(TimeDelta::try_days(days)?)
}

/// Shifts `date` back by whole days.
pub fn subtract_days(date: impl AsCalendarDate, days: i64) -> Option<NaiveDateTime> {
    add_days(date, days.checked_neg()?)
}

/// Whole days from `right` to `left`, rounded half up; `0` for non-date input.
///
/// # Example
/// ```rust
/// use datakit_util::date_handling::difference_in_days;
///
/// assert_eq!(difference_in_days("2024-01-10", "2024-01-01"), 9);
/// assert_eq!(difference_in_days("2024-01-01", "2024-01-10"), -9);
/// ```
pub fn difference_in_days(left: impl AsCalendarDate, right: impl AsCalendarDate) -> i64 {
    let (Some(left), Some(right)) = (resolve("difference_in_days", &left), resolve("difference_in_days", &right))
    else {
        return 0;
    };

    let days = (left - right).num_milliseconds() as f64 / MILLISECONDS_PER_DAY;
    (days + 0.5).floor() as i64
}

/// Strictly earlier; `false` when either side is not a date.
pub fn is_before(left: impl AsCalendarDate, right: impl AsCalendarDate) -> bool {
    match (resolve("is_before", &left), resolve("is_before", &right)) {
        (Some(left), Some(right)) => left < right,
        _ => false,
    }
}

/// Strictly later; `false` when either side is not a date.
pub fn is_after(left: impl AsCalendarDate, right: impl AsCalendarDate) -> bool {
    match (resolve("is_after", &left), resolve("is_after", &right)) {
        (Some(left), Some(right)) => left > right,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn timestamp(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, second))
            .expect("valid timestamp")
    }

    fn midnight(year: i32, month: u32, day: u32) -> NaiveDateTime {
        timestamp(year, month, day, 0, 0, 0)
    }

    #[test]
    fn formats_every_token() {
        let date = timestamp(2023, 6, 5, 14, 3, 9);
        assert_eq!(format_date(date, "YYYY-MM-DDTHH:mm:ss"), "2023-06-05T14:03:09");
        assert_eq!(format_date(date, "DD.MM.YYYY"), "05.06.2023");
        assert_eq!(format_date(date, "Year YYYY, yy"), "Year 2023, yy");
        assert_eq!(format_date(date, "MMMM"), "0606");
        assert_eq!(format_date(timestamp(5, 1, 1, 0, 0, 0), "YYYY"), "5");
    }

    #[test]
    fn format_accepts_loose_inputs() {
        assert_eq!(format_date("2024-02-29", "DD/MM"), "29/02");
        assert_eq!(format_date(json!("2024-02-29T08:00:00Z"), "HH:mm"), "08:00");
        assert_eq!(format_date(json!(20240229), "YYYY"), "");
        assert_eq!(format_date(None::<NaiveDateTime>, "YYYY"), "");
    }

    #[test]
    fn parse_recognizes_only_the_fixed_layout() {
        assert_eq!(parse_date("2024-01-10", "YYYY-MM-DD"), Some(midnight(2024, 1, 10)));
        assert_eq!(parse_date("created 2024-01-10T10:00:00", "anything"), Some(midnight(2024, 1, 10)));
        assert_eq!(parse_date("2024/01/10", "YYYY/MM/DD"), None);
        assert_eq!(parse_date("", "YYYY-MM-DD"), None);
    }

    #[test]
    fn parse_rolls_out_of_range_fields_over() {
        assert_eq!(parse_date("2023-13-45", ""), Some(midnight(2024, 2, 14)));
        assert_eq!(parse_date("2023-02-30", ""), Some(midnight(2023, 3, 2)));
        assert_eq!(parse_date("2023-00-00", ""), Some(midnight(2022, 11, 30)));
    }

    #[test]
    fn day_arithmetic_rolls_over_months_and_years() {
        assert_eq!(add_days(midnight(2023, 12, 31), 1), Some(midnight(2024, 1, 1)));
        assert_eq!(add_days(midnight(2024, 2, 28), 1), Some(midnight(2024, 2, 29)));
        assert_eq!(subtract_days(midnight(2024, 3, 1), 1), Some(midnight(2024, 2, 29)));
        assert_eq!(add_days(timestamp(2024, 1, 1, 13, 30, 0), -366), Some(timestamp(2022, 12, 31, 13, 30, 0)));
        assert_eq!(add_days("nope", 1), None);
        assert_eq!(subtract_days(midnight(2024, 1, 1), i64::MIN), None);
    }

    #[test]
    fn difference_rounds_to_whole_days() {
        assert_eq!(difference_in_days(midnight(2024, 1, 10), midnight(2024, 1, 1)), 9);
        assert_eq!(difference_in_days(midnight(2024, 1, 1), midnight(2024, 1, 10)), -9);
        assert_eq!(difference_in_days(timestamp(2024, 1, 2, 12, 0, 0), midnight(2024, 1, 1)), 2);
        assert_eq!(difference_in_days(timestamp(2024, 1, 2, 11, 59, 0), midnight(2024, 1, 1)), 1);
        assert_eq!(difference_in_days(midnight(2024, 1, 1), timestamp(2024, 1, 2, 12, 0, 0)), -1);
        assert_eq!(difference_in_days("bad", midnight(2024, 1, 1)), 0);
    }

    #[test]
    fn comparisons_are_strict() {
        let earlier = midnight(2024, 1, 1);
        let later = timestamp(2024, 1, 1, 0, 0, 1);
        assert!(is_before(earlier, later));
        assert!(!is_before(later, earlier));
        assert!(!is_before(earlier, earlier));
        assert!(is_after(later, earlier));
        assert!(!is_after(earlier, earlier));
        assert!(!is_after(json!(true), earlier));
        assert!(!is_before(earlier, "not a date"));
    }
}
