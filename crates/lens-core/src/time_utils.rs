//! Calendar derivation for transcript timestamps.
//!
//! Transcript headers carry two-digit day/month/year fields that are never
//! validated at parse time. The helpers here map those raw fields to a
//! weekday name and an epoch timestamp, rolling out-of-range values forward
//! or backward the way a JavaScript `Date` constructor would (month 13 is
//! January of the next year, day 0 is the last day of the previous month).

use chrono::{Datelike, Duration, LocalResult, NaiveDate, TimeZone, Weekday};
use tracing::debug;

/// Canonical weekday order for display and chart iteration.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Canonical hour-of-day labels, `"00"`..`"23"`.
pub const HOUR_LABELS: [&str; 24] = [
    "00", "01", "02", "03", "04", "05", "06", "07", "08", "09", "10", "11", "12", "13", "14", "15",
    "16", "17", "18", "19", "20", "21", "22", "23",
];

// ── Date derivation ───────────────────────────────────────────────────────────

/// Resolve raw two-digit (yy, mm, dd) fields to a proleptic Gregorian date,
/// interpreting the year as `2000 + yy` and rolling any overflow.
pub fn rolled_date(yy: u32, mm: u32, dd: u32) -> NaiveDate {
    // Normalise the month first: (2000+yy, 13) becomes (2001+yy, 1).
    let total_months = (2000 + yy as i32) * 12 + mm as i32 - 1;
    let year = total_months.div_euclid(12);
    let month = total_months.rem_euclid(12) as u32 + 1;

    // Two-digit inputs keep the year within chrono's supported range.
    let first_of_month =
        NaiveDate::from_ymd_opt(year, month, 1).expect("month is normalised to 1..=12");

    // Day 0 lands on the last day of the previous month, day 32 on the
    // first days of the next.
    let date = first_of_month + Duration::days(dd as i64 - 1);
    if date.day() != dd || date.month() != mm {
        debug!(
            "rolled calendar date {:02}/{:02}/{:02} to {}",
            dd, mm, yy, date
        );
    }
    date
}

/// English weekday name for the calendar date (`2000 + yy`, `mm`, `dd`).
pub fn weekday_name(yy: u32, mm: u32, dd: u32) -> &'static str {
    match rolled_date(yy, mm, dd).weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Epoch milliseconds of local-time midnight of the calendar date
/// (`2000 + yy`, `mm`, `dd`). Used for chronological chart ordering.
pub fn unix_millis(yy: u32, mm: u32, dd: u32) -> i64 {
    let midnight = rolled_date(yy, mm, dd)
        .and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time");

    match chrono::Local.from_local_datetime(&midnight) {
        LocalResult::Single(dt) => dt.timestamp_millis(),
        LocalResult::Ambiguous(dt, _) => dt.timestamp_millis(),
        // A DST gap can swallow midnight; fall back to UTC.
        LocalResult::None => chrono::Utc.from_utc_datetime(&midnight).timestamp_millis(),
    }
}

/// Parse a `"dd/mm/yy"` bucket label back into its numeric fields.
///
/// Labels are produced by the aggregator, so this is total in practice;
/// unparseable components default to zero.
pub fn parse_date_label(label: &str) -> (u32, u32, u32) {
    let mut parts = label.split('/');
    let mut next = || {
        parts
            .next()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .unwrap_or(0)
    };
    let dd = next();
    let mm = next();
    let yy = next();
    (yy, mm, dd)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
