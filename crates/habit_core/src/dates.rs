//! Calendar date helpers for completion bucketing.
//!
//! # Responsibility
//! - Parse and format the ISO `YYYY-MM-DD` dates used at every boundary.
//! - Compute ISO week windows and integer bucket keys for streak grouping.
//!
//! # Invariants
//! - Parsing is strict: no coercion to "now", no partial dates.
//! - Adjacent days (and adjacent ISO weeks) always differ by exactly one bucket.

use crate::model::habit::Periodicity;
use chrono::{Datelike, Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage and display format for all dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// `num_days_from_ce()` of 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;
/// 1970-01-01 was a Thursday; shifting by three days aligns buckets on Monday.
const MONDAY_ALIGN_OFFSET: i64 = 3;

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid iso date regex"));

/// Error for date strings that are not valid ISO calendar dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParseError {
    pub input: String,
    pub reason: &'static str,
}

impl Display for DateParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid date `{}`: {}", self.input, self.reason)
    }
}

impl Error for DateParseError {}

/// Parses a strict `YYYY-MM-DD` date.
///
/// Surrounding whitespace is ignored; anything else must match exactly.
pub fn parse_date(value: &str) -> Result<NaiveDate, DateParseError> {
    let trimmed = value.trim();
    if !ISO_DATE_RE.is_match(trimmed) {
        return Err(DateParseError {
            input: value.to_string(),
            reason: "expected format YYYY-MM-DD",
        });
    }

    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| DateParseError {
        input: value.to_string(),
        reason: "not a valid calendar date",
    })
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Sunday of the ISO week containing `date`.
pub fn week_end(date: NaiveDate) -> NaiveDate {
    week_start(date) + Duration::days(6)
}

/// Days since 1970-01-01 (negative before it).
pub fn day_bucket(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) - UNIX_EPOCH_DAYS_FROM_CE
}

/// Whole ISO weeks since the week starting Monday 1969-12-29.
pub fn week_bucket(date: NaiveDate) -> i64 {
    (day_bucket(date) + MONDAY_ALIGN_OFFSET).div_euclid(7)
}

/// Bucket key for `date` under the given periodicity.
pub fn bucket(date: NaiveDate, periodicity: Periodicity) -> i64 {
    match periodicity {
        Periodicity::Daily => day_bucket(date),
        Periodicity::Weekly => week_bucket(date),
    }
}
