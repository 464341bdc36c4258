//! Wall-clock date handling for activities.
//!
//! Activity dates carry no timezone. Whatever local time the client wrote is
//! stored and compared as-is, and the calendar day of an activity is always
//! the date part of that wall-clock value. Storage filtering and list
//! grouping both go through [`day_key`] / [`NaiveDateTime::date`], so they
//! agree on which day an activity belongs to.

use crate::common::error::{Result, StoreError};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};

/// Canonical serialized form of an activity date.
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
/// Format of the date-only filter and of group keys.
pub const DAY_FORMAT: &str = "%Y-%m-%d";
/// What an HTML `datetime-local` input submits and expects.
pub const FORM_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    FORM_DATETIME_FORMAT,
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an activity date.
///
/// Naive forms are taken verbatim. RFC 3339 values keep their local
/// wall-clock part and drop the offset. Sub-second precision is truncated.
pub fn parse_datetime(input: &str) -> Result<NaiveDateTime> {
    let input = input.trim();
    let parsed = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(input)
                .ok()
                .map(|dt| dt.naive_local())
        })
        .ok_or_else(|| StoreError::InvalidDate(input.to_string()))?;

    Ok(parsed.with_nanosecond(0).unwrap_or(parsed))
}

/// Parse the `date` list filter: a bare `YYYY-MM-DD`, or any accepted
/// activity date whose calendar day is then used.
pub fn parse_filter_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, DAY_FORMAT)
        .or_else(|_| parse_datetime(input).map(|dt| dt.date()))
        .map_err(|_| StoreError::InvalidDate(input.to_string()))
}

pub fn format_datetime(dt: &NaiveDateTime) -> String {
    dt.format(DATETIME_FORMAT).to_string()
}

pub fn format_day(day: &NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

/// `YYYY-MM-DD` of the activity's wall-clock date.
pub fn day_key(dt: &NaiveDateTime) -> String {
    format_day(&dt.date())
}

/// Serde adapter: accepts every form [`parse_datetime`] does, writes
/// [`DATETIME_FORMAT`].
pub mod wall_clock {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &NaiveDateTime, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_datetime(dt))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_datetime(&raw).map_err(serde::de::Error::custom)
    }
}
