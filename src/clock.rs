use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Prayer;

/// Errors from miqat operations.
#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
pub enum MiqatError {
    /// Provider date string that does not resolve to a day-month-year triple.
    #[error("Invalid provider date {raw:?}")]
    InvalidDate { raw: String },

    /// Time string matching none of the known shapes.
    #[error("Unparseable time string {raw:?}")]
    UnparseableTime { raw: String },

    /// Override write addressed to a date outside the loaded month.
    #[error("Date {date} is not part of the loaded month")]
    DateNotLoaded { date: NaiveDate },

    /// Override write rejected: the entered time is not after the prayer start.
    #[error("Iqama time {value:?} is not after the {prayer} start time")]
    IqamaBeforeStart { prayer: Prayer, value: String },

    /// Postal code unknown to the location resolver.
    #[error("No location found for postal code {zip:?}")]
    ZipNotFound { zip: String },

    /// Non-success response from the prayer-time provider.
    #[error("Prayer time provider error: {reason}")]
    Provider { reason: String },

    /// Transport-level failure.
    #[error("Network error: {reason}")]
    Network { reason: String },
}

impl MiqatError {
    /// Creates an `InvalidDate` error.
    pub fn invalid_date(raw: impl Into<String>) -> Self {
        Self::InvalidDate { raw: raw.into() }
    }

    /// Creates an `UnparseableTime` error.
    pub fn unparseable_time(raw: impl Into<String>) -> Self {
        Self::UnparseableTime { raw: raw.into() }
    }

    /// Creates a `Provider` error.
    pub fn provider(reason: impl Into<String>) -> Self {
        Self::Provider { reason: reason.into() }
    }

    /// Creates a `Network` error.
    pub fn network(reason: impl Into<String>) -> Self {
        Self::Network { reason: reason.into() }
    }
}

/// Parses a provider date string positionally as day-month-year.
///
/// The provider always emits `DD-MM-YYYY` regardless of locale, so the
/// components are taken by position, never through locale-aware parsing.
///
/// # Errors
/// Returns `InvalidDate` if the string is not a valid `DD-MM-YYYY` date.
pub fn parse_provider_date(raw: &str) -> Result<NaiveDate, MiqatError> {
    let mut parts = raw.trim().splitn(3, '-');
    let (Some(day), Some(month), Some(year)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(MiqatError::invalid_date(raw));
    };

    let day: u32 = day.parse().map_err(|_| MiqatError::invalid_date(raw))?;
    let month: u32 = month.parse().map_err(|_| MiqatError::invalid_date(raw))?;
    let year: i32 = year.parse().map_err(|_| MiqatError::invalid_date(raw))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| MiqatError::invalid_date(raw))
}

/// Combines a calendar date with a raw provider time string into an instant.
///
/// Recognized shapes, tried in order:
/// 1. `H:MM AM/PM` (case-insensitive, 12 AM is midnight, 12 PM is noon)
/// 2. `HH:MM` 24-hour, optionally followed by a parenthetical timezone
///    abbreviation which is discarded (e.g. `"05:00 (EDT)"`)
///
/// The provider's local wall-clock time is taken at face value; no timezone
/// conversion is performed and seconds are always zero.
///
/// # Errors
/// Returns `UnparseableTime` when the string matches neither shape.
pub fn parse_instant(date: NaiveDate, raw: &str) -> Result<NaiveDateTime, MiqatError> {
    let cleaned = strip_annotation(raw);
    let time = parse_clock(cleaned).ok_or_else(|| MiqatError::unparseable_time(raw))?;
    Ok(date.and_time(time))
}

/// Drops a trailing parenthetical annotation: `"05:00 (EDT)"` -> `"05:00"`.
fn strip_annotation(raw: &str) -> &str {
    raw.split('(').next().unwrap_or(raw).trim()
}

fn parse_clock(cleaned: &str) -> Option<NaiveTime> {
    let upper = cleaned.to_ascii_uppercase();
    if upper.contains("AM") || upper.contains("PM") {
        // "5:00 AM" or "5:00AM"
        for fmt in ["%I:%M %p", "%I:%M%p"] {
            if let Ok(t) = NaiveTime::parse_from_str(&upper, fmt) {
                return Some(t);
            }
        }
        return None;
    }

    // 24-hour shape: only the leading token counts.
    let token = cleaned.split_whitespace().next()?;
    NaiveTime::parse_from_str(token, "%H:%M").ok()
}

/// Renders an instant as a clock string in 12-hour numerals.
///
/// With `hour12` the meridiem is appended (`"5:00 AM"`); without it the
/// meridiem is stripped but the 12-hour numeral convention is kept
/// (`"5:00"`). This is a cosmetic strip, not a 24-hour conversion.
pub fn format_time(instant: NaiveDateTime, hour12: bool) -> String {
    let (is_pm, hour) = instant.time().hour12();
    let minute = instant.time().minute();
    if hour12 {
        format!("{}:{:02} {}", hour, minute, if is_pm { "PM" } else { "AM" })
    } else {
        format!("{}:{:02}", hour, minute)
    }
}

/// Like [`format_time`], rendering an absent instant as the empty string.
pub fn format_opt(instant: Option<NaiveDateTime>, hour12: bool) -> String {
    instant.map(|i| format_time(i, hour12)).unwrap_or_default()
}
