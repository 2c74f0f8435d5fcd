//! CF-convention time decoding.
//!
//! NetCDF time axes store offsets as numbers together with a `units` attribute
//! of the form `"<unit> since <reference>"`, for example
//! `"seconds since 1970-01-01"` or `"hours since 1900-01-01 00:00:00.0"`.
//! Decoding yields naive timestamps in the file's own time reference; no
//! timezone conversion is applied.

use crate::error::{GridsheetError, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Calendars whose dates coincide with the proleptic Gregorian calendar used
/// by `chrono`.
const GREGORIAN_CALENDARS: &[&str] = &["standard", "gregorian", "proleptic_gregorian"];

/// Zone designators accepted after the reference time. All mean UTC.
const UTC_DESIGNATORS: &[&str] = &["Z", "UTC", "GMT", "0:00", "00:00", "+00:00", "+0000", "+00"];

/// Step unit of a CF time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeStep {
    /// Seconds.
    Seconds,
    /// Minutes.
    Minutes,
    /// Hours.
    Hours,
    /// Days of 24 hours.
    Days,
}

impl TimeStep {
    fn parse(unit: &str) -> Option<Self> {
        match unit.to_ascii_lowercase().as_str() {
            "s" | "sec" | "secs" | "second" | "seconds" => Some(Self::Seconds),
            "min" | "mins" | "minute" | "minutes" => Some(Self::Minutes),
            "h" | "hr" | "hrs" | "hour" | "hours" => Some(Self::Hours),
            "d" | "day" | "days" => Some(Self::Days),
            _ => None,
        }
    }

    fn millis(self) -> f64 {
        match self {
            Self::Seconds => 1_000.0,
            Self::Minutes => 60_000.0,
            Self::Hours => 3_600_000.0,
            Self::Days => 86_400_000.0,
        }
    }
}

/// Parsed `units` attribute of a time coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeUnits {
    /// Size of one offset step.
    pub step: TimeStep,
    /// Timestamp of offset zero.
    pub reference: NaiveDateTime,
}

impl TimeUnits {
    /// Parse a CF `units` string such as `"hours since 1900-01-01 00:00:00"`.
    pub fn parse(units: &str) -> Result<Self> {
        let mut parts = units.split_whitespace();
        let (Some(unit), Some(since)) = (parts.next(), parts.next()) else {
            return Err(GridsheetError::invalid_time(format!(
                "expected '<unit> since <date>', got '{units}'"
            )));
        };
        if !since.eq_ignore_ascii_case("since") {
            return Err(GridsheetError::invalid_time(format!(
                "expected '<unit> since <date>', got '{units}'"
            )));
        }
        let step = TimeStep::parse(unit).ok_or_else(|| {
            GridsheetError::invalid_time(format!("unsupported time unit '{unit}'"))
        })?;

        let rest: Vec<&str> = parts.collect();
        let reference = parse_reference(&rest).ok_or_else(|| {
            GridsheetError::invalid_time(format!("unparseable reference date in '{units}'"))
        })?;

        Ok(Self { step, reference })
    }

    /// Convert one offset into an absolute timestamp, at millisecond precision.
    pub fn decode(&self, offset: f64) -> Result<NaiveDateTime> {
        if !offset.is_finite() {
            return Err(GridsheetError::invalid_time(format!("non-finite offset {offset}")));
        }
        let millis = (offset * self.step.millis()).round();
        if millis.abs() > i64::MAX as f64 {
            return Err(GridsheetError::invalid_time(format!("offset {offset} out of range")));
        }
        Duration::try_milliseconds(millis as i64)
            .and_then(|delta| self.reference.checked_add_signed(delta))
            .ok_or_else(|| GridsheetError::invalid_time(format!("offset {offset} out of range")))
    }
}

/// Decode a whole time axis.
///
/// `calendar` is the optional `calendar` attribute; only calendars that agree
/// with the proleptic Gregorian calendar are accepted.
pub fn decode_axis(
    offsets: &[f64],
    units: &str,
    calendar: Option<&str>,
) -> Result<Vec<NaiveDateTime>> {
    if let Some(calendar) = calendar {
        let lower = calendar.trim().to_ascii_lowercase();
        if !GREGORIAN_CALENDARS.contains(&lower.as_str()) {
            return Err(GridsheetError::invalid_time(format!("unsupported calendar '{calendar}'")));
        }
    }
    let units = TimeUnits::parse(units)?;
    offsets.iter().map(|&offset| units.decode(offset)).collect()
}

fn parse_reference(tokens: &[&str]) -> Option<NaiveDateTime> {
    let (first, mut rest) = tokens.split_first()?;

    // "1970-01-01T00:00:00Z" carries date and time in one token.
    let (date_part, mut time_part) = match first.split_once('T') {
        Some((date, time)) => (date, Some(time.trim_end_matches('Z'))),
        None => (*first, None),
    };
    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()?;

    if time_part.is_none() {
        if let Some((candidate, tail)) = rest.split_first() {
            if candidate.contains(':') && !UTC_DESIGNATORS.contains(candidate) {
                time_part = Some(candidate.trim_end_matches('Z'));
                rest = tail;
            }
        }
    }

    if !rest.iter().all(|token| UTC_DESIGNATORS.contains(token)) {
        return None;
    }

    let time = match time_part {
        Some(t) if !t.is_empty() => parse_time_of_day(t)?,
        _ => NaiveTime::MIN,
    };
    Some(date.and_time(time))
}

fn parse_time_of_day(text: &str) -> Option<NaiveTime> {
    ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(text, fmt).ok())
}
