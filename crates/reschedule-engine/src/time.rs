//! Time normalization -- compare session time fields regardless of storage format.
//!
//! Session start/end fields arrive either as a bare time of day (`"09:00:00"`)
//! or as a full ISO 8601 stamp (`"2025-03-01T09:00:00Z"`). Internally every
//! field is a [`SessionTime`]: a canonical `NaiveTime` plus the [`TimeFormat`]
//! it was stored in, so writing it back never changes the field's shape.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::{RescheduleError, Result};

/// Bare time-of-day layouts, paired with whether they carry seconds.
const TIME_ONLY_FORMATS: &[(&str, bool)] = &[("%H:%M:%S%.f", true), ("%H:%M", false)];
const NAIVE_ISO_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// How a session time field is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeFormat {
    /// Bare time of day, `"09:30:00"` or `"09:30"`. `seconds` records which,
    /// so the field is written back with the precision it was stored with.
    TimeOnly { seconds: bool },
    /// Full date-time stamp. `offset` is the UTC offset the stamp carried, if any;
    /// it is written back verbatim (`Z` for UTC).
    Iso { offset: Option<FixedOffset> },
}

impl TimeFormat {
    /// Short label used in JSON output and the CLI: `"time-only"` or `"iso"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeFormat::TimeOnly { .. } => "time-only",
            TimeFormat::Iso { .. } => "iso",
        }
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed time value: its wall-clock reading, the date it carried (ISO only),
/// and its storage format.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ParsedTime {
    date: Option<NaiveDate>,
    time: NaiveTime,
    format: TimeFormat,
}

fn parse_time_value(value: &str) -> Result<ParsedTime> {
    let value = value.trim();

    for &(fmt, seconds) in TIME_ONLY_FORMATS {
        if let Ok(time) = NaiveTime::parse_from_str(value, fmt) {
            return Ok(ParsedTime {
                date: None,
                time,
                format: TimeFormat::TimeOnly { seconds },
            });
        }
    }

    // Offset-bearing stamps keep the wall clock of their own offset.
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        let local = dt.naive_local();
        return Ok(ParsedTime {
            date: Some(local.date()),
            time: local.time(),
            format: TimeFormat::Iso {
                offset: Some(*dt.offset()),
            },
        });
    }

    for fmt in NAIVE_ISO_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Ok(ParsedTime {
                date: Some(ndt.date()),
                time: ndt.time(),
                format: TimeFormat::Iso { offset: None },
            });
        }
    }

    Err(RescheduleError::InvalidTime(value.to_string()))
}

/// Parse a calendar date in `YYYY-MM-DD` form.
///
/// # Errors
/// Returns `RescheduleError::InvalidDate` if the string is not a valid date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| RescheduleError::InvalidDate(value.to_string()))
}

/// Parse a bare time of day (`HH:MM` or `HH:MM:SS`).
///
/// # Errors
/// Returns `RescheduleError::InvalidTime` for anything else, including full stamps.
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime> {
    let parsed = parse_time_value(value)?;
    match parsed.format {
        TimeFormat::TimeOnly { .. } => Ok(parsed.time),
        TimeFormat::Iso { .. } => Err(RescheduleError::InvalidTime(value.to_string())),
    }
}

/// Detect whether a time value is a bare time of day or a full stamp.
///
/// # Errors
/// Returns `RescheduleError::InvalidTime` if the value is neither.
pub fn detect_format(value: &str) -> Result<TimeFormat> {
    parse_time_value(value).map(|p| p.format)
}

/// Combine a calendar date with the time of day of `value` (either format).
///
/// For ISO values the wall-clock reading in the stamp's own offset is used and
/// the stamp's own date is ignored: `date` is authoritative.
///
/// # Errors
/// Returns `RescheduleError::InvalidTime` if `value` cannot be parsed.
pub fn to_absolute(date: NaiveDate, value: &str) -> Result<NaiveDateTime> {
    let parsed = parse_time_value(value)?;
    Ok(date.and_time(parsed.time))
}

/// Render an absolute time back into a stored field of the given format.
///
/// An `HH:MM` field whose time has gained seconds is widened to `HH:MM:SS`
/// rather than truncated.
pub fn to_storage_format(absolute: NaiveDateTime, format: TimeFormat) -> String {
    match format {
        TimeFormat::TimeOnly { seconds: false } if absolute.second() == 0 => {
            absolute.format("%H:%M").to_string()
        }
        TimeFormat::TimeOnly { .. } => absolute.format("%H:%M:%S").to_string(),
        TimeFormat::Iso { offset: None } => absolute.format("%Y-%m-%dT%H:%M:%S").to_string(),
        TimeFormat::Iso {
            offset: Some(offset),
        } => format!(
            "{}{}",
            absolute.format("%Y-%m-%dT%H:%M:%S"),
            format_offset(offset)
        ),
    }
}

fn format_offset(offset: FixedOffset) -> String {
    let secs = offset.local_minus_utc();
    if secs == 0 {
        return "Z".to_string();
    }
    let sign = if secs < 0 { '-' } else { '+' };
    let abs = secs.abs();
    format!("{}{:02}:{:02}", sign, abs / 3600, (abs % 3600) / 60)
}

/// A session start or end field: canonical time of day plus storage format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionTime {
    pub time: NaiveTime,
    pub format: TimeFormat,
}

impl SessionTime {
    pub fn new(time: NaiveTime, format: TimeFormat) -> Self {
        Self { time, format }
    }

    /// A bare `HH:MM:SS` time-of-day field.
    pub fn time_only(time: NaiveTime) -> Self {
        Self::new(time, TimeFormat::TimeOnly { seconds: true })
    }

    /// Parse a stored field. The date part of ISO stamps is dropped.
    ///
    /// # Errors
    /// Returns `RescheduleError::InvalidTime` if the value is unparseable.
    pub fn parse(value: &str) -> Result<Self> {
        let parsed = parse_time_value(value)?;
        Ok(Self::new(parsed.time, parsed.format))
    }

    /// Parse a stored field and report the date an ISO stamp carried, if any.
    pub fn parse_with_date(value: &str) -> Result<(Self, Option<NaiveDate>)> {
        let parsed = parse_time_value(value)?;
        Ok((Self::new(parsed.time, parsed.format), parsed.date))
    }

    /// Same format, different time of day.
    pub fn with_time(self, time: NaiveTime) -> Self {
        Self { time, ..self }
    }

    pub fn on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.time)
    }

    /// Render this field for the session's date in its stored format.
    pub fn render(&self, date: NaiveDate) -> String {
        to_storage_format(self.on(date), self.format)
    }
}
