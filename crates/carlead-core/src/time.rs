use crate::error::CoreError;
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::str::FromStr;
use thiserror::Error;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

#[derive(Debug, Error)]
pub enum TimeParseError {
    #[error("timestamp cannot be empty")]
    Empty,
    #[error("invalid date")]
    InvalidDate,
    #[error("invalid datetime format: expected YYYY-MM-DD, YYYY-MM-DD HH:MM or RFC 3339")]
    InvalidDateTime,
    #[error("ambiguous local time: {0}")]
    AmbiguousLocalTime(String),
}

pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Record timestamps (`createdAt`, `updatedAt`) are epoch milliseconds.
pub fn to_millis(at: DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

/// Parses a user-typed date in local time. RFC 3339 input keeps its own
/// offset.
pub fn parse_local_datetime(input: &str) -> Result<DateTime<Utc>, TimeParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::Empty);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        let naive = date
            .and_hms_opt(0, 0, 0)
            .ok_or(TimeParseError::InvalidDate)?;
        return local_to_utc(naive);
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return local_to_utc(dt);
        }
    }

    Err(TimeParseError::InvalidDateTime)
}

/// Stored dates are RFC 3339; older records may hold a bare `YYYY-MM-DD`,
/// read as local midnight. Anything else is treated as absent.
pub fn parse_wire_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()?;
    let naive = date.and_hms_opt(0, 0, 0)?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

pub fn format_date(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

pub fn format_datetime(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// One-click follow-up dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextDatePreset {
    Today,
    Tomorrow,
    NextWeek,
}

impl NextDatePreset {
    pub fn resolve(self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            NextDatePreset::Today => now,
            NextDatePreset::Tomorrow => now + Duration::days(1),
            NextDatePreset::NextWeek => now + Duration::days(7),
        }
    }
}

impl FromStr for NextDatePreset {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "today" => Ok(NextDatePreset::Today),
            "tomorrow" => Ok(NextDatePreset::Tomorrow),
            "next-week" | "week" => Ok(NextDatePreset::NextWeek),
            _ => Err(CoreError::InvalidDatePreset(s.trim().to_string())),
        }
    }
}

fn local_to_utc(naive: NaiveDateTime) -> Result<DateTime<Utc>, TimeParseError> {
    let local = Local
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| TimeParseError::AmbiguousLocalTime(naive.to_string()))?;
    Ok(local.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::{
        format_date, format_datetime, parse_local_datetime, parse_wire_datetime, NextDatePreset,
        TimeParseError,
    };
    use chrono::{Duration, Local, TimeZone, Utc};

    #[test]
    fn parse_local_datetime_accepts_date_only() {
        let at = parse_local_datetime("2030-01-15").unwrap();
        assert_eq!(format_date(at), "2030-01-15");
    }

    #[test]
    fn parse_local_datetime_accepts_datetime() {
        let at = parse_local_datetime("2030-01-15 13:45").unwrap();
        assert_eq!(format_datetime(at), "2030-01-15 13:45");
    }

    #[test]
    fn parse_local_datetime_accepts_rfc3339() {
        let at = parse_local_datetime("2030-01-15T13:45:00Z").unwrap();
        assert_eq!(at, Utc.with_ymd_and_hms(2030, 1, 15, 13, 45, 0).unwrap());
    }

    #[test]
    fn parse_local_datetime_rejects_garbage() {
        assert!(matches!(
            parse_local_datetime("  ").unwrap_err(),
            TimeParseError::Empty
        ));
        assert!(matches!(
            parse_local_datetime("next tuesday").unwrap_err(),
            TimeParseError::InvalidDateTime
        ));
    }

    #[test]
    fn wire_dates_are_lenient() {
        assert!(parse_wire_datetime("").is_none());
        assert!(parse_wire_datetime("soon").is_none());
        let at = parse_wire_datetime("2024-05-02T08:30:00.000Z").unwrap();
        assert_eq!(at, Utc.with_ymd_and_hms(2024, 5, 2, 8, 30, 0).unwrap());
        let midnight = parse_wire_datetime("2024-05-02").unwrap();
        let local = midnight.with_timezone(&Local);
        assert_eq!(local.format("%Y-%m-%d %H:%M").to_string(), "2024-05-02 00:00");
    }

    #[test]
    fn presets_shift_from_now() {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        assert_eq!(NextDatePreset::Today.resolve(now), now);
        assert_eq!(
            NextDatePreset::Tomorrow.resolve(now),
            now + Duration::days(1)
        );
        assert_eq!(
            "next-week".parse::<NextDatePreset>().unwrap().resolve(now),
            now + Duration::days(7)
        );
        assert!("someday".parse::<NextDatePreset>().is_err());
    }
}
