use anyhow::{anyhow, Context as _, Result};
use carlead_core::domain::{ContactId, InteractionKind, Status};
use carlead_core::rules::{DateBucket, DateClass, StatusFilter};
use carlead_core::time::{format_date, parse_local_datetime};
use chrono::{DateTime, Utc};
use std::str::FromStr;

pub use carlead_core::time::{format_datetime, now_utc};

const EXPORT_PREFIX: &str = "carlead-contacts-";

pub fn parse_contact_id(raw: &str) -> Result<ContactId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("contact id cannot be empty"));
    }
    match ContactId::from_str(trimmed) {
        Ok(id) => Ok(id),
        Err(never) => match never {},
    }
}

pub fn parse_datetime_arg(raw: &str, flag: &str) -> Result<DateTime<Utc>> {
    parse_local_datetime(raw).with_context(|| format!("parse {flag}"))
}

pub fn parse_status(raw: &str) -> Result<Status> {
    Ok(raw.parse::<Status>()?)
}

pub fn parse_status_filter(raw: &str) -> Result<StatusFilter> {
    Ok(raw.parse::<StatusFilter>()?)
}

pub fn parse_bucket(raw: &str) -> Result<DateBucket> {
    Ok(raw.parse::<DateBucket>()?)
}

pub fn parse_interaction_kind(raw: &str) -> Result<InteractionKind> {
    Ok(raw.parse::<InteractionKind>()?)
}

pub fn date_class_label(class: Option<DateClass>) -> &'static str {
    match class {
        None => "unscheduled",
        Some(DateClass::Overdue) => "overdue",
        Some(DateClass::Today) => "today",
        Some(DateClass::Upcoming) => "upcoming",
    }
}

pub fn format_optional_date(at: Option<DateTime<Utc>>) -> String {
    at.map(format_date).unwrap_or_else(|| "-".to_string())
}

pub fn format_millis(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(format_datetime)
        .unwrap_or_else(|| "-".to_string())
}

/// `carlead-contacts-YYYY-MM-DD.json`, dated in local time.
pub fn default_export_filename(now: DateTime<Utc>) -> String {
    format!("{EXPORT_PREFIX}{}.json", format_date(now))
}

/// Empty command-line values become `None`; `ContactInput` treats both alike.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
