//! Lenient decoding for the stored JSON shape.
//!
//! Records come from the persistence slot and from user-supplied import
//! files, both of which may carry older or partially filled shapes. A field
//! that is missing, `null` or of the wrong type decodes to its default
//! instead of failing the whole record.

use crate::time::{now_utc, parse_wire_datetime};
use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose<T> {
    Value(Option<T>),
    Other(IgnoredAny),
}

pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    match Loose::<T>::deserialize(deserializer)? {
        Loose::Value(Some(value)) => Ok(value),
        Loose::Value(None) | Loose::Other(_) => Ok(T::default()),
    }
}

pub(crate) fn optional_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: String = or_default(deserializer)?;
    Ok(parse_wire_datetime(&raw))
}

/// An unreadable timestamp becomes the time it was decoded.
pub(crate) fn datetime_or_now<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_datetime(deserializer)?.unwrap_or_else(now_utc))
}

/// Decodes a sequence entry by entry. Entries that are `null` or of the
/// wrong shape are dropped and the rest kept; a non-sequence is empty.
pub(crate) fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let entries: Vec<Loose<T>> = or_default(deserializer)?;
    Ok(entries
        .into_iter()
        .filter_map(|entry| match entry {
            Loose::Value(value) => value,
            Loose::Other(_) => None,
        })
        .collect())
}
