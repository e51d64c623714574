use crate::domain::{Contact, Status};
use crate::error::CoreError;
use crate::rules::bucket::DateBucket;
use chrono::{DateTime, TimeZone, Utc};
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl StatusFilter {
    pub fn matches(self, status: Status) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        Ok(StatusFilter::Only(s.parse()?))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub text: String,
    pub status: StatusFilter,
    pub bucket: DateBucket,
}

/// Filters and orders `records` for display.
///
/// Records are sorted by follow-up date (undated last), then by most
/// recently updated; remaining ties keep collection order. `now` is used for
/// every record so one evaluation classifies consistently.
pub fn view<'a, Tz: TimeZone>(
    records: &'a [Contact],
    query: &ViewQuery,
    now: DateTime<Utc>,
    zone: &Tz,
) -> Vec<&'a Contact> {
    let needle = query.text.trim().to_lowercase();
    let mut out: Vec<&Contact> = records
        .iter()
        .filter(|contact| query.status.matches(contact.status))
        .filter(|contact| needle.is_empty() || contact.search_haystack().contains(&needle))
        .filter(|contact| query.bucket.matches(contact.next_date, now, zone))
        .collect();
    out.sort_by(|a, b| compare_for_view(a, b));
    out
}

fn compare_for_view(a: &Contact, b: &Contact) -> Ordering {
    let by_date = match (a.next_date, b.next_date) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_date.then_with(|| b.updated_at.cmp(&a.updated_at))
}
