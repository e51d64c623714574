use crate::error::CoreError;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a follow-up date falls relative to now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateClass {
    Overdue,
    Today,
    Upcoming,
}

/// Date filter of the contact list. `All` disables the filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateBucket {
    #[default]
    Today,
    Overdue,
    Upcoming,
    All,
}

/// Calendar days are taken in `zone`, each instant with its own offset. A
/// date on today's calendar day is `Today` whatever its time of day.
pub fn classify_date<Tz: TimeZone>(at: DateTime<Utc>, now: DateTime<Utc>, zone: &Tz) -> DateClass {
    let day = at.with_timezone(zone).date_naive();
    let today = now.with_timezone(zone).date_naive();
    if day == today {
        DateClass::Today
    } else if at < now {
        DateClass::Overdue
    } else {
        DateClass::Upcoming
    }
}

impl DateBucket {
    pub const ALL: [DateBucket; 4] = [
        DateBucket::Today,
        DateBucket::Overdue,
        DateBucket::Upcoming,
        DateBucket::All,
    ];

    pub fn value(self) -> &'static str {
        match self {
            DateBucket::Today => "today",
            DateBucket::Overdue => "overdue",
            DateBucket::Upcoming => "upcoming",
            DateBucket::All => "all",
        }
    }

    /// Undated records only match `All`.
    pub fn matches<Tz: TimeZone>(
        self,
        next_date: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
        zone: &Tz,
    ) -> bool {
        let class = match (self, next_date) {
            (DateBucket::All, _) => return true,
            (_, None) => return false,
            (_, Some(at)) => classify_date(at, now, zone),
        };
        matches!(
            (self, class),
            (DateBucket::Today, DateClass::Today)
                | (DateBucket::Overdue, DateClass::Overdue)
                | (DateBucket::Upcoming, DateClass::Upcoming)
        )
    }
}

impl fmt::Display for DateBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for DateBucket {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        DateBucket::ALL
            .into_iter()
            .find(|bucket| bucket.value() == normalized)
            .ok_or_else(|| CoreError::InvalidDateBucket(s.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{classify_date, DateBucket, DateClass};
    use chrono::{Duration, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn now_is_today_only() {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        assert_eq!(classify_date(now, now, &utc()), DateClass::Today);
        assert!(DateBucket::Today.matches(Some(now), now, &utc()));
        assert!(!DateBucket::Overdue.matches(Some(now), now, &utc()));
        assert!(!DateBucket::Upcoming.matches(Some(now), now, &utc()));
    }

    #[test]
    fn earlier_same_day_is_still_today() {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        let morning = Utc.with_ymd_and_hms(2024, 1, 10, 0, 5, 0).unwrap();
        let evening = Utc.with_ymd_and_hms(2024, 1, 10, 23, 55, 0).unwrap();
        assert_eq!(classify_date(morning, now, &utc()), DateClass::Today);
        assert_eq!(classify_date(evening, now, &utc()), DateClass::Today);
    }

    #[test]
    fn other_days_split_on_now() {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        assert_eq!(
            classify_date(now - Duration::days(1), now, &utc()),
            DateClass::Overdue
        );
        assert_eq!(
            classify_date(now + Duration::days(1), now, &utc()),
            DateClass::Upcoming
        );
    }

    #[test]
    fn calendar_day_follows_offset() {
        // 23:30 UTC on the 10th is already the 11th at UTC+2.
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 23, 30, 0).unwrap();
        let at = Utc.with_ymd_and_hms(2024, 1, 10, 21, 0, 0).unwrap();
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(classify_date(at, now, &utc()), DateClass::Today);
        assert_eq!(classify_date(at, now, &plus_two), DateClass::Overdue);
    }

    // Offset +1 before 2024-03-31 01:00 UTC, +2 after.
    #[derive(Debug, Clone, Copy)]
    struct SpringForward;

    impl SpringForward {
        fn offset_at(utc: &NaiveDateTime) -> FixedOffset {
            let switch = NaiveDate::from_ymd_opt(2024, 3, 31)
                .unwrap()
                .and_hms_opt(1, 0, 0)
                .unwrap();
            let hours = if *utc < switch { 1 } else { 2 };
            FixedOffset::east_opt(hours * 3600).unwrap()
        }
    }

    impl TimeZone for SpringForward {
        type Offset = FixedOffset;

        fn from_offset(_offset: &FixedOffset) -> Self {
            SpringForward
        }

        fn offset_from_local_date(&self, _local: &NaiveDate) -> LocalResult<FixedOffset> {
            LocalResult::Single(FixedOffset::east_opt(3600).unwrap())
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            LocalResult::Single(Self::offset_at(local))
        }

        fn offset_from_utc_date(&self, _utc: &NaiveDate) -> FixedOffset {
            FixedOffset::east_opt(3600).unwrap()
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            Self::offset_at(utc)
        }
    }

    #[test]
    fn each_date_uses_its_own_offset_across_dst() {
        // 22:30 UTC on the 30th is 23:30 local (+1), the day before `now`.
        // Reading it with now's +2 offset would put it on the 31st.
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 10, 0, 0).unwrap();
        let late_evening = Utc.with_ymd_and_hms(2024, 3, 30, 22, 30, 0).unwrap();
        assert_eq!(
            classify_date(late_evening, now, &SpringForward),
            DateClass::Overdue
        );
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(classify_date(late_evening, now, &plus_two), DateClass::Today);
    }

    #[test]
    fn undated_only_matches_all() {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        assert!(DateBucket::All.matches(None, now, &utc()));
        for bucket in [DateBucket::Today, DateBucket::Overdue, DateBucket::Upcoming] {
            assert!(!bucket.matches(None, now, &utc()));
        }
    }

    #[test]
    fn parse_bucket_names() {
        assert_eq!("Overdue".parse::<DateBucket>().unwrap(), DateBucket::Overdue);
        assert!("later".parse::<DateBucket>().is_err());
    }
}
