use crate::domain::{Contact, Interaction, InteractionId, InteractionKind, Status};
use crate::time::to_millis;
use chrono::{DateTime, Utc};

/// A touchpoint to append, plus optional changes applied with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionEntry {
    pub date: Option<DateTime<Utc>>,
    pub kind: Option<InteractionKind>,
    pub note: Option<String>,
    pub outcome: Option<String>,
    /// `Some(None)` clears the contact's follow-up date.
    pub next_date: Option<Option<DateTime<Utc>>>,
    pub status: Option<Status>,
}

/// Prepends the entry to the contact's log and applies the status and
/// follow-up changes in the same step. Returns the appended entry.
pub fn apply_interaction(
    contact: &mut Contact,
    now: DateTime<Utc>,
    entry: InteractionEntry,
) -> Interaction {
    let interaction = Interaction {
        id: InteractionId::new(),
        date: entry.date.unwrap_or(now),
        kind: entry.kind.unwrap_or_default(),
        note: entry.note.unwrap_or_default(),
        outcome: entry.outcome.unwrap_or_default(),
    };
    contact.interactions.insert(0, interaction.clone());
    if let Some(next_date) = entry.next_date {
        contact.next_date = next_date;
    }
    if let Some(status) = entry.status {
        contact.status = status;
    }
    contact.updated_at = to_millis(now).max(contact.created_at);
    interaction
}

#[cfg(test)]
mod tests {
    use super::{apply_interaction, InteractionEntry};
    use crate::domain::{InteractionKind, Status};
    use crate::rules::factory::{normalize, ContactInput};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn appends_newest_first_with_defaults() {
        let created = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        let mut contact = normalize(created, ContactInput::default());

        let first_at = created + Duration::minutes(1);
        let first = apply_interaction(&mut contact, first_at, InteractionEntry::default());
        assert_eq!(first.date, first_at);
        assert_eq!(first.kind, InteractionKind::Call);
        assert_eq!(first.note, "");
        assert_eq!(first.outcome, "");

        let second = apply_interaction(
            &mut contact,
            created + Duration::minutes(2),
            InteractionEntry {
                kind: Some(InteractionKind::Sms),
                note: Some("sent brochure".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(contact.interactions.len(), 2);
        assert_eq!(contact.interactions[0], second);
        assert_eq!(contact.interactions[1], first);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn status_and_next_date_change_together() {
        let created = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        let mut contact = normalize(
            created,
            ContactInput {
                next_date: Some(created + Duration::days(1)),
                ..Default::default()
            },
        );
        let now = created + Duration::hours(2);
        apply_interaction(
            &mut contact,
            now,
            InteractionEntry {
                kind: Some(InteractionKind::Call),
                status: Some(Status::Won),
                next_date: Some(None),
                ..Default::default()
            },
        );
        assert_eq!(contact.interactions.len(), 1);
        assert_eq!(contact.status, Status::Won);
        assert!(contact.next_date.is_none());
        assert_eq!(contact.updated_at, now.timestamp_millis());
    }

    #[test]
    fn absent_changes_leave_contact_fields() {
        let created = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        let next = created + Duration::days(1);
        let mut contact = normalize(
            created,
            ContactInput {
                status: Some(Status::Hot),
                next_date: Some(next),
                ..Default::default()
            },
        );
        apply_interaction(&mut contact, created, InteractionEntry::default());
        assert_eq!(contact.status, Status::Hot);
        assert_eq!(contact.next_date, Some(next));
    }
}
