use crate::domain::ids::InteractionId;
use crate::error::CoreError;
use crate::wire;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    #[default]
    Call,
    Sms,
    Email,
    Note,
}

impl InteractionKind {
    pub const ALL: [InteractionKind; 4] = [
        InteractionKind::Call,
        InteractionKind::Sms,
        InteractionKind::Email,
        InteractionKind::Note,
    ];

    pub fn value(self) -> &'static str {
        match self {
            InteractionKind::Call => "call",
            InteractionKind::Sms => "sms",
            InteractionKind::Email => "email",
            InteractionKind::Note => "note",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InteractionKind::Call => "Call",
            InteractionKind::Sms => "SMS",
            InteractionKind::Email => "Email",
            InteractionKind::Note => "Note",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for InteractionKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        InteractionKind::ALL
            .into_iter()
            .find(|kind| kind.value() == normalized)
            .ok_or_else(|| CoreError::InvalidInteractionKind(s.trim().to_string()))
    }
}

/// Outcome labels offered when logging an interaction. Any other string is
/// accepted as well.
pub const SUGGESTED_OUTCOMES: [(&str, &str); 6] = [
    ("noreply", "No reply"),
    ("callback", "Call back"),
    ("booked", "Meeting booked"),
    ("offer", "Offer sent"),
    ("closed_won", "Deal won"),
    ("closed_lost", "Deal lost"),
];

/// One logged touchpoint. Owned by its contact; never edited after it is
/// appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    #[serde(default, deserialize_with = "wire::or_default")]
    pub id: InteractionId,
    #[serde(default = "crate::time::now_utc", deserialize_with = "wire::datetime_or_now")]
    pub date: DateTime<Utc>,
    #[serde(rename = "type", default, deserialize_with = "wire::or_default")]
    pub kind: InteractionKind,
    #[serde(default, deserialize_with = "wire::or_default")]
    pub note: String,
    #[serde(default, deserialize_with = "wire::or_default")]
    pub outcome: String,
}
