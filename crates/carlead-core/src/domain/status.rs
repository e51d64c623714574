use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sales-pipeline stage of a contact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    New,
    #[default]
    ToCall,
    Waiting,
    Followup,
    Hot,
    Won,
    Lost,
}

impl Status {
    /// Display order used by selectors and listings.
    pub const ALL: [Status; 7] = [
        Status::New,
        Status::ToCall,
        Status::Waiting,
        Status::Followup,
        Status::Hot,
        Status::Won,
        Status::Lost,
    ];

    pub fn value(self) -> &'static str {
        match self {
            Status::New => "new",
            Status::ToCall => "to_call",
            Status::Waiting => "waiting",
            Status::Followup => "followup",
            Status::Hot => "hot",
            Status::Won => "won",
            Status::Lost => "lost",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::New => "New",
            Status::ToCall => "To call",
            Status::Waiting => "Waiting for reply",
            Status::Followup => "Follow-up",
            Status::Hot => "Hot",
            Status::Won => "Won",
            Status::Lost => "Lost",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for Status {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Status::ALL
            .into_iter()
            .find(|status| status.value() == normalized)
            .ok_or_else(|| CoreError::InvalidStatus(s.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::Status;

    #[test]
    fn parse_accepts_values_and_dashes() {
        assert_eq!("to_call".parse::<Status>().unwrap(), Status::ToCall);
        assert_eq!("To-Call".parse::<Status>().unwrap(), Status::ToCall);
        assert_eq!("won".parse::<Status>().unwrap(), Status::Won);
        assert!("pending".parse::<Status>().is_err());
    }

    #[test]
    fn serde_uses_wire_values() {
        let json = serde_json::to_string(&Status::Followup).unwrap();
        assert_eq!(json, "\"followup\"");
        let parsed: Status = serde_json::from_str("\"to_call\"").unwrap();
        assert_eq!(parsed, Status::ToCall);
    }
}
