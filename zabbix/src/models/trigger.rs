use serde::Deserialize;
use std::fmt;

/// Trigger enabled/disabled state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerStatus {
    Enabled,
    Disabled,
}

impl TriggerStatus {
    /// Numeric code sent in `trigger.update`.
    pub fn code(self) -> u8 {
        match self {
            TriggerStatus::Enabled => 0,
            TriggerStatus::Disabled => 1,
        }
    }

    /// Maps the string code returned by `trigger.get`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "0" => Some(TriggerStatus::Enabled),
            "1" => Some(TriggerStatus::Disabled),
            _ => None,
        }
    }
}

impl fmt::Display for TriggerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerStatus::Enabled => f.write_str("Enabled"),
            TriggerStatus::Disabled => f.write_str("Disabled"),
        }
    }
}

/// Trigger record as returned by `trigger.get`. Fields not requested in
/// `output` come back absent and default to empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Trigger {
    #[serde(default)]
    pub triggerid: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: String,
}

impl Trigger {
    pub fn status(&self) -> Option<TriggerStatus> {
        TriggerStatus::from_code(&self.status)
    }
}
