//! Event types, submission groups, and the tagged event itself.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use serde_json::Value;

use esocial_core::error::ValidationError;

/// Supported eSocial event-type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Employer registration and fiscal information.
    S1000,
    /// Establishment table.
    S1005,
    /// Rubric (pay item) table.
    S1010,
    /// Lotação (work unit) table.
    S1020,
    /// Periodic remuneration statement.
    S1200,
    /// Worker admission.
    S2200,
    /// Employment termination.
    S2299,
    /// Worker without an employment relationship.
    S2300,
}

impl EventType {
    /// All supported types, in code order.
    pub const ALL: [Self; 8] = [
        Self::S1000,
        Self::S1005,
        Self::S1010,
        Self::S1020,
        Self::S1200,
        Self::S2200,
        Self::S2299,
        Self::S2300,
    ];

    /// Wire code, e.g. `"S-1200"`.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::S1000 => "S-1000",
            Self::S1005 => "S-1005",
            Self::S1010 => "S-1010",
            Self::S1020 => "S-1020",
            Self::S1200 => "S-1200",
            Self::S2200 => "S-2200",
            Self::S2299 => "S-2299",
            Self::S2300 => "S-2300",
        }
    }

    /// Submission-channel group for this type. Total by construction; every
    /// supported type belongs to exactly one group.
    #[must_use]
    pub fn group(self) -> EventGroup {
        match self {
            Self::S1000 | Self::S1005 | Self::S1010 | Self::S1020 => EventGroup::Tables,
            Self::S2200 | Self::S2299 | Self::S2300 => EventGroup::NonPeriodic,
            Self::S1200 => EventGroup::Periodic,
        }
    }
}

impl FromStr for EventType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "S-1000" => Ok(Self::S1000),
            "S-1005" => Ok(Self::S1005),
            "S-1010" => Ok(Self::S1010),
            "S-1020" => Ok(Self::S1020),
            "S-1200" => Ok(Self::S1200),
            "S-2200" => Ok(Self::S2200),
            "S-2299" => Ok(Self::S2299),
            "S-2300" => Ok(Self::S2300),
            other => Err(ValidationError::UnsupportedEventType(other.to_string())),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for EventType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Submission-channel classification, fixed per event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventGroup {
    /// Initial and table events, channel 1.
    Tables,
    /// Non-periodic events, channel 2.
    NonPeriodic,
    /// Periodic events, channel 3.
    Periodic,
}

impl EventGroup {
    /// Wire number of the submission channel.
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Self::Tables => 1,
            Self::NonPeriodic => 2,
            Self::Periodic => 3,
        }
    }
}

impl fmt::Display for EventGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl Serialize for EventGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.number())
    }
}

/// A single event: type tag plus the loosely-typed payload to normalize.
#[derive(Debug, Clone)]
pub struct Event {
    pub event_type: EventType,
    pub payload: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_code_parses_back_to_its_type() {
        for event_type in EventType::ALL {
            assert_eq!(event_type.code().parse::<EventType>().unwrap(), event_type);
        }
    }

    #[test]
    fn test_unknown_code_is_rejected() {
        let err = "S-9999".parse::<EventType>().unwrap_err();
        assert_eq!(err.to_string(), "unsupported_event_type: S-9999");
    }

    #[test]
    fn test_code_parsing_trims_whitespace() {
        assert_eq!(" S-1200 ".parse::<EventType>().unwrap(), EventType::S1200);
    }

    #[test]
    fn test_group_numbers_match_submission_channels() {
        assert_eq!(EventType::S1000.group().number(), 1);
        assert_eq!(EventType::S1005.group().number(), 1);
        assert_eq!(EventType::S1010.group().number(), 1);
        assert_eq!(EventType::S1020.group().number(), 1);
        assert_eq!(EventType::S2200.group().number(), 2);
        assert_eq!(EventType::S2299.group().number(), 2);
        assert_eq!(EventType::S2300.group().number(), 2);
        assert_eq!(EventType::S1200.group().number(), 3);
    }

    #[test]
    fn test_event_type_serializes_as_its_code() {
        assert_eq!(
            serde_json::to_value(EventType::S1200).unwrap(),
            serde_json::json!("S-1200")
        );
    }

    #[test]
    fn test_event_group_serializes_as_its_number() {
        assert_eq!(
            serde_json::to_value(EventGroup::Periodic).unwrap(),
            serde_json::json!(3)
        );
    }
}
