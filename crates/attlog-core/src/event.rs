//! Punch events as captured by a biometric terminal.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// A single raw punch as reported by the device.
///
/// One record per physical scan. The device reports events in arrival order,
/// which is not necessarily chronological or grouped by user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPunchEvent {
    /// Enrollment ID of the user who punched.
    pub user_id: UserId,
    /// Device-local timestamp of the scan. Device clocks carry no timezone.
    pub timestamp: NaiveDateTime,
    /// Raw punch code (0 = check in, 1 = check out, anything else is
    /// device-specific and not interpreted).
    pub punch: u8,
}

/// Semantic classification of a punch code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunchKind {
    CheckIn,
    CheckOut,
    /// Any punch code other than 0/1. Carries the original code for
    /// diagnostics; never treated as a check-in or check-out downstream.
    Unknown(u8),
}

impl PunchKind {
    /// Classifies a raw device punch code.
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code {
            0 => Self::CheckIn,
            1 => Self::CheckOut,
            other => Self::Unknown(other),
        }
    }
}

impl std::fmt::Display for PunchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CheckIn => f.write_str("check_in"),
            Self::CheckOut => f.write_str("check_out"),
            Self::Unknown(code) => write!(f, "unknown({code})"),
        }
    }
}

/// A punch event after range filtering, name resolution, and classification.
///
/// One per surviving raw event. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedEvent {
    pub user_id: UserId,
    /// Display name from the user directory, or `"Unknown"` when the
    /// directory has no entry for this ID.
    pub user_name: String,
    pub timestamp: NaiveDateTime,
    pub kind: PunchKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punch_codes_classify() {
        assert_eq!(PunchKind::from_code(0), PunchKind::CheckIn);
        assert_eq!(PunchKind::from_code(1), PunchKind::CheckOut);
        assert_eq!(PunchKind::from_code(7), PunchKind::Unknown(7));
        assert_eq!(PunchKind::from_code(255), PunchKind::Unknown(255));
    }

    #[test]
    fn punch_kind_display_carries_code() {
        assert_eq!(PunchKind::CheckIn.to_string(), "check_in");
        assert_eq!(PunchKind::CheckOut.to_string(), "check_out");
        assert_eq!(PunchKind::Unknown(7).to_string(), "unknown(7)");
    }

    #[test]
    fn raw_event_deserializes_from_dump_line() {
        let line = r#"{"user_id":"1042","timestamp":"2024-01-01T09:00:00","punch":0}"#;
        let event: RawPunchEvent = serde_json::from_str(line).unwrap();
        assert_eq!(event.user_id.as_str(), "1042");
        assert_eq!(event.punch, 0);
        assert_eq!(
            event.timestamp,
            "2024-01-01T09:00:00".parse::<NaiveDateTime>().unwrap()
        );
    }

    #[test]
    fn raw_event_rejects_empty_user_id() {
        let line = r#"{"user_id":"","timestamp":"2024-01-01T09:00:00","punch":0}"#;
        let result: Result<RawPunchEvent, _> = serde_json::from_str(line);
        assert!(result.is_err());
    }

    #[test]
    fn normalized_event_serialization_roundtrip() {
        let event = NormalizedEvent {
            user_id: UserId::new("7").unwrap(),
            user_name: "Nadia".to_string(),
            timestamp: "2024-03-05T08:14:00".parse().unwrap(),
            kind: PunchKind::Unknown(4),
        };

        let json = serde_json::to_string(&event).unwrap();
        let parsed: NormalizedEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }
}
