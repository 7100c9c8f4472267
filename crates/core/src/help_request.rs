//! Help-request vocabulary and validation helpers.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownCode;

/// Maximum length of a help request's short note.
pub const MAX_NOTE_LEN: usize = 160;

/// How badly a victim needs aid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

pub const ALL_URGENCIES: &[Urgency] = &[Urgency::Low, Urgency::Medium, Urgency::High];

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for Urgency {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_URGENCIES
            .iter()
            .find(|u| u.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownCode::new("urgency", s))
    }
}

impl TryFrom<String> for Urgency {
    type Error = UnknownCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Lifecycle status of a help request. Requests are never hard-deleted
/// through any visible flow; they move Open -> Scheduled/Completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HelpRequestStatus {
    Open,
    Scheduled,
    Completed,
}

pub const ALL_HELP_REQUEST_STATUSES: &[HelpRequestStatus] = &[
    HelpRequestStatus::Open,
    HelpRequestStatus::Scheduled,
    HelpRequestStatus::Completed,
];

impl HelpRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
        }
    }
}

impl FromStr for HelpRequestStatus {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_HELP_REQUEST_STATUSES
            .iter()
            .find(|st| st.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownCode::new("help request status", s))
    }
}

impl TryFrom<String> for HelpRequestStatus {
    type Error = UnknownCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Validate the short note attached to a help request.
pub fn validate_note(note: &str) -> Result<(), String> {
    if note.trim().is_empty() {
        return Err("Note must not be empty".to_string());
    }
    if note.chars().count() > MAX_NOTE_LEN {
        return Err(format!("Note must be at most {MAX_NOTE_LEN} characters"));
    }
    Ok(())
}

/// Combined headcount shown on the landing page: elders and children are
/// counted on top of the base figure.
pub fn combined_people_total(total_people: i64, elders: i64, children: i64) -> i64 {
    total_people + elders + children
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urgency_codes_round_trip() {
        for urgency in ALL_URGENCIES {
            assert_eq!(urgency.as_str().parse::<Urgency>().unwrap(), *urgency);
        }
    }

    #[test]
    fn unknown_urgency_rejected() {
        assert!("critical".parse::<Urgency>().is_err());
    }

    #[test]
    fn status_codes_round_trip() {
        for status in ALL_HELP_REQUEST_STATUSES {
            assert_eq!(
                status.as_str().parse::<HelpRequestStatus>().unwrap(),
                *status
            );
        }
    }

    #[test]
    fn note_at_limit_passes() {
        let note = "x".repeat(MAX_NOTE_LEN);
        assert!(validate_note(&note).is_ok());
    }

    #[test]
    fn note_over_limit_fails() {
        let note = "x".repeat(MAX_NOTE_LEN + 1);
        let result = validate_note(&note);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("160"));
    }

    #[test]
    fn blank_note_fails() {
        assert!(validate_note("   ").is_err());
    }

    #[test]
    fn note_limit_counts_characters_not_bytes() {
        // 160 multibyte characters is still within the limit.
        let note = "අ".repeat(MAX_NOTE_LEN);
        assert!(validate_note(&note).is_ok());
    }

    #[test]
    fn combined_total_adds_elders_and_children() {
        assert_eq!(combined_people_total(10, 2, 3), 15);
        assert_eq!(combined_people_total(0, 0, 0), 0);
    }
}
