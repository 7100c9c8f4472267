//! Camp vocabulary: camp type, status, occupancy buckets, and camp needs.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownCode;

/// Who runs the camp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampType {
    Official,
    Community,
}

pub const ALL_CAMP_TYPES: &[CampType] = &[CampType::Official, CampType::Community];

impl CampType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Official => "official",
            Self::Community => "community",
        }
    }
}

impl FromStr for CampType {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_CAMP_TYPES
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownCode::new("camp type", s))
    }
}

impl TryFrom<String> for CampType {
    type Error = UnknownCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Whether the camp is currently operating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampStatus {
    Active,
    Closed,
}

pub const ALL_CAMP_STATUSES: &[CampStatus] = &[CampStatus::Active, CampStatus::Closed];

impl CampStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Closed => "closed",
        }
    }
}

impl FromStr for CampStatus {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_CAMP_STATUSES
            .iter()
            .find(|st| st.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownCode::new("camp status", s))
    }
}

impl TryFrom<String> for CampStatus {
    type Error = UnknownCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Bucketed occupancy, used for quick filtering; the explicit people count
/// lives alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeopleRange {
    #[serde(rename = "0-50")]
    UpTo50,
    #[serde(rename = "51-100")]
    UpTo100,
    #[serde(rename = "101-500")]
    UpTo500,
    #[serde(rename = "500+")]
    Above500,
}

pub const ALL_PEOPLE_RANGES: &[PeopleRange] = &[
    PeopleRange::UpTo50,
    PeopleRange::UpTo100,
    PeopleRange::UpTo500,
    PeopleRange::Above500,
];

impl PeopleRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UpTo50 => "0-50",
            Self::UpTo100 => "51-100",
            Self::UpTo500 => "101-500",
            Self::Above500 => "500+",
        }
    }
}

impl FromStr for PeopleRange {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_PEOPLE_RANGES
            .iter()
            .find(|r| r.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownCode::new("people range", s))
    }
}

impl TryFrom<String> for PeopleRange {
    type Error = UnknownCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Camp-level needs beyond ration items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampNeed {
    Volunteers,
    MedicalStaff,
    Supplies,
    Transport,
    CookingEquipment,
}

pub const ALL_CAMP_NEEDS: &[CampNeed] = &[
    CampNeed::Volunteers,
    CampNeed::MedicalStaff,
    CampNeed::Supplies,
    CampNeed::Transport,
    CampNeed::CookingEquipment,
];

impl CampNeed {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Volunteers => "volunteers",
            Self::MedicalStaff => "medical_staff",
            Self::Supplies => "supplies",
            Self::Transport => "transport",
            Self::CookingEquipment => "cooking_equipment",
        }
    }
}

impl FromStr for CampNeed {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_CAMP_NEEDS
            .iter()
            .find(|n| n.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownCode::new("camp need", s))
    }
}

impl TryFrom<String> for CampNeed {
    type Error = UnknownCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camp_type_round_trips() {
        for t in ALL_CAMP_TYPES {
            assert_eq!(t.as_str().parse::<CampType>().unwrap(), *t);
        }
    }

    #[test]
    fn people_range_codes_round_trip() {
        for range in ALL_PEOPLE_RANGES {
            assert_eq!(range.as_str().parse::<PeopleRange>().unwrap(), *range);
        }
    }

    #[test]
    fn people_range_serde_uses_bucket_labels() {
        let json = serde_json::to_string(&PeopleRange::Above500).unwrap();
        assert_eq!(json, "\"500+\"");

        let parsed: PeopleRange = serde_json::from_str("\"101-500\"").unwrap();
        assert_eq!(parsed, PeopleRange::UpTo500);
    }

    #[test]
    fn camp_need_round_trips() {
        for need in ALL_CAMP_NEEDS {
            assert_eq!(need.as_str().parse::<CampNeed>().unwrap(), *need);
        }
    }

    #[test]
    fn unknown_codes_rejected() {
        assert!("luxury".parse::<CampType>().is_err());
        assert!("1-2".parse::<PeopleRange>().is_err());
        assert!("helicopters".parse::<CampNeed>().is_err());
    }
}
