//! The fixed ration-item catalog.
//!
//! Item codes key every needed/donated quantity dictionary across help
//! requests, camps, and donations, so they must stay stable once published.
//! Unknown codes are rejected at the serde boundary (the enum is the map
//! key type), never stored.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownCode;

/// One entry in the relief-goods catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RationItemType {
    DryRations,
    BottledWater,
    CookedMeals,
    FirstAid,
    Medicines,
    BabySupplies,
    SanitaryItems,
    Blankets,
    Clothing,
    MosquitoRepellent,
}

/// Every catalog entry, in display order.
pub const ALL_RATION_ITEMS: &[RationItemType] = &[
    RationItemType::DryRations,
    RationItemType::BottledWater,
    RationItemType::CookedMeals,
    RationItemType::FirstAid,
    RationItemType::Medicines,
    RationItemType::BabySupplies,
    RationItemType::SanitaryItems,
    RationItemType::Blankets,
    RationItemType::Clothing,
    RationItemType::MosquitoRepellent,
];

impl RationItemType {
    /// The stable wire/storage code for this item.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DryRations => "dry_rations",
            Self::BottledWater => "bottled_water",
            Self::CookedMeals => "cooked_meals",
            Self::FirstAid => "first_aid",
            Self::Medicines => "medicines",
            Self::BabySupplies => "baby_supplies",
            Self::SanitaryItems => "sanitary_items",
            Self::Blankets => "blankets",
            Self::Clothing => "clothing",
            Self::MosquitoRepellent => "mosquito_repellent",
        }
    }

    /// Human-readable label for list views and notifications.
    pub fn label(&self) -> &'static str {
        match self {
            Self::DryRations => "Dry Rations",
            Self::BottledWater => "Bottled Water",
            Self::CookedMeals => "Cooked Meals",
            Self::FirstAid => "First Aid",
            Self::Medicines => "Medicines",
            Self::BabySupplies => "Baby Supplies",
            Self::SanitaryItems => "Sanitary Items",
            Self::Blankets => "Blankets",
            Self::Clothing => "Clothing",
            Self::MosquitoRepellent => "Mosquito Repellent",
        }
    }

    /// Display icon shipped to clients alongside the label.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::DryRations => "🍚",
            Self::BottledWater => "💧",
            Self::CookedMeals => "🍛",
            Self::FirstAid => "🩹",
            Self::Medicines => "💊",
            Self::BabySupplies => "🍼",
            Self::SanitaryItems => "🧼",
            Self::Blankets => "🛏️",
            Self::Clothing => "👕",
            Self::MosquitoRepellent => "🦟",
        }
    }
}

impl FromStr for RationItemType {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_RATION_ITEMS
            .iter()
            .find(|item| item.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownCode::new("ration item", s))
    }
}

impl TryFrom<String> for RationItemType {
    type Error = UnknownCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for RationItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
