//! Aggregate summary types for the landing page.

use std::collections::BTreeMap;

use reliefnet_core::ration::RationItemType;
use serde::Serialize;
use sqlx::FromRow;

/// `GROUP BY` row: one bucket (urgency, status, or district) and its count.
#[derive(Debug, Clone, FromRow)]
pub struct BucketCount {
    pub bucket: String,
    pub count: i64,
}

/// `SUM` row over the demographic columns.
#[derive(Debug, Clone, FromRow)]
pub struct PeopleSums {
    pub total_people: Option<i64>,
    pub elders: Option<i64>,
    pub children: Option<i64>,
    pub pets: Option<i64>,
}

/// Per-item aggregate row over help-request inventory.
#[derive(Debug, Clone, FromRow)]
pub struct RationItemSums {
    pub item_code: String,
    pub needed: Option<i64>,
    pub donated: Option<i64>,
    pub pending: Option<i64>,
    pub remaining: Option<i64>,
    pub request_count: i64,
}

/// Wire shape of the per-item aggregate.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RationItemAggregate {
    pub item_code: RationItemType,
    pub label: &'static str,
    pub icon: &'static str,
    pub needed: i64,
    pub donated: i64,
    pub pending: i64,
    /// Sum of per-row clamped remaining counts, never negative.
    pub remaining: i64,
    /// How many help requests declared a need for this item.
    pub request_count: i64,
}

/// People totals across all help requests. `combined_total` counts elders
/// and children on top of the base figure.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeopleSummary {
    pub total_people: i64,
    pub elders: i64,
    pub children: i64,
    pub pets: i64,
    pub combined_total: i64,
}

/// `GET /help-requests/summary` response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpRequestSummary {
    pub total_requests: i64,
    pub by_urgency: BTreeMap<String, i64>,
    pub by_status: BTreeMap<String, i64>,
    pub by_district: BTreeMap<String, i64>,
    pub people: PeopleSummary,
    pub ration_items: Vec<RationItemAggregate>,
    /// Count of distinct item codes with a declared need -- NOT a quantity
    /// sum.
    pub total_ration_item_types: i64,
}
