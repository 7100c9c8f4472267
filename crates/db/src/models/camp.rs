//! Camp entity model and DTOs.

use reliefnet_core::camp::{CampNeed, CampStatus, CampType, PeopleRange};
use reliefnet_core::contact::ContactType;
use reliefnet_core::geo::BoundingBox;
use reliefnet_core::ration::RationItemType;
use reliefnet_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `camps` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Camp {
    pub id: DbId,
    pub club_id: DbId,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub camp_type: CampType,
    #[sqlx(try_from = "String")]
    pub status: CampStatus,
    #[sqlx(try_from = "String")]
    pub people_range: PeopleRange,
    pub people_count: Option<i32>,
    pub district: String,
    pub latitude: f64,
    pub longitude: f64,
    #[sqlx(try_from = "String")]
    pub contact_type: ContactType,
    pub contact: String,
    /// Camp-need codes; validated against the vocabulary at the boundary.
    pub needs: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Camp detail view: the row plus its drop-off locations and
/// cross-reference links.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampDetailView {
    #[serde(flatten)]
    pub camp: Camp,
    pub drop_off_locations: Vec<DropOffLocation>,
    pub help_request_ids: Vec<DbId>,
    pub donation_ids: Vec<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_owner: Option<bool>,
}

/// A row from the `camp_drop_off_locations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DropOffLocation {
    pub id: DbId,
    pub camp_id: DbId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub contact_type: Option<String>,
    pub contact: Option<String>,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub created_at: Timestamp,
}

/// One drop-off point in a camp creation request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDropOffLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub contact_type: Option<ContactType>,
    pub contact: Option<String>,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
}

/// One initial inventory entry in a camp creation request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampItem {
    pub item_type: RationItemType,
    pub quantity: i64,
    pub notes: Option<String>,
}

/// DTO for creating a camp. `items` seeds the camp's inventory;
/// `help_request_ids` / `donation_ids` are optional cross-references.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCamp {
    pub club_id: DbId,
    pub name: String,
    pub camp_type: CampType,
    pub people_range: PeopleRange,
    pub people_count: Option<i32>,
    pub district: String,
    pub latitude: f64,
    pub longitude: f64,
    pub contact_type: ContactType,
    pub contact: String,
    #[serde(default)]
    pub needs: Vec<CampNeed>,
    #[serde(default)]
    pub drop_off_locations: Vec<CreateDropOffLocation>,
    #[serde(default)]
    pub items: Vec<CreateCampItem>,
    #[serde(default)]
    pub help_request_ids: Vec<DbId>,
    #[serde(default)]
    pub donation_ids: Vec<DbId>,
}

/// DTO for camp edits. Only non-`None` fields are applied; a present
/// `items` list upserts needed quantities.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCamp {
    pub name: Option<String>,
    pub camp_type: Option<CampType>,
    pub status: Option<CampStatus>,
    pub people_range: Option<PeopleRange>,
    pub people_count: Option<i32>,
    pub district: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub contact_type: Option<ContactType>,
    pub contact: Option<String>,
    pub needs: Option<Vec<CampNeed>>,
    pub items: Option<Vec<CreateCampItem>>,
}

/// Repository-level list filter.
#[derive(Debug, Clone, Default)]
pub struct CampFilter {
    pub camp_type: Option<CampType>,
    pub needs: Option<Vec<CampNeed>>,
    pub district: Option<String>,
    pub bounds: Option<BoundingBox>,
    pub limit: i64,
    pub offset: i64,
}
