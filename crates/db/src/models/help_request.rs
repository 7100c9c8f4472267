//! Help request entity model and DTOs.

use std::collections::BTreeMap;

use reliefnet_core::contact::ContactType;
use reliefnet_core::geo::BoundingBox;
use reliefnet_core::help_request::{HelpRequestStatus, Urgency};
use reliefnet_core::ration::RationItemType;
use reliefnet_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `help_requests` table.
///
/// Requested item quantities are NOT here -- they live in inventory rows
/// and are exposed through views and the inventory endpoint.
#[derive(Debug, Clone, FromRow)]
pub struct HelpRequest {
    pub id: DbId,
    pub user_id: DbId,
    pub latitude: f64,
    pub longitude: f64,
    #[sqlx(try_from = "String")]
    pub urgency: Urgency,
    pub note: String,
    pub area: String,
    pub district: String,
    #[sqlx(try_from = "String")]
    pub contact_type: ContactType,
    pub contact: String,
    pub total_people: Option<i32>,
    pub elders: Option<i32>,
    pub children: Option<i32>,
    pub pets: Option<i32>,
    #[sqlx(try_from = "String")]
    pub status: HelpRequestStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl HelpRequest {
    /// Shape the row for the wire. `ration_items` is the code array of
    /// items with a declared need; `is_owner` is a per-caller flag, omitted
    /// from contexts where it has no meaning.
    pub fn into_view(
        self,
        ration_items: Vec<RationItemType>,
        is_owner: Option<bool>,
    ) -> HelpRequestView {
        HelpRequestView {
            id: self.id,
            user_id: self.user_id,
            latitude: self.latitude,
            longitude: self.longitude,
            urgency: self.urgency,
            note: self.note,
            area: self.area,
            district: self.district,
            contact_type: self.contact_type,
            contact: self.contact,
            total_people: self.total_people,
            elders: self.elders,
            children: self.children,
            pets: self.pets,
            status: self.status,
            ration_items,
            is_owner,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Wire shape of a help request.
///
/// Note the creation/response asymmetry: creation takes a code->quantity
/// map, but the response exposes only the codes. Quantities are consulted
/// through the inventory endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpRequestView {
    pub id: DbId,
    pub user_id: DbId,
    pub latitude: f64,
    pub longitude: f64,
    pub urgency: Urgency,
    pub note: String,
    pub area: String,
    pub district: String,
    pub contact_type: ContactType,
    pub contact: String,
    pub total_people: Option<i32>,
    pub elders: Option<i32>,
    pub children: Option<i32>,
    pub pets: Option<i32>,
    pub status: HelpRequestStatus,
    /// Codes of items this request declared a need for.
    pub ration_items: Vec<RationItemType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_owner: Option<bool>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a help request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHelpRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub urgency: Urgency,
    pub note: String,
    pub area: String,
    pub district: String,
    pub contact_type: ContactType,
    pub contact: String,
    pub total_people: Option<i32>,
    pub elders: Option<i32>,
    pub children: Option<i32>,
    pub pets: Option<i32>,
    /// Code -> quantity. Non-positive entries are filtered server-side.
    #[serde(default)]
    pub ration_items: BTreeMap<RationItemType, i64>,
}

/// DTO for owner edits. Only non-`None` fields are applied; a present
/// `ration_items` map upserts needed quantities per item.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHelpRequest {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub urgency: Option<Urgency>,
    pub note: Option<String>,
    pub area: Option<String>,
    pub district: Option<String>,
    pub contact_type: Option<ContactType>,
    pub contact: Option<String>,
    pub total_people: Option<i32>,
    pub elders: Option<i32>,
    pub children: Option<i32>,
    pub pets: Option<i32>,
    pub status: Option<HelpRequestStatus>,
    pub ration_items: Option<BTreeMap<RationItemType, i64>>,
}

/// Repository-level list filter.
#[derive(Debug, Clone, Default)]
pub struct HelpRequestFilter {
    pub urgency: Option<Urgency>,
    pub district: Option<String>,
    pub bounds: Option<BoundingBox>,
    pub limit: i64,
    pub offset: i64,
}
