//! Volunteer club and membership models.

use reliefnet_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `volunteer_clubs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerClub {
    pub id: DbId,
    pub name: String,
    pub district: Option<String>,
    /// The club's linked owner user, if any. At most one per club.
    pub user_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a new club. The caller becomes the linked owner.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVolunteerClub {
    pub name: String,
    pub district: Option<String>,
}

/// A row from the `club_memberships` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubMembership {
    pub id: DbId,
    pub club_id: DbId,
    pub user_id: DbId,
    pub created_at: Timestamp,
}
