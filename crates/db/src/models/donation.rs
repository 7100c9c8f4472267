//! Donation entity model and DTOs.

use std::collections::BTreeMap;

use reliefnet_core::donation::{EffectiveStatus, ProgressFlags};
use reliefnet_core::ration::RationItemType;
use reliefnet_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `donations` table.
///
/// Deliberately NOT `Serialize`: the donator's name and mobile number are
/// behind a privacy boundary, so every wire representation goes through
/// [`Donation::into_view`].
#[derive(Debug, Clone, FromRow)]
pub struct Donation {
    pub id: DbId,
    pub help_request_id: Option<DbId>,
    pub camp_id: Option<DbId>,
    pub donator_id: DbId,
    pub donator_name: String,
    pub donator_mobile_number: String,
    pub donator_marked_scheduled: bool,
    pub donator_marked_completed: bool,
    pub owner_marked_completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Donation {
    pub fn progress(&self) -> ProgressFlags {
        ProgressFlags {
            donator_marked_scheduled: self.donator_marked_scheduled,
            donator_marked_completed: self.donator_marked_completed,
            owner_marked_completed: self.owner_marked_completed,
        }
    }

    /// Shape the row for the wire. Contact fields are stripped unless
    /// `show_contact_info` -- the caller decides via the visibility policy,
    /// and this method guarantees hidden fields never serialize.
    pub fn into_view(
        self,
        ration_items: BTreeMap<RationItemType, i64>,
        show_contact_info: bool,
    ) -> DonationView {
        let effective_status = self.progress().effective_status();
        DonationView {
            id: self.id,
            help_request_id: self.help_request_id,
            camp_id: self.camp_id,
            donator_id: self.donator_id,
            donator_name: show_contact_info.then_some(self.donator_name),
            donator_mobile_number: show_contact_info.then_some(self.donator_mobile_number),
            show_contact_info,
            ration_items,
            donator_marked_scheduled: self.donator_marked_scheduled,
            donator_marked_completed: self.donator_marked_completed,
            owner_marked_completed: self.owner_marked_completed,
            effective_status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Wire shape of a donation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationView {
    pub id: DbId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_request_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camp_id: Option<DbId>,
    pub donator_id: DbId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donator_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donator_mobile_number: Option<String>,
    pub show_contact_info: bool,
    /// Code -> pledged quantity.
    pub ration_items: BTreeMap<RationItemType, i64>,
    pub donator_marked_scheduled: bool,
    pub donator_marked_completed: bool,
    pub owner_marked_completed: bool,
    pub effective_status: EffectiveStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `donation_items` table.
#[derive(Debug, Clone, FromRow)]
pub struct DonationItem {
    pub id: DbId,
    pub donation_id: DbId,
    #[sqlx(try_from = "String")]
    pub item_code: RationItemType,
    pub quantity: i64,
}

/// DTO for creating a donation against a help request or camp.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDonation {
    pub donator_name: String,
    pub donator_mobile_number: String,
    /// Code -> quantity pledged. Non-positive entries are filtered
    /// server-side.
    pub ration_items: BTreeMap<RationItemType, i64>,
    /// Skip the pending state and confirm immediately. Camp donations
    /// only, restricted to the owning club's user or an admin.
    #[serde(default)]
    pub auto_approve: bool,
}
