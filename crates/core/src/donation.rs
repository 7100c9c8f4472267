//! Donation lifecycle rules.
//!
//! A donation carries three independent boolean flags instead of a single
//! status enum, because the donor and the recipient each attest completion
//! separately (a physical handoff confirmed by both sides). The flags are
//! monotonic: they only ever move from false to true, and marking an
//! already-set flag is an idempotent no-op.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// The three progress flags of a donation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressFlags {
    pub donator_marked_scheduled: bool,
    pub donator_marked_completed: bool,
    pub owner_marked_completed: bool,
}

/// Read-only status derived from the flags for display purposes.
///
/// A donation counts as completed as soon as EITHER side confirms; the
/// OR lives here so call sites never re-derive it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectiveStatus {
    Pending,
    Scheduled,
    Completed,
}

impl ProgressFlags {
    pub fn effective_status(&self) -> EffectiveStatus {
        if self.donator_marked_completed || self.owner_marked_completed {
            EffectiveStatus::Completed
        } else if self.donator_marked_scheduled {
            EffectiveStatus::Scheduled
        } else {
            EffectiveStatus::Pending
        }
    }
}

/// One of the three "mark as X" transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMark {
    Scheduled,
    CompletedByDonator,
    CompletedByOwner,
}

impl ProgressMark {
    /// Check that the caller may apply this mark.
    ///
    /// Scheduled and completed-by-donator belong to the donator alone;
    /// completed-by-owner belongs to the resolved owner of the referenced
    /// help request or camp. No other principal may mutate the flags.
    pub fn authorize(&self, is_donator: bool, is_owner: bool) -> Result<(), CoreError> {
        let allowed = match self {
            ProgressMark::Scheduled | ProgressMark::CompletedByDonator => is_donator,
            ProgressMark::CompletedByOwner => is_owner,
        };
        if allowed {
            Ok(())
        } else {
            Err(CoreError::Forbidden(
                "You are not allowed to update this donation".into(),
            ))
        }
    }
}

/// Whether `viewer` may see the donator's name and mobile number.
///
/// This is a privacy boundary, not a display choice: only the donator
/// themselves and the owner of the donation's target qualify, regardless
/// of what the client requests.
pub fn can_view_donator_contact(viewer: DbId, donator: DbId, target_owner: DbId) -> bool {
    viewer == donator || viewer == target_owner
}
