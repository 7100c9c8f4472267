//! Inventory row model: per-(target, item) needed/donated/pending counts.

use reliefnet_core::inventory::InventoryLevels;
use reliefnet_core::ration::RationItemType;
use reliefnet_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// The target an inventory row (or a donation) belongs to: exactly one of
/// a help request or a camp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryTarget {
    HelpRequest(DbId),
    Camp(DbId),
}

impl InventoryTarget {
    pub fn help_request_id(&self) -> Option<DbId> {
        match self {
            Self::HelpRequest(id) => Some(*id),
            Self::Camp(_) => None,
        }
    }

    pub fn camp_id(&self) -> Option<DbId> {
        match self {
            Self::HelpRequest(_) => None,
            Self::Camp(id) => Some(*id),
        }
    }
}

/// A row from the `inventory_items` table.
#[derive(Debug, Clone, FromRow)]
pub struct InventoryItem {
    pub id: DbId,
    pub help_request_id: Option<DbId>,
    pub camp_id: Option<DbId>,
    #[sqlx(try_from = "String")]
    pub item_code: RationItemType,
    pub quantity_needed: i64,
    pub quantity_donated: i64,
    pub quantity_pending: i64,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl InventoryItem {
    pub fn levels(&self) -> InventoryLevels {
        InventoryLevels::new(
            self.quantity_needed,
            self.quantity_donated,
            self.quantity_pending,
        )
    }

    /// `max(0, needed - donated - pending)`.
    pub fn remaining(&self) -> i64 {
        self.levels().remaining()
    }
}

/// Wire shape of an inventory row, with the derived remaining count and
/// catalog display metadata included.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemView {
    pub id: DbId,
    pub item_code: RationItemType,
    pub label: &'static str,
    pub icon: &'static str,
    pub quantity_needed: i64,
    pub quantity_donated: i64,
    pub quantity_pending: i64,
    pub remaining: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<InventoryItem> for InventoryItemView {
    fn from(row: InventoryItem) -> Self {
        let remaining = row.remaining();
        Self {
            id: row.id,
            item_code: row.item_code,
            label: row.item_code.label(),
            icon: row.item_code.icon(),
            quantity_needed: row.quantity_needed,
            quantity_donated: row.quantity_donated,
            quantity_pending: row.quantity_pending,
            remaining,
            notes: row.notes,
        }
    }
}
