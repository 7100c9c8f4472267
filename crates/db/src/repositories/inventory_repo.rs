//! Repository for the `inventory_items` table.
//!
//! The reconciliation math is enforced here in SQL: additive increments,
//! `GREATEST(0, ...)` clamps, and upserts keyed on the per-target partial
//! unique indexes. Write methods take `impl PgExecutor` so donation and
//! help-request creation can run them inside one transaction.

use reliefnet_core::ration::RationItemType;
use sqlx::{PgExecutor, PgPool};

use crate::models::inventory::{InventoryItem, InventoryTarget};

const COLUMNS: &str = "id, help_request_id, camp_id, item_code, quantity_needed, \
    quantity_donated, quantity_pending, notes, created_at, updated_at";

/// The `ON CONFLICT` target matching the partial unique index for a given
/// inventory target.
fn conflict_clause(target: &InventoryTarget) -> &'static str {
    match target {
        InventoryTarget::HelpRequest(_) => {
            "(help_request_id, item_code) WHERE help_request_id IS NOT NULL"
        }
        InventoryTarget::Camp(_) => "(camp_id, item_code) WHERE camp_id IS NOT NULL",
    }
}

/// Provides the reconciliation operations over inventory rows.
pub struct InventoryRepo;

impl InventoryRepo {
    /// Idempotent upsert of a row's needed quantity (and notes).
    ///
    /// Called once per item at help-request/camp creation and edit. The
    /// caller is responsible for filtering non-positive quantities first.
    pub async fn declare_need<'a>(
        executor: impl PgExecutor<'a>,
        target: InventoryTarget,
        item: RationItemType,
        quantity: i64,
        notes: Option<&str>,
    ) -> Result<InventoryItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO inventory_items
                (help_request_id, camp_id, item_code, quantity_needed, notes)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT {conflict} DO UPDATE
             SET quantity_needed = EXCLUDED.quantity_needed,
                 notes = COALESCE(EXCLUDED.notes, inventory_items.notes),
                 updated_at = NOW()
             RETURNING {COLUMNS}",
            conflict = conflict_clause(&target),
        );
        sqlx::query_as::<_, InventoryItem>(&query)
            .bind(target.help_request_id())
            .bind(target.camp_id())
            .bind(item.as_str())
            .bind(quantity)
            .bind(notes)
            .fetch_one(executor)
            .await
    }

    /// Record a new pledge: `quantity_pending += quantity`.
    ///
    /// There is no reservation and no cap against remaining -- concurrent
    /// donors may overcommit, and the row is auto-created with a zero need
    /// when the donation references an item nobody asked for.
    pub async fn add_pending<'a>(
        executor: impl PgExecutor<'a>,
        target: InventoryTarget,
        item: RationItemType,
        quantity: i64,
    ) -> Result<InventoryItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO inventory_items
                (help_request_id, camp_id, item_code, quantity_pending)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT {conflict} DO UPDATE
             SET quantity_pending = inventory_items.quantity_pending + EXCLUDED.quantity_pending,
                 updated_at = NOW()
             RETURNING {COLUMNS}",
            conflict = conflict_clause(&target),
        );
        sqlx::query_as::<_, InventoryItem>(&query)
            .bind(target.help_request_id())
            .bind(target.camp_id())
            .bind(item.as_str())
            .bind(quantity)
            .fetch_one(executor)
            .await
    }

    /// Confirm a pledge: move `quantity` from pending to donated. The
    /// pending side clamps at zero so a confirm can never drive it
    /// negative.
    pub async fn confirm<'a>(
        executor: impl PgExecutor<'a>,
        target: InventoryTarget,
        item: RationItemType,
        quantity: i64,
    ) -> Result<InventoryItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO inventory_items
                (help_request_id, camp_id, item_code, quantity_donated)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT {conflict} DO UPDATE
             SET quantity_pending = GREATEST(0, inventory_items.quantity_pending - EXCLUDED.quantity_donated),
                 quantity_donated = inventory_items.quantity_donated + EXCLUDED.quantity_donated,
                 updated_at = NOW()
             RETURNING {COLUMNS}",
            conflict = conflict_clause(&target),
        );
        sqlx::query_as::<_, InventoryItem>(&query)
            .bind(target.help_request_id())
            .bind(target.camp_id())
            .bind(item.as_str())
            .bind(quantity)
            .fetch_one(executor)
            .await
    }

    /// Record an auto-approved contribution: donated grows without a
    /// pending phase, leaving other donors' pledges untouched.
    pub async fn add_donated<'a>(
        executor: impl PgExecutor<'a>,
        target: InventoryTarget,
        item: RationItemType,
        quantity: i64,
    ) -> Result<InventoryItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO inventory_items
                (help_request_id, camp_id, item_code, quantity_donated)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT {conflict} DO UPDATE
             SET quantity_donated = inventory_items.quantity_donated + EXCLUDED.quantity_donated,
                 updated_at = NOW()
             RETURNING {COLUMNS}",
            conflict = conflict_clause(&target),
        );
        sqlx::query_as::<_, InventoryItem>(&query)
            .bind(target.help_request_id())
            .bind(target.camp_id())
            .bind(item.as_str())
            .bind(quantity)
            .fetch_one(executor)
            .await
    }

    /// List all inventory rows of a target, in catalog code order.
    pub async fn list_for(
        pool: &PgPool,
        target: InventoryTarget,
    ) -> Result<Vec<InventoryItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM inventory_items
             WHERE (help_request_id = $1 AND $1 IS NOT NULL)
                OR (camp_id = $2 AND $2 IS NOT NULL)
             ORDER BY item_code ASC"
        );
        sqlx::query_as::<_, InventoryItem>(&query)
            .bind(target.help_request_id())
            .bind(target.camp_id())
            .fetch_all(pool)
            .await
    }

    /// Item codes with a declared need (`quantity_needed > 0`) for a set of
    /// help requests. Returned as `(help_request_id, item_code)` pairs so
    /// list views can be assembled in one round trip.
    pub async fn requested_codes_for_requests(
        pool: &PgPool,
        help_request_ids: &[i64],
    ) -> Result<Vec<(i64, String)>, sqlx::Error> {
        sqlx::query_as::<_, (i64, String)>(
            "SELECT help_request_id, item_code FROM inventory_items
             WHERE help_request_id = ANY($1) AND quantity_needed > 0
             ORDER BY help_request_id, item_code",
        )
        .bind(help_request_ids)
        .fetch_all(pool)
        .await
    }
}
