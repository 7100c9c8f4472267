//! Repository for the `donations` and `donation_items` tables.
//!
//! Donation writes and their inventory side effects always share one
//! transaction so pledge counts never tear.

use std::collections::BTreeMap;

use reliefnet_core::ration::RationItemType;
use reliefnet_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::donation::{Donation, DonationItem};
use crate::models::inventory::InventoryTarget;
use crate::repositories::InventoryRepo;

const COLUMNS: &str = "id, help_request_id, camp_id, donator_id, donator_name, \
    donator_mobile_number, donator_marked_scheduled, donator_marked_completed, \
    owner_marked_completed, created_at, updated_at";

const ITEM_COLUMNS: &str = "id, donation_id, item_code, quantity";

/// Provides donation persistence and lifecycle transitions.
pub struct DonationRepo;

impl DonationRepo {
    /// Insert a donation with its items and record the pledge against the
    /// target's inventory, all in one transaction.
    ///
    /// With `auto_approve`, the pending phase is skipped entirely: donated
    /// grows directly and the donation starts owner-confirmed.
    pub async fn create(
        pool: &PgPool,
        target: InventoryTarget,
        donator_id: DbId,
        donator_name: &str,
        donator_mobile_number: &str,
        ration_items: &BTreeMap<RationItemType, i64>,
        auto_approve: bool,
    ) -> Result<Donation, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO donations
                (help_request_id, camp_id, donator_id, donator_name,
                 donator_mobile_number, owner_marked_completed)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let donation = sqlx::query_as::<_, Donation>(&query)
            .bind(target.help_request_id())
            .bind(target.camp_id())
            .bind(donator_id)
            .bind(donator_name)
            .bind(donator_mobile_number)
            .bind(auto_approve)
            .fetch_one(&mut *tx)
            .await?;

        for (item, quantity) in ration_items {
            Self::insert_item(&mut *tx, donation.id, *item, *quantity).await?;
            if auto_approve {
                InventoryRepo::add_donated(&mut *tx, target, *item, *quantity).await?;
            } else {
                InventoryRepo::add_pending(&mut *tx, target, *item, *quantity).await?;
            }
        }

        tx.commit().await?;
        Ok(donation)
    }

    async fn insert_item<'a>(
        executor: impl PgExecutor<'a>,
        donation_id: DbId,
        item: RationItemType,
        quantity: i64,
    ) -> Result<DonationItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO donation_items (donation_id, item_code, quantity)
             VALUES ($1, $2, $3)
             RETURNING {ITEM_COLUMNS}"
        );
        sqlx::query_as::<_, DonationItem>(&query)
            .bind(donation_id)
            .bind(item.as_str())
            .bind(quantity)
            .fetch_one(executor)
            .await
    }

    /// Find a donation by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Donation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM donations WHERE id = $1");
        sqlx::query_as::<_, Donation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all donations against one help request, oldest first.
    pub async fn list_by_help_request(
        pool: &PgPool,
        help_request_id: DbId,
    ) -> Result<Vec<Donation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM donations
             WHERE help_request_id = $1
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Donation>(&query)
            .bind(help_request_id)
            .fetch_all(pool)
            .await
    }

    /// List all donations against one camp, oldest first.
    pub async fn list_by_camp(pool: &PgPool, camp_id: DbId) -> Result<Vec<Donation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM donations
             WHERE camp_id = $1
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Donation>(&query)
            .bind(camp_id)
            .fetch_all(pool)
            .await
    }

    /// List one donor's donations, newest first.
    pub async fn list_by_donator(
        pool: &PgPool,
        donator_id: DbId,
    ) -> Result<Vec<Donation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM donations
             WHERE donator_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Donation>(&query)
            .bind(donator_id)
            .fetch_all(pool)
            .await
    }

    /// Pledged items for a set of donations, grouped per donation.
    pub async fn items_for_many(
        pool: &PgPool,
        donation_ids: &[DbId],
    ) -> Result<BTreeMap<DbId, BTreeMap<RationItemType, i64>>, sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM donation_items
             WHERE donation_id = ANY($1)
             ORDER BY donation_id, item_code"
        );
        let rows: Vec<DonationItem> = sqlx::query_as(&query)
            .bind(donation_ids)
            .fetch_all(pool)
            .await?;

        let mut grouped: BTreeMap<DbId, BTreeMap<RationItemType, i64>> = BTreeMap::new();
        for row in rows {
            grouped
                .entry(row.donation_id)
                .or_default()
                .insert(row.item_code, row.quantity);
        }
        Ok(grouped)
    }

    /// Pledged items for a single donation.
    pub async fn items_for(
        pool: &PgPool,
        donation_id: DbId,
    ) -> Result<BTreeMap<RationItemType, i64>, sqlx::Error> {
        Ok(Self::items_for_many(pool, &[donation_id])
            .await?
            .remove(&donation_id)
            .unwrap_or_default())
    }

    /// Set `donator_marked_scheduled`. Idempotent: marking an already-set
    /// flag returns the row unchanged with no side effect.
    pub async fn mark_scheduled(pool: &PgPool, id: DbId) -> Result<Option<Donation>, sqlx::Error> {
        Self::mark_flag(pool, id, "donator_marked_scheduled").await
    }

    /// Set `donator_marked_completed`. Independent of the scheduled flag.
    pub async fn mark_completed_by_donator(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Donation>, sqlx::Error> {
        Self::mark_flag(pool, id, "donator_marked_completed").await
    }

    async fn mark_flag(
        pool: &PgPool,
        id: DbId,
        flag: &'static str,
    ) -> Result<Option<Donation>, sqlx::Error> {
        let query = format!(
            "UPDATE donations
             SET {flag} = TRUE,
                 updated_at = CASE WHEN {flag} THEN updated_at ELSE NOW() END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Donation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Owner confirmation: set `owner_marked_completed` and move this
    /// donation's pledged quantities from pending to donated.
    ///
    /// The flag flip and the inventory moves share a transaction, and the
    /// moves run only when the flag actually transitions -- confirming an
    /// already-confirmed donation is a pure no-op, so quantities are never
    /// double-counted.
    pub async fn confirm_by_owner(
        pool: &PgPool,
        donation: &Donation,
        target: InventoryTarget,
    ) -> Result<Donation, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE donations SET owner_marked_completed = TRUE, updated_at = NOW()
             WHERE id = $1 AND owner_marked_completed = FALSE
             RETURNING {COLUMNS}"
        );
        let newly_confirmed = sqlx::query_as::<_, Donation>(&query)
            .bind(donation.id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(updated) = newly_confirmed else {
            tx.rollback().await?;
            return Ok(donation.clone());
        };

        let item_query = format!(
            "SELECT {ITEM_COLUMNS} FROM donation_items WHERE donation_id = $1"
        );
        let items: Vec<DonationItem> = sqlx::query_as(&item_query)
            .bind(donation.id)
            .fetch_all(&mut *tx)
            .await?;

        for item in items {
            InventoryRepo::confirm(&mut *tx, target, item.item_code, item.quantity).await?;
        }

        tx.commit().await?;
        Ok(updated)
    }
}
