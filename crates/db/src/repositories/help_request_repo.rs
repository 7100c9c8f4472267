//! Repository for the `help_requests` table.

use std::collections::BTreeMap;

use reliefnet_core::help_request::combined_people_total;
use reliefnet_core::inventory::sanitize_quantities;
use reliefnet_core::ration::RationItemType;
use reliefnet_core::types::DbId;
use sqlx::PgPool;

use crate::models::help_request::{
    CreateHelpRequest, HelpRequest, HelpRequestFilter, UpdateHelpRequest,
};
use crate::models::inventory::InventoryTarget;
use crate::models::summary::{
    BucketCount, HelpRequestSummary, PeopleSummary, PeopleSums, RationItemAggregate,
    RationItemSums,
};
use crate::repositories::InventoryRepo;

const COLUMNS: &str = "id, user_id, latitude, longitude, urgency, note, area, district, \
    contact_type, contact, total_people, elders, children, pets, status, created_at, updated_at";

/// NULL-tolerant filter clause shared by `list` and `count`: a NULL bind
/// disables that condition.
const FILTER_WHERE: &str = "($1::TEXT IS NULL OR urgency = $1)
    AND ($2::TEXT IS NULL OR district = $2)
    AND ($3::DOUBLE PRECISION IS NULL OR latitude >= $3)
    AND ($4::DOUBLE PRECISION IS NULL OR latitude <= $4)
    AND ($5::DOUBLE PRECISION IS NULL OR longitude >= $5)
    AND ($6::DOUBLE PRECISION IS NULL OR longitude <= $6)";

/// Provides CRUD, listing, and summary operations for help requests.
pub struct HelpRequestRepo;

impl HelpRequestRepo {
    /// Insert a help request and its initial inventory rows in one
    /// transaction. Non-positive quantities in `ration_items` are dropped.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateHelpRequest,
    ) -> Result<HelpRequest, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO help_requests
                (user_id, latitude, longitude, urgency, note, area, district,
                 contact_type, contact, total_people, elders, children, pets)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {COLUMNS}"
        );
        let request = sqlx::query_as::<_, HelpRequest>(&query)
            .bind(user_id)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(input.urgency.as_str())
            .bind(&input.note)
            .bind(&input.area)
            .bind(&input.district)
            .bind(input.contact_type.as_str())
            .bind(&input.contact)
            .bind(input.total_people)
            .bind(input.elders)
            .bind(input.children)
            .bind(input.pets)
            .fetch_one(&mut *tx)
            .await?;

        for (item, quantity) in sanitize_quantities(&input.ration_items) {
            InventoryRepo::declare_need(
                &mut *tx,
                InventoryTarget::HelpRequest(request.id),
                item,
                quantity,
                None,
            )
            .await?;
        }

        tx.commit().await?;
        Ok(request)
    }

    /// Find a help request by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<HelpRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM help_requests WHERE id = $1");
        sqlx::query_as::<_, HelpRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List help requests matching the filter, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &HelpRequestFilter,
    ) -> Result<Vec<HelpRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM help_requests
             WHERE {FILTER_WHERE}
             ORDER BY created_at DESC
             LIMIT $7 OFFSET $8"
        );
        sqlx::query_as::<_, HelpRequest>(&query)
            .bind(filter.urgency.map(|u| u.as_str()))
            .bind(filter.district.as_deref())
            .bind(filter.bounds.map(|b| b.min_lat))
            .bind(filter.bounds.map(|b| b.max_lat))
            .bind(filter.bounds.map(|b| b.min_lng))
            .bind(filter.bounds.map(|b| b.max_lng))
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    /// Total rows matching the filter, ignoring pagination. Clients derive
    /// `totalPages` from this.
    pub async fn count(pool: &PgPool, filter: &HelpRequestFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM help_requests WHERE {FILTER_WHERE}");
        let row: (i64,) = sqlx::query_as(&query)
            .bind(filter.urgency.map(|u| u.as_str()))
            .bind(filter.district.as_deref())
            .bind(filter.bounds.map(|b| b.min_lat))
            .bind(filter.bounds.map(|b| b.max_lat))
            .bind(filter.bounds.map(|b| b.min_lng))
            .bind(filter.bounds.map(|b| b.max_lng))
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// List all help requests posted by one user, newest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<HelpRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM help_requests
             WHERE user_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, HelpRequest>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Apply an owner edit. Only non-`None` fields change; a present
    /// `ration_items` map re-declares needed quantities per item.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateHelpRequest,
    ) -> Result<Option<HelpRequest>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE help_requests SET
                latitude = COALESCE($2, latitude),
                longitude = COALESCE($3, longitude),
                urgency = COALESCE($4, urgency),
                note = COALESCE($5, note),
                area = COALESCE($6, area),
                district = COALESCE($7, district),
                contact_type = COALESCE($8, contact_type),
                contact = COALESCE($9, contact),
                total_people = COALESCE($10, total_people),
                elders = COALESCE($11, elders),
                children = COALESCE($12, children),
                pets = COALESCE($13, pets),
                status = COALESCE($14, status),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, HelpRequest>(&query)
            .bind(id)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(input.urgency.map(|u| u.as_str()))
            .bind(input.note.as_deref())
            .bind(input.area.as_deref())
            .bind(input.district.as_deref())
            .bind(input.contact_type.map(|c| c.as_str()))
            .bind(input.contact.as_deref())
            .bind(input.total_people)
            .bind(input.elders)
            .bind(input.children)
            .bind(input.pets)
            .bind(input.status.map(|s| s.as_str()))
            .fetch_optional(&mut *tx)
            .await?;

        let Some(request) = updated else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(ration_items) = &input.ration_items {
            for (item, quantity) in sanitize_quantities(ration_items) {
                InventoryRepo::declare_need(
                    &mut *tx,
                    InventoryTarget::HelpRequest(request.id),
                    item,
                    quantity,
                    None,
                )
                .await?;
            }
        }

        tx.commit().await?;
        Ok(Some(request))
    }

    /// Aggregate view across all help requests for the landing page.
    pub async fn summary(pool: &PgPool) -> Result<HelpRequestSummary, sqlx::Error> {
        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM help_requests")
            .fetch_one(pool)
            .await?;

        let by_urgency = Self::bucket_counts(pool, "urgency").await?;
        let by_status = Self::bucket_counts(pool, "status").await?;
        let by_district = Self::bucket_counts(pool, "district").await?;

        let people: PeopleSums = sqlx::query_as(
            "SELECT SUM(total_people) AS total_people, SUM(elders) AS elders,
                    SUM(children) AS children, SUM(pets) AS pets
             FROM help_requests",
        )
        .fetch_one(pool)
        .await?;

        // SUM over BIGINT yields NUMERIC, hence the casts.
        let item_rows: Vec<RationItemSums> = sqlx::query_as(
            "SELECT item_code,
                    SUM(quantity_needed)::BIGINT AS needed,
                    SUM(quantity_donated)::BIGINT AS donated,
                    SUM(quantity_pending)::BIGINT AS pending,
                    SUM(GREATEST(0, quantity_needed - quantity_donated - quantity_pending))::BIGINT AS remaining,
                    COUNT(*) FILTER (WHERE quantity_needed > 0) AS request_count
             FROM inventory_items
             WHERE help_request_id IS NOT NULL
             GROUP BY item_code
             ORDER BY item_code",
        )
        .fetch_all(pool)
        .await?;

        let distinct_types: (i64,) = sqlx::query_as(
            "SELECT COUNT(DISTINCT item_code) FROM inventory_items
             WHERE help_request_id IS NOT NULL AND quantity_needed > 0",
        )
        .fetch_one(pool)
        .await?;

        let total_people = people.total_people.unwrap_or(0);
        let elders = people.elders.unwrap_or(0);
        let children = people.children.unwrap_or(0);

        let ration_items = item_rows
            .into_iter()
            .filter_map(|row| {
                let item_code: RationItemType = row.item_code.parse().ok()?;
                Some(RationItemAggregate {
                    item_code,
                    label: item_code.label(),
                    icon: item_code.icon(),
                    needed: row.needed.unwrap_or(0),
                    donated: row.donated.unwrap_or(0),
                    pending: row.pending.unwrap_or(0),
                    remaining: row.remaining.unwrap_or(0),
                    request_count: row.request_count,
                })
            })
            .collect();

        Ok(HelpRequestSummary {
            total_requests: total.0,
            by_urgency,
            by_status,
            by_district,
            people: PeopleSummary {
                total_people,
                elders,
                children,
                pets: people.pets.unwrap_or(0),
                combined_total: combined_people_total(total_people, elders, children),
            },
            ration_items,
            total_ration_item_types: distinct_types.0,
        })
    }

    /// One `GROUP BY` roll-up over a low-cardinality column.
    async fn bucket_counts(
        pool: &PgPool,
        column: &'static str,
    ) -> Result<BTreeMap<String, i64>, sqlx::Error> {
        let query = format!(
            "SELECT {column} AS bucket, COUNT(*) AS count FROM help_requests GROUP BY {column}"
        );
        let rows: Vec<BucketCount> = sqlx::query_as(&query).fetch_all(pool).await?;
        Ok(rows.into_iter().map(|r| (r.bucket, r.count)).collect())
    }
}
