//! Repository for the `camps` table and its satellites (drop-off
//! locations, cross-reference links).

use reliefnet_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::camp::{
    Camp, CampFilter, CreateCamp, CreateDropOffLocation, DropOffLocation, UpdateCamp,
};
use crate::models::inventory::InventoryTarget;
use crate::repositories::InventoryRepo;

const COLUMNS: &str = "id, club_id, name, camp_type, status, people_range, people_count, \
    district, latitude, longitude, contact_type, contact, needs, created_at, updated_at";

const DROP_OFF_COLUMNS: &str = "id, camp_id, name, latitude, longitude, contact_type, \
    contact, open_time, close_time, created_at";

/// NULL-tolerant filter clause shared by `list` and `count`. The needs
/// filter uses array overlap: any requested need present on the camp
/// matches.
const FILTER_WHERE: &str = "($1::TEXT IS NULL OR camp_type = $1)
    AND ($2::TEXT[] IS NULL OR needs && $2)
    AND ($3::TEXT IS NULL OR district = $3)
    AND ($4::DOUBLE PRECISION IS NULL OR latitude >= $4)
    AND ($5::DOUBLE PRECISION IS NULL OR latitude <= $5)
    AND ($6::DOUBLE PRECISION IS NULL OR longitude >= $6)
    AND ($7::DOUBLE PRECISION IS NULL OR longitude <= $7)";

/// Provides CRUD and listing operations for camps.
pub struct CampRepo;

impl CampRepo {
    /// Insert a camp with its drop-off locations, initial inventory, and
    /// cross-reference links in one transaction.
    pub async fn create(pool: &PgPool, input: &CreateCamp) -> Result<Camp, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let needs: Vec<String> = input.needs.iter().map(|n| n.as_str().to_string()).collect();
        let query = format!(
            "INSERT INTO camps
                (club_id, name, camp_type, people_range, people_count, district,
                 latitude, longitude, contact_type, contact, needs)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        let camp = sqlx::query_as::<_, Camp>(&query)
            .bind(input.club_id)
            .bind(&input.name)
            .bind(input.camp_type.as_str())
            .bind(input.people_range.as_str())
            .bind(input.people_count)
            .bind(&input.district)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(input.contact_type.as_str())
            .bind(&input.contact)
            .bind(&needs)
            .fetch_one(&mut *tx)
            .await?;

        for location in &input.drop_off_locations {
            Self::insert_drop_off(&mut *tx, camp.id, location).await?;
        }

        // The items list is the source of truth for initial inventory.
        for item in &input.items {
            if item.quantity > 0 {
                InventoryRepo::declare_need(
                    &mut *tx,
                    InventoryTarget::Camp(camp.id),
                    item.item_type,
                    item.quantity,
                    item.notes.as_deref(),
                )
                .await?;
            }
        }

        for help_request_id in &input.help_request_ids {
            sqlx::query(
                "INSERT INTO camp_help_request_links (camp_id, help_request_id)
                 VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(camp.id)
            .bind(help_request_id)
            .execute(&mut *tx)
            .await?;
        }

        for donation_id in &input.donation_ids {
            sqlx::query(
                "INSERT INTO camp_donation_links (camp_id, donation_id)
                 VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(camp.id)
            .bind(donation_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(camp)
    }

    async fn insert_drop_off<'a>(
        executor: impl PgExecutor<'a>,
        camp_id: DbId,
        location: &CreateDropOffLocation,
    ) -> Result<DropOffLocation, sqlx::Error> {
        let query = format!(
            "INSERT INTO camp_drop_off_locations
                (camp_id, name, latitude, longitude, contact_type, contact, open_time, close_time)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {DROP_OFF_COLUMNS}"
        );
        sqlx::query_as::<_, DropOffLocation>(&query)
            .bind(camp_id)
            .bind(&location.name)
            .bind(location.latitude)
            .bind(location.longitude)
            .bind(location.contact_type.map(|c| c.as_str()))
            .bind(location.contact.as_deref())
            .bind(location.open_time.as_deref())
            .bind(location.close_time.as_deref())
            .fetch_one(executor)
            .await
    }

    /// Find a camp by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Camp>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM camps WHERE id = $1");
        sqlx::query_as::<_, Camp>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List camps matching the filter, newest first.
    pub async fn list(pool: &PgPool, filter: &CampFilter) -> Result<Vec<Camp>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM camps
             WHERE {FILTER_WHERE}
             ORDER BY created_at DESC
             LIMIT $8 OFFSET $9"
        );
        sqlx::query_as::<_, Camp>(&query)
            .bind(filter.camp_type.map(|t| t.as_str()))
            .bind(Self::needs_param(filter))
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

    /// Total rows matching the filter, ignoring pagination.
    pub async fn count(pool: &PgPool, filter: &CampFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM camps WHERE {FILTER_WHERE}");
        let row: (i64,) = sqlx::query_as(&query)
            .bind(filter.camp_type.map(|t| t.as_str()))
            .bind(Self::needs_param(filter))
            .bind(filter.district.as_deref())
            .bind(filter.bounds.map(|b| b.min_lat))
            .bind(filter.bounds.map(|b| b.max_lat))
            .bind(filter.bounds.map(|b| b.min_lng))
            .bind(filter.bounds.map(|b| b.max_lng))
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    fn needs_param(filter: &CampFilter) -> Option<Vec<String>> {
        filter
            .needs
            .as_ref()
            .map(|needs| needs.iter().map(|n| n.as_str().to_string()).collect())
    }

    /// Apply a camp edit. Only non-`None` fields change; a present `items`
    /// list re-declares needed quantities.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCamp,
    ) -> Result<Option<Camp>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let needs: Option<Vec<String>> = input
            .needs
            .as_ref()
            .map(|needs| needs.iter().map(|n| n.as_str().to_string()).collect());
        let query = format!(
            "UPDATE camps SET
                name = COALESCE($2, name),
                camp_type = COALESCE($3, camp_type),
                status = COALESCE($4, status),
                people_range = COALESCE($5, people_range),
                people_count = COALESCE($6, people_count),
                district = COALESCE($7, district),
                latitude = COALESCE($8, latitude),
                longitude = COALESCE($9, longitude),
                contact_type = COALESCE($10, contact_type),
                contact = COALESCE($11, contact),
                needs = COALESCE($12, needs),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Camp>(&query)
            .bind(id)
            .bind(input.name.as_deref())
            .bind(input.camp_type.map(|t| t.as_str()))
            .bind(input.status.map(|s| s.as_str()))
            .bind(input.people_range.map(|r| r.as_str()))
            .bind(input.people_count)
            .bind(input.district.as_deref())
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(input.contact_type.map(|c| c.as_str()))
            .bind(input.contact.as_deref())
            .bind(needs)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(camp) = updated else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(items) = &input.items {
            for item in items {
                if item.quantity > 0 {
                    InventoryRepo::declare_need(
                        &mut *tx,
                        InventoryTarget::Camp(camp.id),
                        item.item_type,
                        item.quantity,
                        item.notes.as_deref(),
                    )
                    .await?;
                }
            }
        }

        tx.commit().await?;
        Ok(Some(camp))
    }

    /// Drop-off locations of one camp.
    pub async fn drop_offs_for(
        pool: &PgPool,
        camp_id: DbId,
    ) -> Result<Vec<DropOffLocation>, sqlx::Error> {
        let query = format!(
            "SELECT {DROP_OFF_COLUMNS} FROM camp_drop_off_locations
             WHERE camp_id = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, DropOffLocation>(&query)
            .bind(camp_id)
            .fetch_all(pool)
            .await
    }

    /// Every drop-off location across all camps (map view).
    pub async fn all_drop_offs(pool: &PgPool) -> Result<Vec<DropOffLocation>, sqlx::Error> {
        let query = format!(
            "SELECT {DROP_OFF_COLUMNS} FROM camp_drop_off_locations ORDER BY camp_id, id"
        );
        sqlx::query_as::<_, DropOffLocation>(&query)
            .fetch_all(pool)
            .await
    }

    /// Help-request IDs linked to a camp.
    pub async fn linked_help_request_ids(
        pool: &PgPool,
        camp_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT help_request_id FROM camp_help_request_links
             WHERE camp_id = $1 ORDER BY help_request_id",
        )
        .bind(camp_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    /// Donation IDs linked to a camp, including donations made directly
    /// against it.
    pub async fn linked_donation_ids(
        pool: &PgPool,
        camp_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT donation_id FROM camp_donation_links WHERE camp_id = $1
             UNION
             SELECT id FROM donations WHERE camp_id = $1
             ORDER BY donation_id",
        )
        .bind(camp_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|r| r.0).collect())
    }
}
