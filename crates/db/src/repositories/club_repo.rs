//! Repository for the `volunteer_clubs` and `club_memberships` tables.

use reliefnet_core::types::DbId;
use sqlx::PgPool;

use crate::models::club::{ClubMembership, CreateVolunteerClub, VolunteerClub};

const COLUMNS: &str = "id, name, district, user_id, created_at, updated_at";

const MEMBERSHIP_COLUMNS: &str = "id, club_id, user_id, created_at";

/// Provides club and membership operations.
pub struct ClubRepo;

impl ClubRepo {
    /// Register a club with the given user as its linked owner.
    pub async fn create(
        pool: &PgPool,
        owner_user_id: DbId,
        input: &CreateVolunteerClub,
    ) -> Result<VolunteerClub, sqlx::Error> {
        let query = format!(
            "INSERT INTO volunteer_clubs (name, district, user_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VolunteerClub>(&query)
            .bind(&input.name)
            .bind(input.district.as_deref())
            .bind(owner_user_id)
            .fetch_one(pool)
            .await
    }

    /// Find a club by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<VolunteerClub>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM volunteer_clubs WHERE id = $1");
        sqlx::query_as::<_, VolunteerClub>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all clubs, alphabetically.
    pub async fn list(pool: &PgPool) -> Result<Vec<VolunteerClub>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM volunteer_clubs ORDER BY name ASC");
        sqlx::query_as::<_, VolunteerClub>(&query).fetch_all(pool).await
    }

    /// Enroll a user as a club member. Idempotent: re-enrolling an existing
    /// member is a no-op.
    pub async fn add_member(pool: &PgPool, club_id: DbId, user_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO club_memberships (club_id, user_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_club_memberships_club_user DO NOTHING",
        )
        .bind(club_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// List a club's members, oldest first.
    pub async fn list_members(
        pool: &PgPool,
        club_id: DbId,
    ) -> Result<Vec<ClubMembership>, sqlx::Error> {
        let query = format!(
            "SELECT {MEMBERSHIP_COLUMNS} FROM club_memberships
             WHERE club_id = $1
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, ClubMembership>(&query)
            .bind(club_id)
            .fetch_all(pool)
            .await
    }
}
