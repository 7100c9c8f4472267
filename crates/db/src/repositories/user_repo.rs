//! Repository for the `users` table.

use reliefnet_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::User;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, role, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user with the default role, returning the created row.
    ///
    /// A duplicate username violates `uq_users_username` and surfaces as a
    /// conflict at the API layer.
    pub async fn create(pool: &PgPool, username: &str, role: &str) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, role) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .bind(role)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }
}
