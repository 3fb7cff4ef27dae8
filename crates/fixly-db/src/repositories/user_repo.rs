//! Repository for the `users` table.

use fixly_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{PublicUser, User};

/// Column list for `users` queries.
const COLUMNS: &str = "id, username, email, password_hash, is_active, created_at";

/// Provides CRUD operations for user accounts.
pub struct UserRepo;

impl UserRepo {
    /// Create a user together with their empty profile row, in one
    /// transaction. Username and email are stored as given; callers
    /// normalize to lowercase beforehand.
    pub async fn create(
        pool: &PgPool,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let user: User = sqlx::query_as(&format!(
            "INSERT INTO users (username, email, password_hash) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        ))
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO profiles (user_id) VALUES ($1)")
            .bind(user.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(user)
    }

    /// Find a user by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as(&format!("SELECT {COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username or email (login accepts either).
    pub async fn find_by_username_or_email(
        pool: &PgPool,
        identifier: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM users WHERE username = $1 OR email = $1"
        ))
        .bind(identifier)
        .fetch_optional(pool)
        .await
    }

    /// Whether a username or email is already registered.
    pub async fn identity_taken(
        pool: &PgPool,
        username: &str,
        email: &str,
    ) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE username = $1 OR email = $2",
        )
        .bind(username)
        .bind(email)
        .fetch_one(pool)
        .await?;
        Ok(count > 0)
    }

    /// Public projection of a user by id.
    pub async fn find_public(pool: &PgPool, id: DbId) -> Result<Option<PublicUser>, sqlx::Error> {
        sqlx::query_as("SELECT id, username, email FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace a user's password hash.
    pub async fn update_password(
        pool: &PgPool,
        user_id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(user_id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Ids of active users whose profile has notifications enabled.
    /// These are the users the notification differ polls for.
    pub async fn list_notifiable_ids(pool: &PgPool) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT u.id FROM users u \
             JOIN profiles p ON p.user_id = u.id \
             WHERE u.is_active AND p.notifications_enabled",
        )
        .fetch_all(pool)
        .await
    }
}
