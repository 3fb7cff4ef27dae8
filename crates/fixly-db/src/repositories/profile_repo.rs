//! Repository for the `profiles` table.

use fixly_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{Profile, UpdateProfile};

/// Column list for `profiles` queries.
const COLUMNS: &str =
    "user_id, display_name, photo_url, role, location, bio, notifications_enabled";

/// Provides operations on user profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Fetch a user's profile, creating the empty row if it is missing.
    /// Normally the row exists from registration; the insert covers
    /// accounts that predate the profile table.
    pub async fn get_or_create(pool: &PgPool, user_id: DbId) -> Result<Profile, sqlx::Error> {
        sqlx::query_as(&format!(
            "INSERT INTO profiles (user_id) VALUES ($1) \
             ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id \
             RETURNING {COLUMNS}"
        ))
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Partially update a profile. Absent fields are left untouched.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<Profile>, sqlx::Error> {
        sqlx::query_as(&format!(
            "UPDATE profiles SET \
                display_name = COALESCE($2, display_name), \
                photo_url = COALESCE($3, photo_url), \
                role = COALESCE($4, role), \
                location = COALESCE($5, location), \
                bio = COALESCE($6, bio), \
                updated_at = NOW() \
             WHERE user_id = $1 \
             RETURNING {COLUMNS}"
        ))
        .bind(user_id)
        .bind(input.display_name.as_deref())
        .bind(input.photo_url.as_deref())
        .bind(input.role.as_deref())
        .bind(input.location.as_deref())
        .bind(input.bio.as_deref())
        .fetch_optional(pool)
        .await
    }

    /// Toggle the notification differ for a user.
    pub async fn set_notifications_enabled(
        pool: &PgPool,
        user_id: DbId,
        enabled: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE profiles SET notifications_enabled = $2, updated_at = NOW() \
             WHERE user_id = $1",
        )
        .bind(user_id)
        .bind(enabled)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
