//! Repository for the `reviews` table.

use fixly_core::types::DbId;
use sqlx::PgPool;

use crate::models::review::{RatingStats, Review};

/// Column list for `reviews` queries.
const COLUMNS: &str = "id, request_id, to_user_id, from_user_id, rating, comment, created_at";

/// Provides operations for reviews and rating aggregates.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Store a review. The `uq_reviews_request_from` constraint is the
    /// storage-level backstop against duplicate reviews; callers check
    /// [`Self::exists_for`] first for a friendly error.
    pub async fn create(
        pool: &PgPool,
        request_id: DbId,
        to_user_id: DbId,
        from_user_id: DbId,
        rating: i32,
        comment: &str,
    ) -> Result<Review, sqlx::Error> {
        sqlx::query_as(&format!(
            "INSERT INTO reviews (request_id, to_user_id, from_user_id, rating, comment) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        ))
        .bind(request_id)
        .bind(to_user_id)
        .bind(from_user_id)
        .bind(rating)
        .bind(comment)
        .fetch_one(pool)
        .await
    }

    /// Reviews received by a user, newest first.
    pub async fn list_for_user(pool: &PgPool, to_user_id: DbId) -> Result<Vec<Review>, sqlx::Error> {
        sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM reviews WHERE to_user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(to_user_id)
        .fetch_all(pool)
        .await
    }

    /// Whether the reviewer already reviewed this request.
    pub async fn exists_for(
        pool: &PgPool,
        request_id: DbId,
        from_user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reviews WHERE request_id = $1 AND from_user_id = $2",
        )
        .bind(request_id)
        .bind(from_user_id)
        .fetch_one(pool)
        .await?;
        Ok(count > 0)
    }

    /// Aggregate rating for a user: arithmetic mean over all received
    /// reviews, `avg = 0` when there are none.
    pub async fn rating_stats(pool: &PgPool, to_user_id: DbId) -> Result<RatingStats, sqlx::Error> {
        let row: (i64, Option<f64>) = sqlx::query_as(
            "SELECT COUNT(*), AVG(rating::float8) FROM reviews WHERE to_user_id = $1",
        )
        .bind(to_user_id)
        .fetch_one(pool)
        .await?;
        Ok(RatingStats {
            count: row.0,
            avg: row.1.unwrap_or(0.0),
        })
    }
}
