//! Review entity model and DTOs.

use fixly_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `reviews` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    #[serde(rename = "requestId")]
    pub request_id: DbId,
    #[serde(rename = "toUserId")]
    pub to_user_id: DbId,
    #[serde(rename = "fromUserId")]
    pub from_user_id: DbId,
    pub rating: i32,
    pub comment: String,
    pub created_at: Timestamp,
}

/// DTO for submitting a review.
#[derive(Debug, Deserialize)]
pub struct CreateReview {
    #[serde(rename = "requestId", alias = "request")]
    pub request_id: DbId,
    #[serde(rename = "toUserId", alias = "to_user")]
    pub to_user_id: DbId,
    pub rating: i32,
    #[serde(default)]
    pub comment: String,
}

/// Aggregate rating for a user: simple arithmetic mean, zero when empty.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RatingStats {
    pub count: i64,
    pub avg: f64,
}
