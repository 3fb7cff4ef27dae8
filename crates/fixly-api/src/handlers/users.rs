//! Handlers for the public `/users` resource: user cards, received
//! reviews, and the rating aggregate.

use axum::extract::{Path, State};
use axum::Json;
use fixly_core::error::CoreError;
use fixly_core::types::DbId;
use fixly_db::models::review::{RatingStats, Review};
use fixly_db::repositories::{ProfileRepo, ReviewRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/users/{id}
///
/// Public user card: identity plus profile.
pub async fn user_detail(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let user = UserRepo::find_public(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;
    let profile = ProfileRepo::get_or_create(&state.pool, user_id).await?;

    Ok(Json(serde_json::json!({
        "id": user.id,
        "username": user.username,
        "email": user.email,
        "profile": profile,
    })))
}

/// GET /api/users/{id}/reviews
///
/// Reviews received by a user, newest first.
pub async fn user_reviews(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<Vec<Review>>> {
    let reviews = ReviewRepo::list_for_user(&state.pool, user_id).await?;
    Ok(Json(reviews))
}

/// GET /api/users/{id}/rating
///
/// `{count, avg}` over all reviews the user received; `avg` is `0`
/// when there are none.
pub async fn user_rating(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<RatingStats>> {
    let stats = ReviewRepo::rating_stats(&state.pool, user_id).await?;
    Ok(Json(stats))
}
