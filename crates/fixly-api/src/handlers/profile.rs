//! Handlers for the `/profile` resource (the authenticated user's own profile).

use axum::extract::State;
use axum::Json;
use fixly_core::roles::validate_role;
use fixly_db::models::user::{Profile, UpdateProfile};
use fixly_db::repositories::{ProfileRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use fixly_core::error::CoreError;

/// GET /api/profile
///
/// The authenticated user's identity plus profile fields.
pub async fn get_profile(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    let profile = ProfileRepo::get_or_create(&state.pool, user.id).await?;

    Ok(Json(serde_json::json!({
        "id": user.id,
        "username": user.username,
        "email": user.email,
        "profile": profile,
    })))
}

/// PUT /api/profile
///
/// Partial update of the authenticated user's profile. Setting `role`
/// completes onboarding; only `client` and `provider` are accepted.
pub async fn update_profile(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<Profile>> {
    if let Some(role) = &input.role {
        validate_role(role)?;
    }

    // The row exists from registration; create it first for any
    // account that predates profiles.
    ProfileRepo::get_or_create(&state.pool, auth.user_id).await?;
    let profile = ProfileRepo::update(&state.pool, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: auth.user_id,
        }))?;

    Ok(Json(profile))
}
