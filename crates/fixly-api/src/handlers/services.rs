//! Handlers for the `/services` resource (provider listings).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use fixly_core::error::CoreError;
use fixly_core::roles::ROLE_PROVIDER;
use fixly_core::service::{validate_price_from, validate_service_status};
use fixly_core::types::DbId;
use fixly_db::models::service::{CreateService, Service, UpdateService};
use fixly_db::repositories::ServiceRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::require_role;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/services
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Service>>> {
    let services = ServiceRepo::list(&state.pool).await?;
    Ok(Json(services))
}

/// GET /api/services/me
///
/// The authenticated provider's own listings.
pub async fn my_services(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Service>>> {
    let services = ServiceRepo::list_by_owner(&state.pool, auth.user_id).await?;
    Ok(Json(services))
}

/// POST /api/services
///
/// Create a listing. Providers only.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateService>,
) -> AppResult<(StatusCode, Json<Service>)> {
    require_role(
        &state.pool,
        auth.user_id,
        ROLE_PROVIDER,
        "Solo proveedores pueden crear servicios",
    )
    .await?;

    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "El título es obligatorio".into(),
        )));
    }
    validate_price_from(input.price_from)?;

    let service = ServiceRepo::create(&state.pool, auth.user_id, &input).await?;
    tracing::info!(service_id = %service.id, owner_id = %auth.user_id, "Service created");

    Ok((StatusCode::CREATED, Json(service)))
}

/// GET /api/services/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Service>> {
    let service = ServiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Service",
            id,
        }))?;
    Ok(Json(service))
}

/// PUT /api/services/{id}
///
/// Owner-only partial update.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateService>,
) -> AppResult<Json<Service>> {
    let service = ServiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Service",
            id,
        }))?;
    if service.owner_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden("Prohibido".into())));
    }
    require_role(
        &state.pool,
        auth.user_id,
        ROLE_PROVIDER,
        "Solo proveedores pueden editar/eliminar sus servicios",
    )
    .await?;

    if let Some(price_from) = input.price_from {
        validate_price_from(price_from)?;
    }
    if let Some(status) = &input.status {
        validate_service_status(status)?;
    }

    let updated = ServiceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Service",
            id,
        }))?;
    Ok(Json(updated))
}

/// DELETE /api/services/{id}
///
/// Owner-only; the listing's leads cascade with it.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let service = ServiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Service",
            id,
        }))?;
    if service.owner_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden("Prohibido".into())));
    }
    require_role(
        &state.pool,
        auth.user_id,
        ROLE_PROVIDER,
        "Solo proveedores pueden editar/eliminar sus servicios",
    )
    .await?;

    ServiceRepo::delete(&state.pool, id).await?;
    tracing::info!(service_id = %id, "Service deleted");

    Ok(Json(serde_json::json!({ "ok": true })))
}
