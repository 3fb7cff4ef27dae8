//! Handlers for the `/requests` resource.
//!
//! Reads are public; every mutation is guarded by ownership and the
//! `client` role, server-side.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use fixly_core::error::CoreError;
use fixly_core::request::{validate_budget, validate_status, validate_title, validate_urgency};
use fixly_core::roles::ROLE_CLIENT;
use fixly_core::types::DbId;
use fixly_db::models::offer::OfferView;
use fixly_db::models::request::{CreateRequest, Request, RequestDetail, UpdateRequest};
use fixly_db::repositories::{OfferRepo, RequestRepo};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::handlers::require_role;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Load a request's offers and assemble the detail view.
pub(crate) async fn load_detail(pool: &PgPool, request: Request) -> AppResult<RequestDetail> {
    let offers = OfferRepo::list_views_for_request(pool, request.id).await?;
    Ok(RequestDetail::assemble(request, offers))
}

/// GET /api/requests
///
/// Every request with its embedded offers, newest first.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<RequestDetail>>> {
    let requests = RequestRepo::list(&state.pool).await?;

    let ids: Vec<DbId> = requests.iter().map(|r| r.id).collect();
    let mut offers_by_request: HashMap<DbId, Vec<OfferView>> = HashMap::new();
    for offer in OfferRepo::list_views_for_requests(&state.pool, &ids).await? {
        offers_by_request
            .entry(offer.request_id)
            .or_default()
            .push(offer);
    }

    let details = requests
        .into_iter()
        .map(|r| {
            let offers = offers_by_request.remove(&r.id).unwrap_or_default();
            RequestDetail::assemble(r, offers)
        })
        .collect();

    Ok(Json(details))
}

/// POST /api/requests
///
/// Create a request owned by the caller. Clients only.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateRequest>,
) -> AppResult<(StatusCode, Json<RequestDetail>)> {
    require_role(
        &state.pool,
        auth.user_id,
        ROLE_CLIENT,
        "Solo clientes pueden crear solicitudes",
    )
    .await?;

    validate_title(&input.title)?;
    validate_urgency(&input.urgency)?;
    validate_budget(input.budget)?;

    let request = RequestRepo::create(&state.pool, auth.user_id, &input).await?;
    tracing::info!(request_id = %request.id, owner_id = %auth.user_id, "Request created");

    Ok((
        StatusCode::CREATED,
        Json(RequestDetail::assemble(request, Vec::new())),
    ))
}

/// GET /api/requests/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<RequestDetail>> {
    let request = RequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Request",
            id,
        }))?;
    Ok(Json(load_detail(&state.pool, request).await?))
}

/// PUT /api/requests/{id}
///
/// Shallow patch by the owner. Status changes are explicit owner
/// transitions; the values are restricted to the canonical set.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRequest>,
) -> AppResult<Json<RequestDetail>> {
    let request = RequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Request",
            id,
        }))?;
    if request.owner_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden("Prohibido".into())));
    }
    require_role(
        &state.pool,
        auth.user_id,
        ROLE_CLIENT,
        "Solo clientes pueden editar sus solicitudes",
    )
    .await?;

    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    if let Some(urgency) = &input.urgency {
        validate_urgency(urgency)?;
    }
    if let Some(status) = &input.status {
        validate_status(status)?;
    }
    validate_budget(input.budget)?;

    let updated = RequestRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Request",
            id,
        }))?;

    Ok(Json(load_detail(&state.pool, updated).await?))
}

/// DELETE /api/requests/{id}
///
/// Owner-only. Offers, chat history, and reviews cascade away with the
/// request in one unit.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let request = RequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Request",
            id,
        }))?;
    if request.owner_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden("Prohibido".into())));
    }
    require_role(
        &state.pool,
        auth.user_id,
        ROLE_CLIENT,
        "Solo clientes pueden eliminar sus solicitudes",
    )
    .await?;

    RequestRepo::delete(&state.pool, id).await?;
    tracing::info!(request_id = %id, "Request deleted");

    Ok(Json(serde_json::json!({ "ok": true })))
}
