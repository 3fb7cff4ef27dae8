//! Handlers for the offer lifecycle under `/requests/{id}/offers`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use fixly_core::error::CoreError;
use fixly_core::offer::{validate_price, OFFER_ACCEPTED};
use fixly_core::roles::ROLE_PROVIDER;
use fixly_core::types::DbId;
use fixly_db::models::offer::{AcceptOutcome, OfferView, UpsertOffer};
use fixly_db::models::request::RequestDetail;
use fixly_db::repositories::{OfferRepo, RequestRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::require_role;
use crate::handlers::requests::load_detail;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/requests/{id}/offers
///
/// A request's offers with provider identity, newest first.
pub async fn list(
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
) -> AppResult<Json<Vec<OfferView>>> {
    RequestRepo::find_by_id(&state.pool, request_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Request",
            id: request_id,
        }))?;

    let offers = OfferRepo::list_views_for_request(&state.pool, request_id).await?;
    Ok(Json(offers))
}

/// POST /api/requests/{id}/offers
///
/// Upsert-by-provider: a provider's first submission appends a pending
/// offer; any later submission mutates that same offer in place (an
/// accepted offer stays accepted). 201 on insert, 200 on update.
pub async fn upsert(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
    Json(input): Json<UpsertOffer>,
) -> AppResult<impl IntoResponse> {
    let request = RequestRepo::find_by_id(&state.pool, request_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Request",
            id: request_id,
        }))?;

    require_role(
        &state.pool,
        auth.user_id,
        ROLE_PROVIDER,
        "Solo proveedores pueden enviar ofertas",
    )
    .await?;

    if request.owner_id == auth.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "No puedes ofertar a tu propia solicitud".into(),
        )));
    }

    validate_price(input.price)?;

    let (offer, created) = OfferRepo::upsert_for_provider(
        &state.pool,
        request_id,
        auth.user_id,
        &input.message,
        input.price,
    )
    .await?;

    tracing::info!(
        offer_id = %offer.id,
        request_id = %request_id,
        provider_id = %auth.user_id,
        created,
        "Offer upserted"
    );

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(offer)))
}

/// POST /api/requests/{id}/offers/{offer_id}/accept
///
/// Owner-only. One transaction rejects every competitor, accepts the
/// target, records it as the request's winner, and advances a
/// `pendiente` request to `en progreso`. Acceptance is terminal.
pub async fn accept(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((request_id, offer_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<RequestDetail>> {
    let request = RequestRepo::find_by_id(&state.pool, request_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Request",
            id: request_id,
        }))?;
    if request.owner_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden("Prohibido".into())));
    }

    let updated = match OfferRepo::accept(&state.pool, request_id, offer_id).await? {
        AcceptOutcome::Accepted(request) => request,
        AcceptOutcome::OfferNotFound => {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Offer",
                id: offer_id,
            }))
        }
        AcceptOutcome::AlreadyAccepted => {
            return Err(AppError::Core(CoreError::Conflict(
                "Ya hay una oferta aceptada para esta solicitud".into(),
            )))
        }
    };

    tracing::info!(request_id = %request_id, offer_id = %offer_id, "Offer accepted");

    Ok(Json(load_detail(&state.pool, updated).await?))
}

/// POST /api/requests/{id}/offers/{offer_id}/reject
///
/// Owner-only. Rejects a single offer; siblings and the accepted-offer
/// reference are untouched. The accepted offer itself cannot be
/// rejected once chosen.
pub async fn reject(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((request_id, offer_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<RequestDetail>> {
    let request = RequestRepo::find_by_id(&state.pool, request_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Request",
            id: request_id,
        }))?;
    if request.owner_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden("Prohibido".into())));
    }

    let offer = OfferRepo::find_in_request(&state.pool, request_id, offer_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Offer",
            id: offer_id,
        }))?;
    if offer.status == OFFER_ACCEPTED {
        return Err(AppError::Core(CoreError::Conflict(
            "La oferta aceptada no puede rechazarse".into(),
        )));
    }

    OfferRepo::reject(&state.pool, request_id, offer_id).await?;
    tracing::info!(request_id = %request_id, offer_id = %offer_id, "Offer rejected");

    let request = RequestRepo::find_by_id(&state.pool, request_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Request",
            id: request_id,
        }))?;
    Ok(Json(load_detail(&state.pool, request).await?))
}
