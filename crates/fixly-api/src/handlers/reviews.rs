//! Handler for `/reviews`: the review gate.
//!
//! The full precondition set is re-verified server-side: only the
//! request owner may review, only after completion, only the accepted
//! provider may be reviewed, and only once per request.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use fixly_core::error::CoreError;
use fixly_core::request::STATUS_COMPLETED;
use fixly_core::review::{normalize_comment, validate_rating};
use fixly_db::models::review::{CreateReview, Review};
use fixly_db::repositories::{OfferRepo, RequestRepo, ReviewRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/reviews
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateReview>,
) -> AppResult<(StatusCode, Json<Review>)> {
    validate_rating(input.rating)?;
    let comment = normalize_comment(&input.comment)?;

    let request = RequestRepo::find_by_id(&state.pool, input.request_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Request",
            id: input.request_id,
        }))?;

    if request.owner_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Solo el dueño de la solicitud puede enviar una reseña".into(),
        )));
    }
    if request.status != STATUS_COMPLETED {
        return Err(AppError::Core(CoreError::Validation(
            "La solicitud debe estar completada para enviar una reseña".into(),
        )));
    }

    let accepted_offer_id = request.accepted_offer_id.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "No hay oferta aceptada para esta solicitud.".into(),
        ))
    })?;
    let accepted = OfferRepo::find_in_request(&state.pool, request.id, accepted_offer_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Offer",
            id: accepted_offer_id,
        }))?;
    if accepted.provider_id != input.to_user_id {
        return Err(AppError::Core(CoreError::Validation(
            "El proveedor no corresponde a la oferta aceptada".into(),
        )));
    }

    if ReviewRepo::exists_for(&state.pool, request.id, auth.user_id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Ya enviaste una reseña para esta solicitud".into(),
        )));
    }

    let review = ReviewRepo::create(
        &state.pool,
        request.id,
        input.to_user_id,
        auth.user_id,
        input.rating,
        &comment,
    )
    .await?;

    tracing::info!(review_id = %review.id, request_id = %request.id, "Review created");

    Ok((StatusCode::CREATED, Json(review)))
}
