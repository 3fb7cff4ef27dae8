//! Handlers for the `/chats/{request_id}/messages` resource.
//!
//! The chat gate: a transcript exists only once an offer is accepted,
//! and its two participants are exactly the request owner and the
//! accepted offer's provider. The gate is enforced on BOTH read and
//! write.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use fixly_core::chat::{normalize_message_text, validate_message_text};
use fixly_core::error::CoreError;
use fixly_core::types::DbId;
use fixly_db::models::chat::{ChatMessage, ChatParticipants, SendMessage};
use fixly_db::repositories::{ChatRepo, OfferRepo, RequestRepo};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Derive the two chat participants for a request.
///
/// Fails with 404 when the request is missing and with a validation
/// error when no offer has been accepted yet (no chat exists then).
pub(crate) async fn participants(
    pool: &PgPool,
    request_id: DbId,
) -> Result<ChatParticipants, AppError> {
    let request = RequestRepo::find_by_id(pool, request_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Request",
            id: request_id,
        }))?;

    let accepted_offer_id = request.accepted_offer_id.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "No hay oferta aceptada para esta solicitud.".into(),
        ))
    })?;

    let offer = OfferRepo::find_in_request(pool, request_id, accepted_offer_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Offer",
            id: accepted_offer_id,
        }))?;

    Ok(ChatParticipants {
        client_id: request.owner_id,
        provider_id: offer.provider_id,
    })
}

/// GET /api/chats/{request_id}/messages
///
/// The transcript in send order. Participants only.
pub async fn get_messages(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
) -> AppResult<Json<Vec<ChatMessage>>> {
    let parts = participants(&state.pool, request_id).await?;
    if !parts.includes(auth.user_id) {
        return Err(AppError::Core(CoreError::Forbidden("No autorizado.".into())));
    }

    let messages = ChatRepo::list_for_request(&state.pool, request_id).await?;
    Ok(Json(messages))
}

/// POST /api/chats/{request_id}/messages
///
/// Append a message. The recipient is always the other participant;
/// empty text (after normalization) is rejected.
pub async fn send_message(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
    Json(input): Json<SendMessage>,
) -> AppResult<(StatusCode, Json<ChatMessage>)> {
    let parts = participants(&state.pool, request_id).await?;
    if !parts.includes(auth.user_id) {
        return Err(AppError::Core(CoreError::Forbidden("No autorizado.".into())));
    }

    let text = normalize_message_text(&input.text);
    validate_message_text(&text)?;

    let recipient = parts.other(auth.user_id);
    let message = ChatRepo::insert(&state.pool, request_id, auth.user_id, recipient, &text).await?;

    Ok((StatusCode::CREATED, Json(message)))
}
