//! Route definitions for the `/chats` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::chat;
use crate::state::AppState;

/// Routes mounted at `/chats`. Both endpoints enforce the participant
/// gate.
///
/// ```text
/// GET  /{request_id}/messages -> get_messages
/// POST /{request_id}/messages -> send_message
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{request_id}/messages",
        get(chat::get_messages).post(chat::send_message),
    )
}
