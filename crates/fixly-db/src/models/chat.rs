//! Chat message entity model and DTOs.

use fixly_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `chat_messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChatMessage {
    pub id: DbId,
    #[serde(rename = "requestId")]
    pub request_id: DbId,
    #[serde(rename = "from")]
    pub sender_id: DbId,
    #[serde(rename = "to")]
    pub recipient_id: DbId,
    pub text: String,
    pub ts: Timestamp,
}

/// DTO for sending a chat message. The recipient is derived from the
/// chat gate, never supplied by the caller.
#[derive(Debug, Deserialize)]
pub struct SendMessage {
    #[serde(default)]
    pub text: String,
}

/// The two authorized chat participants for a request.
#[derive(Debug, Clone, Copy)]
pub struct ChatParticipants {
    pub client_id: DbId,
    pub provider_id: DbId,
}

impl ChatParticipants {
    /// Whether the given user is one of the two participants.
    pub fn includes(&self, user_id: DbId) -> bool {
        user_id == self.client_id || user_id == self.provider_id
    }

    /// The participant on the other side of the conversation.
    pub fn other(&self, user_id: DbId) -> DbId {
        if user_id == self.client_id {
            self.provider_id
        } else {
            self.client_id
        }
    }
}
