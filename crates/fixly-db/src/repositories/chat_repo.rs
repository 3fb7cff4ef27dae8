//! Repository for the `chat_messages` table.

use fixly_core::types::DbId;
use sqlx::PgPool;

use crate::models::chat::ChatMessage;
use crate::models::notification::LastChatMessage;

/// Column list for `chat_messages` queries.
const COLUMNS: &str = "id, request_id, sender_id, recipient_id, text, ts";

/// Provides operations for chat transcripts.
pub struct ChatRepo;

impl ChatRepo {
    /// A request's transcript in send order.
    pub async fn list_for_request(
        pool: &PgPool,
        request_id: DbId,
    ) -> Result<Vec<ChatMessage>, sqlx::Error> {
        sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM chat_messages WHERE request_id = $1 ORDER BY ts ASC"
        ))
        .bind(request_id)
        .fetch_all(pool)
        .await
    }

    /// Append a message to a request's transcript.
    pub async fn insert(
        pool: &PgPool,
        request_id: DbId,
        sender_id: DbId,
        recipient_id: DbId,
        text: &str,
    ) -> Result<ChatMessage, sqlx::Error> {
        sqlx::query_as(&format!(
            "INSERT INTO chat_messages (request_id, sender_id, recipient_id, text) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        ))
        .bind(request_id)
        .bind(sender_id)
        .bind(recipient_id)
        .bind(text)
        .fetch_one(pool)
        .await
    }

    /// The newest message of every request the user participates in
    /// (as owner or accepted provider). Differ input.
    pub async fn last_messages_for_participant(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<LastChatMessage>, sqlx::Error> {
        sqlx::query_as(
            "SELECT DISTINCT ON (m.request_id) \
                    m.request_id, r.title, m.id AS message_id, m.sender_id \
             FROM chat_messages m \
             JOIN requests r ON r.id = m.request_id \
             LEFT JOIN offers o ON o.id = r.accepted_offer_id \
             WHERE r.owner_id = $1 OR o.provider_id = $1 \
             ORDER BY m.request_id, m.ts DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
