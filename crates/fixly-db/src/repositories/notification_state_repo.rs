//! Repository for the `notification_state` table.
//!
//! One snapshot row per user, read and rewritten whole by each differ
//! pass. Markers only move forward; the row is never trimmed.

use fixly_core::types::DbId;
use sqlx::PgPool;

use crate::models::notification::NotificationState;

/// Column list for `notification_state` queries.
const COLUMNS: &str = "user_id, offer_counts, offer_ids, accepted_seen, client_accepted_seen, \
                       lead_ids, chat_last_msg, sent_keys, initialized";

/// Provides access to the differ's per-user snapshots.
pub struct NotificationStateRepo;

impl NotificationStateRepo {
    /// Fetch a user's snapshot, or `None` on their cold start.
    pub async fn get(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<NotificationState>, sqlx::Error> {
        sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM notification_state WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// Write a user's snapshot, creating the row if needed.
    pub async fn upsert(pool: &PgPool, state: &NotificationState) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO notification_state \
                (user_id, offer_counts, offer_ids, accepted_seen, client_accepted_seen, \
                 lead_ids, chat_last_msg, sent_keys, initialized) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             ON CONFLICT (user_id) DO UPDATE SET \
                offer_counts = EXCLUDED.offer_counts, \
                offer_ids = EXCLUDED.offer_ids, \
                accepted_seen = EXCLUDED.accepted_seen, \
                client_accepted_seen = EXCLUDED.client_accepted_seen, \
                lead_ids = EXCLUDED.lead_ids, \
                chat_last_msg = EXCLUDED.chat_last_msg, \
                sent_keys = EXCLUDED.sent_keys, \
                initialized = EXCLUDED.initialized, \
                updated_at = NOW()",
        )
        .bind(state.user_id)
        .bind(&state.offer_counts)
        .bind(&state.offer_ids)
        .bind(&state.accepted_seen)
        .bind(&state.client_accepted_seen)
        .bind(&state.lead_ids)
        .bind(&state.chat_last_msg)
        .bind(&state.sent_keys)
        .bind(state.initialized)
        .execute(pool)
        .await?;
        Ok(())
    }
}
