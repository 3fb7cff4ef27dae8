//! Notification entity models and the differ's persisted snapshot state.

use std::collections::{HashMap, HashSet};

use fixly_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// Notification kind: a new offer arrived on an owned request.
pub const KIND_OFFER: &str = "offer";

/// Notification kind: the user's offer was accepted (provider side).
pub const KIND_ACCEPTED: &str = "accepted";

/// Notification kind: an offer was accepted on the user's request (client side).
pub const KIND_ACCEPTED_CLIENT: &str = "accepted_client";

/// Notification kind: a new lead arrived for the user's service.
pub const KIND_LEAD: &str = "lead";

/// Notification kind: a new chat message from the other participant.
pub const KIND_CHAT: &str = "chat";

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub user_id: DbId,
    pub kind: String,
    pub text: String,
    pub href: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// A row from the `notification_state` table: one snapshot per user.
///
/// Every field is a forward-only marker. Maps are keyed by request id
/// (serialized as its string form in JSONB).
#[derive(Debug, Clone, FromRow)]
pub struct NotificationState {
    pub user_id: DbId,
    /// Offers seen per owned request, by count.
    pub offer_counts: Json<HashMap<DbId, i64>>,
    /// Offers seen per owned request, by id set (catches upserts that
    /// do not change the count).
    pub offer_ids: Json<HashMap<DbId, Vec<DbId>>>,
    /// Acceptance marker per request, provider side.
    pub accepted_seen: Json<HashMap<DbId, String>>,
    /// Acceptance marker per owned request, client side.
    pub client_accepted_seen: Json<HashMap<DbId, String>>,
    /// Lead ids already seen.
    pub lead_ids: Json<HashSet<DbId>>,
    /// Last chat message id seen per request.
    pub chat_last_msg: Json<HashMap<DbId, DbId>>,
    /// Dedup keys of events already emitted.
    pub sent_keys: Json<HashSet<String>>,
    /// False until the first (silent) seeding pass has completed.
    pub initialized: bool,
}

impl NotificationState {
    /// Fresh, uninitialized state for a user's cold start.
    pub fn empty(user_id: DbId) -> Self {
        NotificationState {
            user_id,
            offer_counts: Json(HashMap::new()),
            offer_ids: Json(HashMap::new()),
            accepted_seen: Json(HashMap::new()),
            client_accepted_seen: Json(HashMap::new()),
            lead_ids: Json(HashSet::new()),
            chat_last_msg: Json(HashMap::new()),
            sent_keys: Json(HashSet::new()),
            initialized: false,
        }
    }
}

/// Offer summary of one owned request, one differ input row.
#[derive(Debug, Clone, FromRow)]
pub struct OwnedRequestOffers {
    pub request_id: DbId,
    pub title: String,
    pub offer_ids: Vec<DbId>,
}

/// An accepted offer relevant to a user, one differ input row.
#[derive(Debug, Clone, FromRow)]
pub struct AcceptedOfferInfo {
    pub request_id: DbId,
    pub title: String,
    pub provider_id: DbId,
}

/// The latest chat message of a request the user participates in.
#[derive(Debug, Clone, FromRow)]
pub struct LastChatMessage {
    pub request_id: DbId,
    pub title: String,
    pub message_id: DbId,
    pub sender_id: DbId,
}
