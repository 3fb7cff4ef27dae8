//! The notification differ.
//!
//! A fixed-interval loop that, for every active user with notifications
//! enabled, diffs current marketplace state against the user's
//! persisted snapshot and materializes at most one notification row per
//! newly observed change. Five signals are tracked:
//!
//! 1. a new offer arrived on a request the user owns (count delta OR'd
//!    with an id-set delta, so an upsert that replaces an offer without
//!    changing the count is still caught),
//! 2. an offer the user submitted was accepted (provider side),
//! 3. an offer on the user's own request was accepted (client side,
//!    informational),
//! 4. a new lead arrived for the user's service,
//! 5. a new chat message was written by the *other* participant.
//!
//! Snapshot markers only move forward. The first pass for a user with
//! no snapshot row seeds the snapshot silently and emits nothing, so a
//! fresh account (or a fresh database) is not flooded with events for
//! pre-existing state. A persisted set of sent keys guarantees
//! at-most-once emission per logical event.

use std::collections::HashSet;
use std::time::Duration;

use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use fixly_core::offer::OFFER_ACCEPTED;
use fixly_core::roles::{ROLE_CLIENT, ROLE_PROVIDER};
use fixly_core::types::DbId;
use fixly_db::models::notification::{
    NotificationState, KIND_ACCEPTED, KIND_ACCEPTED_CLIENT, KIND_CHAT, KIND_LEAD, KIND_OFFER,
};
use fixly_db::repositories::{
    ChatRepo, LeadRepo, NotificationRepo, NotificationStateRepo, ProfileRepo, RequestRepo,
    UserRepo,
};

/// Run the differ loop until `cancel` is triggered.
pub async fn run(pool: PgPool, poll_interval: Duration, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = poll_interval.as_secs(),
        "Notification differ started"
    );

    let mut interval = tokio::time::interval(poll_interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Notification differ stopping");
                break;
            }
            _ = interval.tick() => {
                match run_pass(&pool).await {
                    Ok(emitted) if emitted > 0 => {
                        tracing::info!(emitted, "Notification differ: new events");
                    }
                    Ok(_) => {
                        tracing::debug!("Notification differ: no changes");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Notification differ: pass failed");
                    }
                }
            }
        }
    }
}

/// One differ pass over every notifiable user. Returns the number of
/// notifications emitted.
pub async fn run_pass(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let mut emitted = 0;
    for user_id in UserRepo::list_notifiable_ids(pool).await? {
        emitted += run_pass_for_user(pool, user_id).await?;
    }
    Ok(emitted)
}

/// One differ pass for a single user.
///
/// Loads the user's snapshot (cold start when absent), computes the
/// five signals, emits notifications for changes observed after the
/// seeding pass, and persists the advanced snapshot.
pub async fn run_pass_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
    let mut state = NotificationStateRepo::get(pool, user_id)
        .await?
        .unwrap_or_else(|| NotificationState::empty(user_id));

    // Cold-start silence: the seeding pass records everything as seen
    // and emits nothing.
    let emit_allowed = state.initialized;
    let mut emitted = 0;

    let profile = ProfileRepo::get_or_create(pool, user_id).await?;

    // --- Signal 1: new offers on owned requests ---
    for summary in RequestRepo::list_owned_offer_summaries(pool, user_id).await? {
        let count = summary.offer_ids.len() as i64;
        let prev_count = state
            .offer_counts
            .0
            .get(&summary.request_id)
            .copied()
            .unwrap_or(0);
        let prev_ids: HashSet<DbId> = state
            .offer_ids
            .0
            .get(&summary.request_id)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default();

        let new_by_count = count > prev_count;
        let new_by_ids = summary.offer_ids.iter().any(|id| !prev_ids.contains(id));

        if (new_by_count || new_by_ids) && emit_allowed {
            let key = format!("offer:{}:{count}", summary.request_id);
            if state.sent_keys.0.insert(key) {
                NotificationRepo::create(
                    pool,
                    user_id,
                    KIND_OFFER,
                    &format!("Nueva oferta en: {}", summary.title),
                    &format!("/requests/{}", summary.request_id),
                )
                .await?;
                emitted += 1;
            }
        }

        // Counts only grow; the id set is a union with what was seen.
        if count > prev_count {
            state.offer_counts.0.insert(summary.request_id, count);
        }
        let mut merged = prev_ids;
        merged.extend(summary.offer_ids.iter().copied());
        state
            .offer_ids
            .0
            .insert(summary.request_id, merged.into_iter().collect());
    }

    // --- Signal 2: the user's offer was accepted (provider side) ---
    if profile.role == ROLE_PROVIDER {
        for info in RequestRepo::list_accepted_for_provider(pool, user_id).await? {
            let already = state
                .accepted_seen
                .0
                .get(&info.request_id)
                .is_some_and(|s| s == OFFER_ACCEPTED);
            if !already {
                if emit_allowed {
                    let key = format!("accepted:{}:{}", info.request_id, info.provider_id);
                    if state.sent_keys.0.insert(key) {
                        NotificationRepo::create(
                            pool,
                            user_id,
                            KIND_ACCEPTED,
                            &format!("Tu oferta fue aceptada: {}", info.title),
                            &format!("/requests/{}", info.request_id),
                        )
                        .await?;
                        emitted += 1;
                    }
                }
                state
                    .accepted_seen
                    .0
                    .insert(info.request_id, OFFER_ACCEPTED.to_string());
            }
        }
    }

    // --- Signal 3: an offer on an owned request was accepted (client side) ---
    if profile.role == ROLE_CLIENT {
        for info in RequestRepo::list_accepted_owned(pool, user_id).await? {
            let already = state
                .client_accepted_seen
                .0
                .get(&info.request_id)
                .is_some_and(|s| s == OFFER_ACCEPTED);
            if !already {
                if emit_allowed {
                    let key = format!("acceptedClient:{}:{}", info.request_id, info.provider_id);
                    if state.sent_keys.0.insert(key) {
                        NotificationRepo::create(
                            pool,
                            user_id,
                            KIND_ACCEPTED_CLIENT,
                            &format!("Seleccionaste una oferta en: {}", info.title),
                            &format!("/requests/{}", info.request_id),
                        )
                        .await?;
                        emitted += 1;
                    }
                }
                state
                    .client_accepted_seen
                    .0
                    .insert(info.request_id, OFFER_ACCEPTED.to_string());
            }
        }
    }

    // --- Signal 4: new leads for the provider ---
    if profile.role == ROLE_PROVIDER {
        for lead_id in LeadRepo::list_ids_for_provider(pool, user_id).await? {
            if state.lead_ids.0.insert(lead_id) && emit_allowed {
                let key = format!("lead:{lead_id}");
                if state.sent_keys.0.insert(key) {
                    NotificationRepo::create(
                        pool,
                        user_id,
                        KIND_LEAD,
                        "Nuevo contacto de cliente para tu servicio",
                        "/services",
                    )
                    .await?;
                    emitted += 1;
                }
            }
        }
    }

    // --- Signal 5: new chat message from the other participant ---
    for last in ChatRepo::last_messages_for_participant(pool, user_id).await? {
        let prev = state.chat_last_msg.0.get(&last.request_id).copied();
        if prev != Some(last.message_id) {
            // Own messages advance the marker without notifying.
            if last.sender_id != user_id && emit_allowed {
                let key = format!("chat:{}:{}", last.request_id, last.message_id);
                if state.sent_keys.0.insert(key) {
                    NotificationRepo::create(
                        pool,
                        user_id,
                        KIND_CHAT,
                        &format!("Nuevo mensaje en: {}", last.title),
                        &format!("/chat/{}", last.request_id),
                    )
                    .await?;
                    emitted += 1;
                }
            }
            state.chat_last_msg.0.insert(last.request_id, last.message_id);
        }
    }

    state.initialized = true;
    NotificationStateRepo::upsert(pool, &state).await?;

    Ok(emitted)
}
