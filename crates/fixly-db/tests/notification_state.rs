//! Integration tests for the differ's snapshot persistence.

use std::collections::{HashMap, HashSet};

use fixly_core::roles::ROLE_PROVIDER;
use fixly_core::types::DbId;
use fixly_db::models::notification::NotificationState;
use fixly_db::models::user::UpdateProfile;
use fixly_db::repositories::{NotificationStateRepo, ProfileRepo, UserRepo};
use sqlx::PgPool;

async fn new_user(pool: &PgPool, username: &str) -> DbId {
    UserRepo::create(
        pool,
        username,
        &format!("{username}@example.test"),
        "$argon2id$stub",
    )
    .await
    .unwrap()
    .id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cold_start_has_no_state(pool: PgPool) {
    let user = new_user(&pool, "u1").await;
    assert!(NotificationStateRepo::get(&pool, user).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_snapshot_roundtrip(pool: PgPool) {
    let user = new_user(&pool, "u1").await;
    let request = DbId::new_v4();
    let offer = DbId::new_v4();

    let mut state = NotificationState::empty(user);
    state.offer_counts.0.insert(request, 2);
    state.offer_ids.0.insert(request, vec![offer]);
    state.accepted_seen.0.insert(request, "accepted".to_string());
    state.lead_ids.0.insert(DbId::new_v4());
    state.chat_last_msg.0.insert(request, offer);
    state.sent_keys.0.insert(format!("offer:{request}:2"));
    state.initialized = true;

    NotificationStateRepo::upsert(&pool, &state).await.unwrap();

    let loaded = NotificationStateRepo::get(&pool, user)
        .await
        .unwrap()
        .expect("state row should exist");
    assert!(loaded.initialized);
    assert_eq!(loaded.offer_counts.0.get(&request), Some(&2));
    assert_eq!(loaded.offer_ids.0.get(&request), Some(&vec![offer]));
    assert_eq!(
        loaded.accepted_seen.0.get(&request).map(String::as_str),
        Some("accepted")
    );
    assert_eq!(loaded.lead_ids.0.len(), 1);
    assert!(loaded.sent_keys.0.contains(&format!("offer:{request}:2")));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upsert_replaces_existing_row(pool: PgPool) {
    let user = new_user(&pool, "u1").await;

    let state = NotificationState::empty(user);
    NotificationStateRepo::upsert(&pool, &state).await.unwrap();

    let mut advanced = NotificationState::empty(user);
    advanced.initialized = true;
    advanced
        .offer_counts
        .0
        .extend([(DbId::new_v4(), 1i64), (DbId::new_v4(), 3i64)]);
    NotificationStateRepo::upsert(&pool, &advanced).await.unwrap();

    let loaded = NotificationStateRepo::get(&pool, user)
        .await
        .unwrap()
        .unwrap();
    assert!(loaded.initialized);
    assert_eq!(loaded.offer_counts.0.len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_notifiable_users_respect_profile_toggle(pool: PgPool) {
    let on = new_user(&pool, "on").await;
    let off = new_user(&pool, "off").await;

    ProfileRepo::update(
        &pool,
        off,
        &UpdateProfile {
            display_name: None,
            photo_url: None,
            role: Some(ROLE_PROVIDER.to_string()),
            location: None,
            bio: None,
        },
    )
    .await
    .unwrap();
    ProfileRepo::set_notifications_enabled(&pool, off, false)
        .await
        .unwrap();

    let ids = UserRepo::list_notifiable_ids(&pool).await.unwrap();
    assert!(ids.contains(&on));
    assert!(!ids.contains(&off));
}
