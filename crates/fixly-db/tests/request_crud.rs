//! Integration tests for request CRUD and cascade behaviour.

use fixly_core::request::STATUS_PENDING;
use fixly_core::roles::{ROLE_CLIENT, ROLE_PROVIDER};
use fixly_core::types::DbId;
use fixly_db::models::request::{CreateRequest, UpdateRequest};
use fixly_db::models::user::UpdateProfile;
use fixly_db::repositories::{ChatRepo, OfferRepo, ProfileRepo, RequestRepo, ReviewRepo, UserRepo};
use sqlx::PgPool;

async fn new_user(pool: &PgPool, username: &str, role: &str) -> DbId {
    let user = UserRepo::create(
        pool,
        username,
        &format!("{username}@example.test"),
        "$argon2id$stub",
    )
    .await
    .unwrap();
    ProfileRepo::update(
        pool,
        user.id,
        &UpdateProfile {
            display_name: None,
            photo_url: None,
            role: Some(role.to_string()),
            location: None,
            bio: None,
        },
    )
    .await
    .unwrap();
    user.id
}

fn new_request(title: &str) -> CreateRequest {
    CreateRequest {
        title: title.to_string(),
        category: "General".to_string(),
        location: String::new(),
        urgency: "normal".to_string(),
        description: String::new(),
        budget: Some(1_000.0),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_applies_defaults(pool: PgPool) {
    let client = new_user(&pool, "c1", ROLE_CLIENT).await;

    let request = RequestRepo::create(&pool, client, &new_request("  Fix sink  "))
        .await
        .unwrap();

    assert_eq!(request.title, "Fix sink");
    assert_eq!(request.status, STATUS_PENDING);
    assert_eq!(request.accepted_offer_id, None);
    assert_eq!(request.owner_id, client);

    let offers = OfferRepo::list_views_for_request(&pool, request.id)
        .await
        .unwrap();
    assert!(offers.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_is_a_shallow_patch(pool: PgPool) {
    let client = new_user(&pool, "c1", ROLE_CLIENT).await;
    let request = RequestRepo::create(&pool, client, &new_request("Fix sink"))
        .await
        .unwrap();

    let patch = UpdateRequest {
        title: Some("Fix kitchen sink".to_string()),
        category: None,
        location: None,
        urgency: Some("alta".to_string()),
        description: None,
        status: None,
        budget: None,
    };
    let updated = RequestRepo::update(&pool, request.id, &patch)
        .await
        .unwrap()
        .expect("request should exist");

    assert_eq!(updated.title, "Fix kitchen sink");
    assert_eq!(updated.urgency, "alta");
    // Untouched fields survive.
    assert_eq!(updated.category, "General");
    assert_eq!(updated.budget, Some(1_000.0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_request_returns_none(pool: PgPool) {
    let patch = UpdateRequest {
        title: Some("x".to_string()),
        category: None,
        location: None,
        urgency: None,
        description: None,
        status: None,
        budget: None,
    };
    let result = RequestRepo::update(&pool, DbId::new_v4(), &patch).await.unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_cascades_to_dependents(pool: PgPool) {
    let client = new_user(&pool, "c1", ROLE_CLIENT).await;
    let provider = new_user(&pool, "p1", ROLE_PROVIDER).await;

    let request = RequestRepo::create(&pool, client, &new_request("Fix sink"))
        .await
        .unwrap();
    let (offer, _) = OfferRepo::upsert_for_provider(&pool, request.id, provider, "hi", 10.0)
        .await
        .unwrap();
    OfferRepo::accept(&pool, request.id, offer.id).await.unwrap();
    ChatRepo::insert(&pool, request.id, client, provider, "hola")
        .await
        .unwrap();
    ReviewRepo::create(&pool, request.id, provider, client, 5, "ok")
        .await
        .unwrap();

    assert!(RequestRepo::delete(&pool, request.id).await.unwrap());

    assert!(RequestRepo::find_by_id(&pool, request.id)
        .await
        .unwrap()
        .is_none());
    assert!(OfferRepo::list_views_for_request(&pool, request.id)
        .await
        .unwrap()
        .is_empty());
    assert!(ChatRepo::list_for_request(&pool, request.id)
        .await
        .unwrap()
        .is_empty());
    assert!(ReviewRepo::list_for_user(&pool, provider)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_is_newest_first(pool: PgPool) {
    let client = new_user(&pool, "c1", ROLE_CLIENT).await;

    let first = RequestRepo::create(&pool, client, &new_request("first"))
        .await
        .unwrap();
    let second = RequestRepo::create(&pool, client, &new_request("second"))
        .await
        .unwrap();

    let listed = RequestRepo::list(&pool).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[1].id, first.id);
}
