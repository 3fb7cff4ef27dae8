//! Integration tests for reviews and rating aggregates.

use fixly_core::roles::{ROLE_CLIENT, ROLE_PROVIDER};
use fixly_core::types::DbId;
use fixly_db::models::request::CreateRequest;
use fixly_db::models::user::UpdateProfile;
use fixly_db::repositories::{ProfileRepo, RequestRepo, ReviewRepo, UserRepo};
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

async fn new_request(pool: &PgPool, owner: DbId, title: &str) -> DbId {
    RequestRepo::create(
        pool,
        owner,
        &CreateRequest {
            title: title.to_string(),
            category: "General".to_string(),
            location: String::new(),
            urgency: "normal".to_string(),
            description: String::new(),
            budget: None,
        },
    )
    .await
    .unwrap()
    .id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_review_rejected_by_constraint(pool: PgPool) {
    let client = new_user(&pool, "c1", ROLE_CLIENT).await;
    let provider = new_user(&pool, "p1", ROLE_PROVIDER).await;
    let request = new_request(&pool, client, "Fix sink").await;

    ReviewRepo::create(&pool, request, provider, client, 4, "bien")
        .await
        .unwrap();

    assert!(ReviewRepo::exists_for(&pool, request, client).await.unwrap());

    // The unique constraint is the storage-level backstop.
    let second = ReviewRepo::create(&pool, request, provider, client, 5, "otra vez").await;
    assert!(second.is_err());

    let reviews = ReviewRepo::list_for_user(&pool, provider).await.unwrap();
    assert_eq!(reviews.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rating_stats_are_the_arithmetic_mean(pool: PgPool) {
    let provider = new_user(&pool, "p1", ROLE_PROVIDER).await;
    let c1 = new_user(&pool, "c1", ROLE_CLIENT).await;
    let c2 = new_user(&pool, "c2", ROLE_CLIENT).await;

    let r1 = new_request(&pool, c1, "one").await;
    let r2 = new_request(&pool, c2, "two").await;

    ReviewRepo::create(&pool, r1, provider, c1, 5, "").await.unwrap();
    ReviewRepo::create(&pool, r2, provider, c2, 2, "").await.unwrap();

    let stats = ReviewRepo::rating_stats(&pool, provider).await.unwrap();
    assert_eq!(stats.count, 2);
    assert!((stats.avg - 3.5).abs() < f64::EPSILON);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rating_stats_empty_is_zero(pool: PgPool) {
    let provider = new_user(&pool, "p1", ROLE_PROVIDER).await;

    let stats = ReviewRepo::rating_stats(&pool, provider).await.unwrap();
    assert_eq!(stats.count, 0);
    assert_eq!(stats.avg, 0.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_same_reviewer_may_review_different_requests(pool: PgPool) {
    let client = new_user(&pool, "c1", ROLE_CLIENT).await;
    let provider = new_user(&pool, "p1", ROLE_PROVIDER).await;

    let r1 = new_request(&pool, client, "one").await;
    let r2 = new_request(&pool, client, "two").await;

    ReviewRepo::create(&pool, r1, provider, client, 3, "").await.unwrap();
    ReviewRepo::create(&pool, r2, provider, client, 4, "").await.unwrap();

    let stats = ReviewRepo::rating_stats(&pool, provider).await.unwrap();
    assert_eq!(stats.count, 2);
}
