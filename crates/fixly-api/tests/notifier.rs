//! Integration tests for the notification differ.
//!
//! Passes are driven directly (no timer) against state set up through
//! the HTTP surface, which is exactly what the background loop does on
//! each tick.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use fixly_api::auth::jwt::JwtConfig;
use fixly_api::background::notifier;
use fixly_api::config::ServerConfig;
use fixly_api::routes;
use fixly_api::state::AppState;
use fixly_db::repositories::NotificationRepo;

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

fn test_app(pool: PgPool) -> Router {
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![],
        request_timeout_secs: 30,
        notifier_enabled: false,
        notifier_poll_secs: 12,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_days: 7,
        },
    };
    let state = AppState {
        pool,
        config: Arc::new(config),
    };
    Router::new().nest("/api", routes::api_routes()).with_state(state)
}

async fn send(
    app: &Router,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn signup(app: &Router, username: &str, role: &str) -> (String, Uuid) {
    send(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": username,
            "email": format!("{username}@example.test"),
            "password": "Fixly2024",
        })),
    )
    .await;
    let (_, body) = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "userOrEmail": username, "password": "Fixly2024" })),
    )
    .await;
    let token = body["token"].as_str().unwrap().to_string();
    let user_id: Uuid = body["user"]["id"].as_str().unwrap().parse().unwrap();
    send(
        app,
        "PUT",
        "/api/profile",
        Some(&token),
        Some(json!({ "role": role })),
    )
    .await;
    (token, user_id)
}

async fn kinds_for(pool: &PgPool, user_id: Uuid) -> Vec<String> {
    NotificationRepo::list_for_user(pool, user_id, false, 100, 0)
        .await
        .unwrap()
        .into_iter()
        .map(|n| n.kind)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cold_start_emits_nothing(pool: PgPool) {
    let app = test_app(pool.clone());

    let (c1, c1_id) = signup(&app, "c1", "client").await;
    let (p1, _) = signup(&app, "p1", "provider").await;

    // Pre-existing state before the differ ever runs.
    let (_, request) = send(
        &app,
        "POST",
        "/api/requests",
        Some(&c1),
        Some(json!({ "title": "Fix sink" })),
    )
    .await;
    let request_id = request["id"].as_str().unwrap().to_string();
    send(
        &app,
        "POST",
        &format!("/api/requests/{request_id}/offers"),
        Some(&p1),
        Some(json!({ "price": 10.0 })),
    )
    .await;

    // The seeding pass swallows everything.
    let emitted = notifier::run_pass(&pool).await.unwrap();
    assert_eq!(emitted, 0);
    assert!(kinds_for(&pool, c1_id).await.is_empty());

    // And a second pass with no changes stays silent.
    let emitted = notifier::run_pass(&pool).await.unwrap();
    assert_eq!(emitted, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_new_offer_notifies_owner_once(pool: PgPool) {
    let app = test_app(pool.clone());

    let (c1, c1_id) = signup(&app, "c1", "client").await;
    let (p1, _) = signup(&app, "p1", "provider").await;

    let (_, request) = send(
        &app,
        "POST",
        "/api/requests",
        Some(&c1),
        Some(json!({ "title": "Fix sink" })),
    )
    .await;
    let request_id = request["id"].as_str().unwrap().to_string();

    // Seed snapshots before the offer exists.
    notifier::run_pass(&pool).await.unwrap();

    send(
        &app,
        "POST",
        &format!("/api/requests/{request_id}/offers"),
        Some(&p1),
        Some(json!({ "price": 10.0 })),
    )
    .await;

    let emitted = notifier::run_pass(&pool).await.unwrap();
    assert_eq!(emitted, 1);
    assert_eq!(kinds_for(&pool, c1_id).await, vec!["offer".to_string()]);

    // At-most-once: replaying the pass emits nothing new.
    let emitted = notifier::run_pass(&pool).await.unwrap();
    assert_eq!(emitted, 0);
    assert_eq!(kinds_for(&pool, c1_id).await.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_acceptance_notifies_both_sides(pool: PgPool) {
    let app = test_app(pool.clone());

    let (c1, c1_id) = signup(&app, "c1", "client").await;
    let (p1, p1_id) = signup(&app, "p1", "provider").await;

    let (_, request) = send(
        &app,
        "POST",
        "/api/requests",
        Some(&c1),
        Some(json!({ "title": "Fix sink" })),
    )
    .await;
    let request_id = request["id"].as_str().unwrap().to_string();
    let (_, offer) = send(
        &app,
        "POST",
        &format!("/api/requests/{request_id}/offers"),
        Some(&p1),
        Some(json!({ "price": 10.0 })),
    )
    .await;
    let offer_id = offer["id"].as_str().unwrap().to_string();

    notifier::run_pass(&pool).await.unwrap();

    send(
        &app,
        "POST",
        &format!("/api/requests/{request_id}/offers/{offer_id}/accept"),
        Some(&c1),
        None,
    )
    .await;

    let emitted = notifier::run_pass(&pool).await.unwrap();
    assert_eq!(emitted, 2);
    assert_eq!(kinds_for(&pool, p1_id).await, vec!["accepted".to_string()]);
    assert_eq!(
        kinds_for(&pool, c1_id).await,
        vec!["accepted_client".to_string()]
    );

    // Status markers never regress: no repeats.
    let emitted = notifier::run_pass(&pool).await.unwrap();
    assert_eq!(emitted, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_chat_notifies_only_the_other_party(pool: PgPool) {
    let app = test_app(pool.clone());

    let (c1, c1_id) = signup(&app, "c1", "client").await;
    let (p1, p1_id) = signup(&app, "p1", "provider").await;

    let (_, request) = send(
        &app,
        "POST",
        "/api/requests",
        Some(&c1),
        Some(json!({ "title": "Fix sink" })),
    )
    .await;
    let request_id = request["id"].as_str().unwrap().to_string();
    let (_, offer) = send(
        &app,
        "POST",
        &format!("/api/requests/{request_id}/offers"),
        Some(&p1),
        Some(json!({ "price": 10.0 })),
    )
    .await;
    let offer_id = offer["id"].as_str().unwrap().to_string();
    send(
        &app,
        "POST",
        &format!("/api/requests/{request_id}/offers/{offer_id}/accept"),
        Some(&c1),
        None,
    )
    .await;

    notifier::run_pass(&pool).await.unwrap();

    // The provider writes; only the client should hear about it.
    send(
        &app,
        "POST",
        &format!("/api/chats/{request_id}/messages"),
        Some(&p1),
        Some(json!({ "text": "Mañana a las 10" })),
    )
    .await;

    notifier::run_pass(&pool).await.unwrap();
    assert!(kinds_for(&pool, c1_id).await.contains(&"chat".to_string()));
    assert!(!kinds_for(&pool, p1_id).await.contains(&"chat".to_string()));

    // The client replies; now the provider hears about that message.
    send(
        &app,
        "POST",
        &format!("/api/chats/{request_id}/messages"),
        Some(&c1),
        Some(json!({ "text": "Perfecto" })),
    )
    .await;

    notifier::run_pass(&pool).await.unwrap();
    assert!(kinds_for(&pool, p1_id).await.contains(&"chat".to_string()));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lead_notifies_provider(pool: PgPool) {
    let app = test_app(pool.clone());

    let (c1, _) = signup(&app, "c1", "client").await;
    let (p1, p1_id) = signup(&app, "p1", "provider").await;

    let (_, service) = send(
        &app,
        "POST",
        "/api/services",
        Some(&p1),
        Some(json!({ "title": "Gasfitería" })),
    )
    .await;
    let service_id = service["id"].as_str().unwrap().to_string();

    notifier::run_pass(&pool).await.unwrap();

    send(
        &app,
        "POST",
        &format!("/api/services/{service_id}/contact"),
        Some(&c1),
        Some(json!({ "message": "Necesito ayuda" })),
    )
    .await;

    let emitted = notifier::run_pass(&pool).await.unwrap();
    assert_eq!(emitted, 1);
    assert_eq!(kinds_for(&pool, p1_id).await, vec!["lead".to_string()]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_disabled_user_is_skipped(pool: PgPool) {
    let app = test_app(pool.clone());

    let (c1, c1_id) = signup(&app, "c1", "client").await;
    let (p1, _) = signup(&app, "p1", "provider").await;

    let (_, request) = send(
        &app,
        "POST",
        "/api/requests",
        Some(&c1),
        Some(json!({ "title": "Fix sink" })),
    )
    .await;
    let request_id = request["id"].as_str().unwrap().to_string();

    notifier::run_pass(&pool).await.unwrap();

    // The client opts out before the offer arrives.
    let (status, _) = send(
        &app,
        "PUT",
        "/api/notifications/settings",
        Some(&c1),
        Some(json!({ "enabled": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    send(
        &app,
        "POST",
        &format!("/api/requests/{request_id}/offers"),
        Some(&p1),
        Some(json!({ "price": 10.0 })),
    )
    .await;

    let emitted = notifier::run_pass(&pool).await.unwrap();
    assert_eq!(emitted, 0);
    assert!(kinds_for(&pool, c1_id).await.is_empty());

    // Unread-count endpoint agrees.
    let (_, count) = send(&app, "GET", "/api/notifications/unread-count", Some(&c1), None).await;
    assert_eq!(count["count"], 0);
}
