pub mod auth;
pub mod chat;
pub mod health;
pub mod notification;
pub mod profile;
pub mod requests;
pub mod reviews;
pub mod services;
pub mod users;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login (public)
/// /auth/password-change                change password (requires auth)
///
/// /profile                             get, update own profile
///
/// /requests                            list (public), create (client)
/// /requests/{id}                       get (public), update, delete (owner)
/// /requests/{id}/offers                list (public), upsert (provider)
/// /requests/{id}/offers/{oid}/accept   accept offer (owner, POST)
/// /requests/{id}/offers/{oid}/reject   reject offer (owner, POST)
///
/// /services                            list (public), create (provider)
/// /services/me                         own listings
/// /services/{id}                       get (public), update, delete (owner)
/// /services/{id}/contact               create lead (client, POST)
/// /me/leads                            leads received as provider
///
/// /chats/{request_id}/messages         transcript, send (participants only)
///
/// /reviews                             create review (request owner, POST)
/// /users/{id}                          public user card
/// /users/{id}/reviews                  received reviews
/// /users/{id}/rating                   rating aggregate
///
/// /notifications                       list
/// /notifications/read-all              mark all read (POST)
/// /notifications/unread-count          unread counter
/// /notifications/{id}/read             mark one read (POST)
/// /notifications/settings              differ on/off toggle (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .merge(profile::router())
        .nest("/requests", requests::router())
        .nest("/services", services::router())
        .nest("/chats", chat::router())
        .nest("/reviews", reviews::router())
        .nest("/users", users::router())
        .nest("/notifications", notification::router())
        .route("/me/leads", get(handlers::leads::my_leads))
}
