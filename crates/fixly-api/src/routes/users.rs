//! Route definitions for the public `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`. All public.
///
/// ```text
/// GET /{id}         -> user_detail
/// GET /{id}/reviews -> user_reviews
/// GET /{id}/rating  -> user_rating
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(users::user_detail))
        .route("/{id}/reviews", get(users::user_reviews))
        .route("/{id}/rating", get(users::user_rating))
}
