//! Route definitions for the `/services` resource and its leads.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{leads, services};
use crate::state::AppState;

/// Routes mounted at `/services`.
///
/// ```text
/// GET    /              -> list (public)
/// POST   /              -> create (provider)
/// GET    /me            -> my_services
/// GET    /{id}          -> get_by_id (public)
/// PUT    /{id}          -> update (owner)
/// DELETE /{id}          -> delete (owner)
/// POST   /{id}/contact  -> leads::create (client)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(services::list).post(services::create))
        .route("/me", get(services::my_services))
        .route(
            "/{id}",
            get(services::get_by_id)
                .put(services::update)
                .delete(services::delete),
        )
        .route("/{id}/contact", post(leads::create))
}
