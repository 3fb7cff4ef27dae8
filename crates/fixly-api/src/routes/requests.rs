//! Route definitions for the `/requests` resource and its offers.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{offers, requests};
use crate::state::AppState;

/// Routes mounted at `/requests`.
///
/// ```text
/// GET    /                              -> list (public)
/// POST   /                              -> create (client)
/// GET    /{id}                          -> get_by_id (public)
/// PUT    /{id}                          -> update (owner)
/// DELETE /{id}                          -> delete (owner)
///
/// GET    /{id}/offers                   -> offers::list (public)
/// POST   /{id}/offers                   -> offers::upsert (provider)
/// POST   /{id}/offers/{offer_id}/accept -> offers::accept (owner)
/// POST   /{id}/offers/{offer_id}/reject -> offers::reject (owner)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(requests::list).post(requests::create))
        .route(
            "/{id}",
            get(requests::get_by_id)
                .put(requests::update)
                .delete(requests::delete),
        )
        .route("/{id}/offers", get(offers::list).post(offers::upsert))
        .route("/{id}/offers/{offer_id}/accept", post(offers::accept))
        .route("/{id}/offers/{offer_id}/reject", post(offers::reject))
}
