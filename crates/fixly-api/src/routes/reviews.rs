//! Route definitions for the `/reviews` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::reviews;
use crate::state::AppState;

/// Routes mounted at `/reviews`.
///
/// ```text
/// POST / -> create (request owner, after completion)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(reviews::create))
}
