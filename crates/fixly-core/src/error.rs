//! Domain-level error taxonomy.
//!
//! Every layer above `fixly-core` maps these variants onto its own
//! surface: the API layer turns them into HTTP status codes, the DB
//! layer returns them from guard clauses before touching the pool.
//! Messages are end-user facing and shown verbatim by clients, so the
//! Spanish wording from the product is preserved at the call sites.

use crate::types::DbId;

/// Domain error shared across all crates.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An entity lookup by id came back empty.
    #[error("{entity} with id {id} not found")]
    NotFound {
        /// Human-readable entity name (e.g. `"Request"`).
        entity: &'static str,
        /// The id that was looked up.
        id: DbId,
    },

    /// Input failed a domain validation rule.
    #[error("{0}")]
    Validation(String),

    /// The operation conflicts with existing state (duplicates, terminal transitions).
    #[error("{0}")]
    Conflict(String),

    /// The caller is not authenticated.
    #[error("{0}")]
    Unauthorized(String),

    /// The caller is authenticated but not allowed to perform this action.
    #[error("{0}")]
    Forbidden(String),

    /// An unexpected internal failure.
    #[error("{0}")]
    Internal(String),
}
