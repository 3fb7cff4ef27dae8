//! Repository for the `requests` table.

use fixly_core::types::DbId;
use sqlx::PgPool;

use crate::models::notification::{AcceptedOfferInfo, OwnedRequestOffers};
use crate::models::request::{CreateRequest, Request, UpdateRequest};

/// Column list for `requests` queries.
const COLUMNS: &str = "id, owner_id, title, category, location, urgency, description, \
                       status, budget, accepted_offer_id, created_at";

/// Provides CRUD operations for service requests.
pub struct RequestRepo;

impl RequestRepo {
    /// Create a request owned by `owner_id`. Status defaults to
    /// `pendiente` with no offers and no accepted offer.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateRequest,
    ) -> Result<Request, sqlx::Error> {
        sqlx::query_as(&format!(
            "INSERT INTO requests (owner_id, title, category, location, urgency, description, budget) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        ))
        .bind(owner_id)
        .bind(input.title.trim())
        .bind(&input.category)
        .bind(&input.location)
        .bind(&input.urgency)
        .bind(&input.description)
        .bind(input.budget)
        .fetch_one(pool)
        .await
    }

    /// Find a request by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Request>, sqlx::Error> {
        sqlx::query_as(&format!("SELECT {COLUMNS} FROM requests WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all requests, newest first. No pagination: the full scan is
    /// part of the product contract (clients filter locally).
    pub async fn list(pool: &PgPool) -> Result<Vec<Request>, sqlx::Error> {
        sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM requests ORDER BY created_at DESC"
        ))
        .fetch_all(pool)
        .await
    }

    /// Shallow-merge a patch into a request. Absent fields are left
    /// untouched. Returns `None` if the request does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRequest,
    ) -> Result<Option<Request>, sqlx::Error> {
        sqlx::query_as(&format!(
            "UPDATE requests SET \
                title = COALESCE($2, title), \
                category = COALESCE($3, category), \
                location = COALESCE($4, location), \
                urgency = COALESCE($5, urgency), \
                description = COALESCE($6, description), \
                status = COALESCE($7, status), \
                budget = COALESCE($8, budget) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(input.title.as_deref())
        .bind(input.category.as_deref())
        .bind(input.location.as_deref())
        .bind(input.urgency.as_deref())
        .bind(input.description.as_deref())
        .bind(input.status.as_deref())
        .bind(input.budget)
        .fetch_optional(pool)
        .await
    }

    /// Delete a request. Offers, chat messages, and reviews go with it
    /// through FK cascades, as one atomic unit.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM requests WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------
    // Notification differ inputs
    // -----------------------------------------------------------------

    /// Offer-id summaries for every request a user owns.
    pub async fn list_owned_offer_summaries(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<OwnedRequestOffers>, sqlx::Error> {
        sqlx::query_as(
            "SELECT r.id AS request_id, r.title, \
                    COALESCE(array_agg(o.id) FILTER (WHERE o.id IS NOT NULL), '{}') AS offer_ids \
             FROM requests r \
             LEFT JOIN offers o ON o.request_id = r.id \
             WHERE r.owner_id = $1 \
             GROUP BY r.id, r.title",
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await
    }

    /// Requests whose accepted offer belongs to the given provider.
    pub async fn list_accepted_for_provider(
        pool: &PgPool,
        provider_id: DbId,
    ) -> Result<Vec<AcceptedOfferInfo>, sqlx::Error> {
        sqlx::query_as(
            "SELECT r.id AS request_id, r.title, o.provider_id \
             FROM requests r \
             JOIN offers o ON o.id = r.accepted_offer_id \
             WHERE o.provider_id = $1",
        )
        .bind(provider_id)
        .fetch_all(pool)
        .await
    }

    /// Owned requests that have an accepted offer.
    pub async fn list_accepted_owned(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<AcceptedOfferInfo>, sqlx::Error> {
        sqlx::query_as(
            "SELECT r.id AS request_id, r.title, o.provider_id \
             FROM requests r \
             JOIN offers o ON o.id = r.accepted_offer_id \
             WHERE r.owner_id = $1",
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await
    }
}
