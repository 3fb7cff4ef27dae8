//! Repository for the `offers` table.
//!
//! Two operations here are more than plain CRUD: `upsert_for_provider`
//! enforces the one-offer-per-provider rule by mutating in place, and
//! `accept` applies the winner-selection invariant (exactly one
//! accepted offer per request) as a single transaction so no reader
//! ever observes a partially applied accept.

use fixly_core::offer::{OFFER_ACCEPTED, OFFER_PENDING, OFFER_REJECTED};
use fixly_core::request::{STATUS_IN_PROGRESS, STATUS_PENDING};
use fixly_core::types::DbId;
use sqlx::PgPool;

use crate::models::offer::{AcceptOutcome, Offer, OfferView};
use crate::models::request::Request;

/// Column list for `offers` queries.
const COLUMNS: &str = "id, request_id, provider_id, message, price, status, created_at";

/// Column list for offer views joined with the provider's identity.
const VIEW_COLUMNS: &str =
    "o.id, o.request_id, o.provider_id, \
     COALESCE(NULLIF(TRIM(p.display_name), ''), u.username) AS provider_name, \
     p.photo_url AS provider_photo, \
     o.message, o.price, o.status, o.created_at";

/// Column list for `requests` rows returned by the accept transaction.
const REQUEST_COLUMNS: &str = "id, owner_id, title, category, location, urgency, description, \
                               status, budget, accepted_offer_id, created_at";

/// Provides offer lifecycle operations.
pub struct OfferRepo;

impl OfferRepo {
    /// List a request's offers with provider identity, newest first.
    pub async fn list_views_for_request(
        pool: &PgPool,
        request_id: DbId,
    ) -> Result<Vec<OfferView>, sqlx::Error> {
        sqlx::query_as(&format!(
            "SELECT {VIEW_COLUMNS} FROM offers o \
             JOIN users u ON u.id = o.provider_id \
             JOIN profiles p ON p.user_id = o.provider_id \
             WHERE o.request_id = $1 \
             ORDER BY o.created_at DESC"
        ))
        .bind(request_id)
        .fetch_all(pool)
        .await
    }

    /// Bulk variant of [`Self::list_views_for_request`] used by the
    /// request listing to avoid one query per request.
    pub async fn list_views_for_requests(
        pool: &PgPool,
        request_ids: &[DbId],
    ) -> Result<Vec<OfferView>, sqlx::Error> {
        sqlx::query_as(&format!(
            "SELECT {VIEW_COLUMNS} FROM offers o \
             JOIN users u ON u.id = o.provider_id \
             JOIN profiles p ON p.user_id = o.provider_id \
             WHERE o.request_id = ANY($1) \
             ORDER BY o.created_at DESC"
        ))
        .bind(request_ids)
        .fetch_all(pool)
        .await
    }

    /// Find an offer by id within a request.
    pub async fn find_in_request(
        pool: &PgPool,
        request_id: DbId,
        offer_id: DbId,
    ) -> Result<Option<Offer>, sqlx::Error> {
        sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM offers WHERE id = $1 AND request_id = $2"
        ))
        .bind(offer_id)
        .bind(request_id)
        .fetch_optional(pool)
        .await
    }

    /// Create or update the provider's single offer on a request.
    ///
    /// An existing offer keeps its identity and `created_at`; message
    /// and price are replaced. An `accepted` offer stays accepted when
    /// edited; any other status resets to `pending`. Returns the offer
    /// and whether it was newly created.
    pub async fn upsert_for_provider(
        pool: &PgPool,
        request_id: DbId,
        provider_id: DbId,
        message: &str,
        price: f64,
    ) -> Result<(Offer, bool), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let existing: Option<Offer> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM offers \
             WHERE request_id = $1 AND provider_id = $2 \
             FOR UPDATE"
        ))
        .bind(request_id)
        .bind(provider_id)
        .fetch_optional(&mut *tx)
        .await?;

        let (offer, created) = match existing {
            Some(prev) => {
                let status = if prev.status == OFFER_ACCEPTED {
                    OFFER_ACCEPTED
                } else {
                    OFFER_PENDING
                };
                let updated: Offer = sqlx::query_as(&format!(
                    "UPDATE offers SET message = $2, price = $3, status = $4 \
                     WHERE id = $1 \
                     RETURNING {COLUMNS}"
                ))
                .bind(prev.id)
                .bind(message)
                .bind(price)
                .bind(status)
                .fetch_one(&mut *tx)
                .await?;
                (updated, false)
            }
            None => {
                let inserted: Offer = sqlx::query_as(&format!(
                    "INSERT INTO offers (request_id, provider_id, message, price) \
                     VALUES ($1, $2, $3, $4) \
                     RETURNING {COLUMNS}"
                ))
                .bind(request_id)
                .bind(provider_id)
                .bind(message)
                .bind(price)
                .fetch_one(&mut *tx)
                .await?;
                (inserted, true)
            }
        };

        tx.commit().await?;
        Ok((offer, created))
    }

    /// Accept one offer and reject every competitor, atomically.
    ///
    /// In a single transaction: all sibling offers become `rejected`,
    /// the target becomes `accepted`, `requests.accepted_offer_id` is
    /// set, and a `pendiente` request advances to `en progreso`.
    /// Acceptance is terminal: once a different offer is accepted the
    /// call reports [`AcceptOutcome::AlreadyAccepted`]; re-accepting
    /// the same offer is an idempotent success.
    pub async fn accept(
        pool: &PgPool,
        request_id: DbId,
        offer_id: DbId,
    ) -> Result<AcceptOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let request: Option<Request> = sqlx::query_as(&format!(
            "SELECT {REQUEST_COLUMNS} FROM requests WHERE id = $1 FOR UPDATE"
        ))
        .bind(request_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(request) = request else {
            return Ok(AcceptOutcome::OfferNotFound);
        };

        match request.accepted_offer_id {
            Some(current) if current == offer_id => {
                // Idempotent re-accept of the current winner.
                tx.commit().await?;
                return Ok(AcceptOutcome::Accepted(request));
            }
            Some(_) => return Ok(AcceptOutcome::AlreadyAccepted),
            None => {}
        }

        let target: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM offers WHERE id = $1 AND request_id = $2")
                .bind(offer_id)
                .bind(request_id)
                .fetch_optional(&mut *tx)
                .await?;
        if target.is_none() {
            return Ok(AcceptOutcome::OfferNotFound);
        }

        sqlx::query("UPDATE offers SET status = $2 WHERE request_id = $1 AND id <> $3")
            .bind(request_id)
            .bind(OFFER_REJECTED)
            .bind(offer_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE offers SET status = $2 WHERE id = $1")
            .bind(offer_id)
            .bind(OFFER_ACCEPTED)
            .execute(&mut *tx)
            .await?;

        let updated: Request = sqlx::query_as(&format!(
            "UPDATE requests \
             SET accepted_offer_id = $2, \
                 status = CASE WHEN status = $3 THEN $4 ELSE status END \
             WHERE id = $1 \
             RETURNING {REQUEST_COLUMNS}"
        ))
        .bind(request_id)
        .bind(offer_id)
        .bind(STATUS_PENDING)
        .bind(STATUS_IN_PROGRESS)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(AcceptOutcome::Accepted(updated))
    }

    /// Reject a single offer. Does not touch its siblings or the
    /// request's accepted offer reference.
    pub async fn reject(
        pool: &PgPool,
        request_id: DbId,
        offer_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE offers SET status = $3 WHERE id = $1 AND request_id = $2",
        )
        .bind(offer_id)
        .bind(request_id)
        .bind(OFFER_REJECTED)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
