//! Repository for the `leads` table.

use fixly_core::types::DbId;
use sqlx::PgPool;

use crate::models::lead::Lead;

/// Column list for `leads` queries.
const COLUMNS: &str =
    "id, service_id, provider_id, client_id, message, contact, status, created_at";

/// Provides operations for service-contact leads.
pub struct LeadRepo;

impl LeadRepo {
    /// Record a client contacting a service owner. Status starts at
    /// `nuevo`; no further transitions are exposed.
    pub async fn create(
        pool: &PgPool,
        service_id: DbId,
        provider_id: DbId,
        client_id: DbId,
        message: &str,
        contact: &str,
    ) -> Result<Lead, sqlx::Error> {
        sqlx::query_as(&format!(
            "INSERT INTO leads (service_id, provider_id, client_id, message, contact) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        ))
        .bind(service_id)
        .bind(provider_id)
        .bind(client_id)
        .bind(message)
        .bind(contact)
        .fetch_one(pool)
        .await
    }

    /// Leads received by a provider, newest first.
    pub async fn list_for_provider(
        pool: &PgPool,
        provider_id: DbId,
    ) -> Result<Vec<Lead>, sqlx::Error> {
        sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM leads WHERE provider_id = $1 ORDER BY created_at DESC"
        ))
        .bind(provider_id)
        .fetch_all(pool)
        .await
    }

    /// Ids of all leads addressed to a provider (differ input).
    pub async fn list_ids_for_provider(
        pool: &PgPool,
        provider_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM leads WHERE provider_id = $1")
            .bind(provider_id)
            .fetch_all(pool)
            .await
    }
}
