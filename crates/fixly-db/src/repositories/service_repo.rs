//! Repository for the `services` table.

use fixly_core::types::DbId;
use sqlx::PgPool;

use crate::models::service::{CreateService, Service, UpdateService};

/// Column list for `services` queries.
const COLUMNS: &str =
    "id, owner_id, title, category, price_from, location, description, status, created_at";

/// Provides CRUD operations for service listings.
pub struct ServiceRepo;

impl ServiceRepo {
    /// Create a listing owned by `owner_id` with status `activo`.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateService,
    ) -> Result<Service, sqlx::Error> {
        sqlx::query_as(&format!(
            "INSERT INTO services (owner_id, title, category, price_from, location, description) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        ))
        .bind(owner_id)
        .bind(input.title.trim())
        .bind(&input.category)
        .bind(input.price_from)
        .bind(&input.location)
        .bind(&input.description)
        .fetch_one(pool)
        .await
    }

    /// Find a listing by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Service>, sqlx::Error> {
        sqlx::query_as(&format!("SELECT {COLUMNS} FROM services WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all listings, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Service>, sqlx::Error> {
        sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM services ORDER BY created_at DESC"
        ))
        .fetch_all(pool)
        .await
    }

    /// List one owner's listings, newest first.
    pub async fn list_by_owner(pool: &PgPool, owner_id: DbId) -> Result<Vec<Service>, sqlx::Error> {
        sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM services WHERE owner_id = $1 ORDER BY created_at DESC"
        ))
        .bind(owner_id)
        .fetch_all(pool)
        .await
    }

    /// Partially update a listing.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateService,
    ) -> Result<Option<Service>, sqlx::Error> {
        sqlx::query_as(&format!(
            "UPDATE services SET \
                title = COALESCE($2, title), \
                category = COALESCE($3, category), \
                price_from = COALESCE($4, price_from), \
                location = COALESCE($5, location), \
                description = COALESCE($6, description), \
                status = COALESCE($7, status) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(input.title.as_deref())
        .bind(input.category.as_deref())
        .bind(input.price_from)
        .bind(input.location.as_deref())
        .bind(input.description.as_deref())
        .bind(input.status.as_deref())
        .fetch_optional(pool)
        .await
    }

    /// Delete a listing; its leads cascade with it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
