//! Handlers for service-contact leads.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use fixly_core::error::CoreError;
use fixly_core::roles::ROLE_CLIENT;
use fixly_core::types::DbId;
use fixly_db::models::lead::{CreateLead, Lead};
use fixly_db::repositories::{LeadRepo, ServiceRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::require_role;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/services/{id}/contact
///
/// A client contacts the owner of a listing. The lead is addressed to
/// the listing's owner and starts at status `nuevo`.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(service_id): Path<DbId>,
    Json(input): Json<CreateLead>,
) -> AppResult<(StatusCode, Json<Lead>)> {
    let service = ServiceRepo::find_by_id(&state.pool, service_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Service",
            id: service_id,
        }))?;

    require_role(
        &state.pool,
        auth.user_id,
        ROLE_CLIENT,
        "Solo clientes pueden contactar a un proveedor",
    )
    .await?;

    let lead = LeadRepo::create(
        &state.pool,
        service.id,
        service.owner_id,
        auth.user_id,
        &input.message,
        &input.contact,
    )
    .await?;

    tracing::info!(lead_id = %lead.id, service_id = %service.id, "Lead created");

    Ok((StatusCode::CREATED, Json(lead)))
}

/// GET /api/me/leads
///
/// Leads received by the authenticated user as a provider.
pub async fn my_leads(auth: AuthUser, State(state): State<AppState>) -> AppResult<Json<Vec<Lead>>> {
    let leads = LeadRepo::list_for_provider(&state.pool, auth.user_id).await?;
    Ok(Json(leads))
}
