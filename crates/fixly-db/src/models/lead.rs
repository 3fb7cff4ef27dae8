//! Lead (service contact) entity model and DTO.

use fixly_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `leads` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lead {
    pub id: DbId,
    #[serde(rename = "serviceId")]
    pub service_id: DbId,
    #[serde(rename = "providerId")]
    pub provider_id: DbId,
    #[serde(rename = "clientId")]
    pub client_id: DbId,
    pub message: String,
    pub contact: String,
    pub status: String,
    pub created_at: Timestamp,
}

/// DTO for contacting a service owner.
#[derive(Debug, Deserialize)]
pub struct CreateLead {
    pub message: String,
    #[serde(default)]
    pub contact: String,
}
