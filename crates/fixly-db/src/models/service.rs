//! Service listing entity models and DTOs.

use fixly_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `services` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Service {
    pub id: DbId,
    #[serde(rename = "ownerId")]
    pub owner_id: DbId,
    pub title: String,
    pub category: String,
    #[serde(rename = "priceFrom")]
    pub price_from: f64,
    pub location: String,
    pub description: String,
    pub status: String,
    pub created_at: Timestamp,
}

/// DTO for creating a service listing.
#[derive(Debug, Deserialize)]
pub struct CreateService {
    pub title: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default, rename = "priceFrom")]
    pub price_from: f64,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
}

fn default_category() -> String {
    "General".to_string()
}

/// DTO for partially updating a service listing.
#[derive(Debug, Deserialize)]
pub struct UpdateService {
    pub title: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "priceFrom")]
    pub price_from: Option<f64>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}
