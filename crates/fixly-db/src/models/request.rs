//! Request entity models and DTOs.
//!
//! The wire shapes keep the field names the original API exposed:
//! snake_case for plain columns, camelCase for the derived
//! owner/winner fields (`ownerId`, `acceptedOfferId`, ...).

use fixly_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::offer::OfferView;

/// A row from the `requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Request {
    pub id: DbId,
    #[serde(rename = "ownerId")]
    pub owner_id: DbId,
    pub title: String,
    pub category: String,
    pub location: String,
    pub urgency: String,
    pub description: String,
    pub status: String,
    pub budget: Option<f64>,
    #[serde(rename = "acceptedOfferId")]
    pub accepted_offer_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for creating a request.
#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    pub title: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub location: String,
    #[serde(default = "default_urgency")]
    pub urgency: String,
    #[serde(default)]
    pub description: String,
    pub budget: Option<f64>,
}

fn default_category() -> String {
    "General".to_string()
}

fn default_urgency() -> String {
    fixly_core::request::URGENCY_NORMAL.to_string()
}

/// DTO for partially updating a request.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub title: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub urgency: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub budget: Option<f64>,
}

/// Offer-count summary embedded in request responses, mirroring the
/// original `_count` field.
#[derive(Debug, Clone, Serialize)]
pub struct OfferCount {
    pub offers: i64,
}

/// A request together with its offers and the derived winner fields.
#[derive(Debug, Clone, Serialize)]
pub struct RequestDetail {
    #[serde(flatten)]
    pub request: Request,
    #[serde(rename = "_count")]
    pub count: OfferCount,
    #[serde(rename = "acceptedPrice")]
    pub accepted_price: Option<f64>,
    #[serde(rename = "acceptedProviderId")]
    pub accepted_provider_id: Option<DbId>,
    #[serde(rename = "acceptedProviderName")]
    pub accepted_provider_name: Option<String>,
    #[serde(rename = "acceptedProviderPhoto")]
    pub accepted_provider_photo: Option<String>,
    pub offers: Vec<OfferView>,
}

impl RequestDetail {
    /// Assemble the detail view from a request row and its offer views.
    ///
    /// The winner fields are derived from `accepted_offer_id` only;
    /// per-offer status is display data, not the source of truth.
    pub fn assemble(request: Request, offers: Vec<OfferView>) -> Self {
        let winner = request
            .accepted_offer_id
            .and_then(|id| offers.iter().find(|o| o.id == id));

        RequestDetail {
            count: OfferCount {
                offers: offers.len() as i64,
            },
            accepted_price: winner.map(|o| o.price),
            accepted_provider_id: winner.map(|o| o.provider_id),
            accepted_provider_name: winner.map(|o| o.provider_name.clone()),
            accepted_provider_photo: winner.map(|o| o.provider_photo.clone()),
            request,
            offers,
        }
    }
}
