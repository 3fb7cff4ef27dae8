//! Offer entity models and DTOs.

use fixly_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `offers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Offer {
    pub id: DbId,
    #[serde(rename = "requestId")]
    pub request_id: DbId,
    #[serde(rename = "providerId")]
    pub provider_id: DbId,
    pub message: String,
    pub price: f64,
    pub status: String,
    pub created_at: Timestamp,
}

/// An offer joined with its provider's public identity, the shape
/// embedded in request listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OfferView {
    pub id: DbId,
    #[serde(rename = "requestId")]
    pub request_id: DbId,
    #[serde(rename = "providerId")]
    pub provider_id: DbId,
    #[serde(rename = "providerName")]
    pub provider_name: String,
    #[serde(rename = "providerPhoto")]
    pub provider_photo: String,
    pub message: String,
    pub price: f64,
    pub status: String,
    pub created_at: Timestamp,
}

/// DTO for submitting (or re-submitting) an offer.
#[derive(Debug, Deserialize)]
pub struct UpsertOffer {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub price: f64,
}

/// Outcome of the transactional accept operation.
#[derive(Debug)]
pub enum AcceptOutcome {
    /// The target offer is now the accepted one; the updated request is returned.
    Accepted(crate::models::request::Request),
    /// The offer does not exist on this request.
    OfferNotFound,
    /// A different offer is already accepted; acceptance is terminal.
    AlreadyAccepted,
}
