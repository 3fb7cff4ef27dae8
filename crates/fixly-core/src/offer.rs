//! Offer status constants and validation.
//!
//! Offers are unique per (request, provider). Across all offers of one
//! request at most one may be `accepted`; the accept transition is the
//! only operation that touches more than one offer and must be applied
//! as a single unit.

use crate::error::CoreError;

/// Offer submitted, awaiting the owner's decision.
pub const OFFER_PENDING: &str = "pending";

/// Offer chosen by the request owner. Terminal.
pub const OFFER_ACCEPTED: &str = "accepted";

/// Offer declined by the request owner.
pub const OFFER_REJECTED: &str = "rejected";

/// All valid offer status values.
pub const VALID_OFFER_STATUSES: &[&str] = &[OFFER_PENDING, OFFER_ACCEPTED, OFFER_REJECTED];

/// Validate that an offer status string is one of the accepted values.
pub fn validate_offer_status(status: &str) -> Result<(), CoreError> {
    if VALID_OFFER_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Estado de oferta inválido '{status}'. Debe ser uno de: {}",
            VALID_OFFER_STATUSES.join(", ")
        )))
    }
}

/// Validate an offer price: must be a finite, non-negative amount.
pub fn validate_price(price: f64) -> Result<(), CoreError> {
    if !price.is_finite() {
        return Err(CoreError::Validation("Precio inválido".to_string()));
    }
    if price < 0.0 {
        return Err(CoreError::Validation(
            "El precio no puede ser negativo".to_string(),
        ));
    }
    Ok(())
}
