//! Service listing status constants and validation.

use crate::error::CoreError;

/// Listing is visible and accepting contacts.
pub const SERVICE_ACTIVE: &str = "activo";

/// Listing is hidden by its owner.
pub const SERVICE_PAUSED: &str = "pausado";

/// All valid service status values.
pub const VALID_SERVICE_STATUSES: &[&str] = &[SERVICE_ACTIVE, SERVICE_PAUSED];

/// Validate that a service status string is one of the accepted values.
pub fn validate_service_status(status: &str) -> Result<(), CoreError> {
    if VALID_SERVICE_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Estado de servicio inválido '{status}'. Debe ser uno de: {}",
            VALID_SERVICE_STATUSES.join(", ")
        )))
    }
}

/// Validate the starting price of a listing.
pub fn validate_price_from(price_from: f64) -> Result<(), CoreError> {
    if !price_from.is_finite() || price_from < 0.0 {
        return Err(CoreError::Validation(
            "El precio no puede ser negativo".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_service_statuses_accepted() {
        assert!(validate_service_status(SERVICE_ACTIVE).is_ok());
        assert!(validate_service_status(SERVICE_PAUSED).is_ok());
    }

    #[test]
    fn test_invalid_service_status_rejected() {
        assert!(validate_service_status("borrado").is_err());
    }

    #[test]
    fn test_price_from_bounds() {
        assert!(validate_price_from(0.0).is_ok());
        assert!(validate_price_from(-5.0).is_err());
    }
}
