//! Request status/urgency constants and validation.
//!
//! A request moves through four owner-driven states. The only
//! automatic transition in the system is acceptance of an offer
//! nudging `pendiente` to `en progreso`; everything else is an
//! explicit owner action.

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Maximum length for a request title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length for a category name.
pub const MAX_CATEGORY_LENGTH: usize = 120;

/// Request is open and collecting offers.
pub const STATUS_PENDING: &str = "pendiente";

/// An offer was accepted and work is underway.
pub const STATUS_IN_PROGRESS: &str = "en progreso";

/// The owner marked the work finished.
pub const STATUS_COMPLETED: &str = "completado";

/// The owner withdrew the request.
pub const STATUS_CANCELLED: &str = "cancelado";

/// All valid request status values.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_PENDING,
    STATUS_IN_PROGRESS,
    STATUS_COMPLETED,
    STATUS_CANCELLED,
];

/// Low urgency.
pub const URGENCY_LOW: &str = "baja";

/// Normal urgency (default).
pub const URGENCY_NORMAL: &str = "normal";

/// High urgency.
pub const URGENCY_HIGH: &str = "alta";

/// All valid urgency values.
pub const VALID_URGENCIES: &[&str] = &[URGENCY_LOW, URGENCY_NORMAL, URGENCY_HIGH];

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Validate that a request status string is one of the accepted values.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Estado inválido '{status}'. Debe ser uno de: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}

/// Validate that an urgency string is one of the accepted values.
pub fn validate_urgency(urgency: &str) -> Result<(), CoreError> {
    if VALID_URGENCIES.contains(&urgency) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Urgencia inválida '{urgency}'. Debe ser una de: {}",
            VALID_URGENCIES.join(", ")
        )))
    }
}

/// Validate a request title: non-empty after trimming, within length.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation(
            "El título es obligatorio".to_string(),
        ));
    }
    if title.len() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "El título supera el máximo de {MAX_TITLE_LENGTH} caracteres"
        )));
    }
    Ok(())
}

/// Validate a budget amount: must not be negative when present.
pub fn validate_budget(budget: Option<f64>) -> Result<(), CoreError> {
    match budget {
        Some(b) if b < 0.0 => Err(CoreError::Validation(
            "El presupuesto no puede ser negativo".to_string(),
        )),
        Some(b) if !b.is_finite() => {
            Err(CoreError::Validation("Presupuesto inválido".to_string()))
        }
        _ => Ok(()),
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_statuses_accepted() {
        for s in VALID_STATUSES {
            assert!(validate_status(s).is_ok());
        }
    }

    #[test]
    fn test_invalid_status_rejected() {
        assert!(validate_status("en_progreso").is_err()); // underscore variant is not canonical
        assert!(validate_status("open").is_err());
        assert!(validate_status("").is_err());
    }

    #[test]
    fn test_valid_urgencies_accepted() {
        for u in VALID_URGENCIES {
            assert!(validate_urgency(u).is_ok());
        }
    }

    #[test]
    fn test_invalid_urgency_rejected() {
        assert!(validate_urgency("urgente").is_err());
        assert!(validate_urgency("").is_err());
    }

    #[test]
    fn test_title_required() {
        assert!(validate_title("Reparar fuga").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
    }

    #[test]
    fn test_title_length_capped() {
        assert!(validate_title(&"x".repeat(MAX_TITLE_LENGTH)).is_ok());
        assert!(validate_title(&"x".repeat(MAX_TITLE_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_budget_bounds() {
        assert!(validate_budget(None).is_ok());
        assert!(validate_budget(Some(0.0)).is_ok());
        assert!(validate_budget(Some(50_000.0)).is_ok());
        assert!(validate_budget(Some(-1.0)).is_err());
        assert!(validate_budget(Some(f64::NAN)).is_err());
    }
}
