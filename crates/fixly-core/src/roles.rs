//! Profile role constants and validation.
//!
//! A profile carries exactly one role after onboarding. The role gates
//! which side of the marketplace a user acts on: clients create
//! requests and contact services, providers submit offers and publish
//! services.

use crate::error::CoreError;

/// A user who posts service requests and accepts offers.
pub const ROLE_CLIENT: &str = "client";

/// A user who submits offers and publishes services.
pub const ROLE_PROVIDER: &str = "provider";

/// All valid role values.
pub const VALID_ROLES: &[&str] = &[ROLE_CLIENT, ROLE_PROVIDER];

/// Validate that a role string is one of the accepted values.
///
/// An empty role is allowed: profiles start without a role until the
/// user completes onboarding.
pub fn validate_role(role: &str) -> Result<(), CoreError> {
    if role.is_empty() || VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Rol inválido '{role}'. Debe ser uno de: {}",
            VALID_ROLES.join(", ")
        )))
    }
}
