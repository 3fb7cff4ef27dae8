//! HTTP handlers, one module per resource.

pub mod auth;
pub mod chat;
pub mod leads;
pub mod notification;
pub mod offers;
pub mod profile;
pub mod requests;
pub mod reviews;
pub mod services;
pub mod users;

use fixly_core::error::CoreError;
use fixly_core::types::DbId;
use fixly_db::repositories::ProfileRepo;
use sqlx::PgPool;

use crate::error::AppError;

/// Guard clause: the user's profile must carry the given role.
///
/// The role is read from the database on every call rather than from
/// the token, because onboarding assigns the role after first login.
pub(crate) async fn require_role(
    pool: &PgPool,
    user_id: DbId,
    role: &str,
    denial: &str,
) -> Result<(), AppError> {
    let profile = ProfileRepo::get_or_create(pool, user_id).await?;
    if profile.role == role {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(denial.to_string())))
    }
}
