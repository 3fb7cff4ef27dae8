//! User and profile entity models and DTOs.

use fixly_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `users` table. Never serialized directly: the
/// password hash must not leave the server, use [`PublicUser`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// Public projection of a user, safe to return to any caller.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublicUser {
    pub id: DbId,
    pub username: String,
    pub email: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        PublicUser {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

/// A row from the `profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    #[serde(skip_serializing)]
    pub user_id: DbId,
    pub display_name: String,
    pub photo_url: String,
    pub role: String,
    pub location: String,
    pub bio: String,
    pub notifications_enabled: bool,
}

/// DTO for partially updating a profile.
#[derive(Debug, Deserialize)]
pub struct UpdateProfile {
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub role: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
}
