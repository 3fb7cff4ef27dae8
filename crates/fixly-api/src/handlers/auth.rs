//! Handlers for the `/auth` resource (register, login, password change).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use fixly_core::error::CoreError;
use fixly_db::models::user::PublicUser;
use fixly_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Minimum username length.
const MIN_USERNAME_LENGTH: usize = 3;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/login`. Accepts a username or an email.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "userOrEmail")]
    pub user_or_email: String,
    pub password: String,
}

/// Request body for `POST /auth/password-change`.
#[derive(Debug, Deserialize)]
pub struct PasswordChangeRequest {
    #[serde(rename = "oldPassword", alias = "old_password")]
    pub old_password: String,
    #[serde(rename = "newPassword", alias = "new_password")]
    pub new_password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: PublicUser,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Create an account. Registration does not log the user in; the client
/// sends them to the login form afterwards.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let username = input.username.trim().to_lowercase();
    let email = input.email.trim().to_lowercase();
    let password = input.password;

    if username.is_empty() || email.is_empty() || password.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Todos los campos son obligatorios.".into(),
        )));
    }
    if username.len() < MIN_USERNAME_LENGTH {
        return Err(AppError::Core(CoreError::Validation(
            "El usuario debe tener al menos 3 caracteres.".into(),
        )));
    }
    if !is_valid_email(&email) {
        return Err(AppError::Core(CoreError::Validation("Email inválido.".into())));
    }
    validate_password_strength(&password)?;

    if UserRepo::identity_taken(&state.pool, &username, &email).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Usuario o email ya registrados".into(),
        )));
    }

    let password_hash = hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(&state.pool, &username, &email, &password_hash).await?;
    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "ok": true, "user": PublicUser::from(&user) })),
    ))
}

/// POST /api/auth/login
///
/// Authenticate with username-or-email + password. Returns a bearer
/// token and the public user.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let identifier = input.user_or_email.trim().to_lowercase();
    if identifier.is_empty() || input.password.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Ingresa usuario/email y contraseña.".into(),
        )));
    }

    let user = UserRepo::find_by_username_or_email(&state.pool, &identifier)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Credenciales invalidas".into())))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Credenciales invalidas".into(),
        )));
    }

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cuenta desactivada".into(),
        )));
    }

    let token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(LoginResponse {
        token,
        user: PublicUser::from(&user),
    }))
}

/// POST /api/auth/password-change
///
/// Replace the authenticated user's password after verifying the
/// current one.
pub async fn password_change(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<PasswordChangeRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let old = input.old_password.trim();
    let new = input.new_password.trim();
    if old.is_empty() || new.is_empty() {
        return Err(AppError::Core(CoreError::Validation("Faltan campos".into())));
    }

    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    let old_valid = verify_password(old, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !old_valid {
        return Err(AppError::Core(CoreError::Validation(
            "La contraseña actual no es correcta".into(),
        )));
    }

    validate_password_strength(new)?;

    let password_hash = hash_password(new)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&state.pool, user.id, &password_hash).await?;

    Ok(Json(serde_json::json!({ "ok": true })))
}

/// Minimal structural email check: one `@` with a dotted domain after it.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
