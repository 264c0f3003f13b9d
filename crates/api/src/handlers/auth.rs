//! Handlers for the `/auth` resource (register, login, change-password).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use kplus_core::error::CoreError;
use kplus_core::roles::ROLE_MEMBER;
use kplus_core::types::DbId;
use kplus_db::models::account::CreateAccount;
use kplus_db::repositories::AccountRepo;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub login: String,
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

/// Request body for `PUT /auth/change-password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub new_password: String,
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub account: AccountInfo,
}

/// Public account info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct AccountInfo {
    pub id: DbId,
    pub login: String,
    pub role_id: DbId,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an account with the default member role and sign the caller in.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let login = input.login.trim();
    if login.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Login must not be empty".into(),
        )));
    }
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    // Friendly duplicate check first; uq_accounts_login catches the race.
    if AccountRepo::find_by_login(&state.pool, login).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Login is already taken".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let account = AccountRepo::create(
        &state.pool,
        &CreateAccount {
            login: login.to_string(),
            password_hash,
            role_id: ROLE_MEMBER,
        },
    )
    .await?;
    tracing::info!(id = account.id, "Account registered");

    let response = build_auth_response(&state, account.id, &account.login, account.role_id)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/login
///
/// Authenticate with login + password. Unknown login and wrong password
/// produce the same 401 so accounts cannot be enumerated.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let account = AccountRepo::find_by_login(&state.pool, input.login.trim())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid login or password".into()))
        })?;

    let password_valid = verify_password(&input.password, &account.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid login or password".into(),
        )));
    }

    tracing::debug!(id = account.id, "Account logged in");
    let response = build_auth_response(&state, account.id, &account.login, account.role_id)?;
    Ok(Json(response))
}

/// PUT /api/v1/auth/change-password
///
/// Overwrite the authenticated account's password digest.
pub async fn change_password(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.new_password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let updated = AccountRepo::update_password(&state.pool, auth.account_id, &password_hash).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Account",
            id: auth.account_id,
        }));
    }

    tracing::info!(id = auth.account_id, "Password changed");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate an access token and assemble the shared auth response.
fn build_auth_response(
    state: &AppState,
    account_id: DbId,
    login: &str,
    role_id: DbId,
) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(account_id, role_id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(AuthResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        account: AccountInfo {
            id: account_id,
            login: login.to_string(),
            role_id,
        },
    })
}
