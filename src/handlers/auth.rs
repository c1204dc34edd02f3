use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::config;
use crate::error::ApiError;
use crate::middleware::auth::extract_bearer_token;
use crate::middleware::AuthUser;
use crate::services::identity::{ProviderUser, TokenResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialsPayload {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct EmailPayload {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct PasswordPayload {
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct OtpVerifyPayload {
    pub email: String,
    pub code: String,
}

/// POST /auth/login - forward credentials to the identity provider
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsPayload>,
) -> Result<Json<TokenResponse>, ApiError> {
    let tokens = state.identity.sign_in(&payload.email, &payload.password).await?;
    Ok(Json(tokens))
}

/// POST /auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsPayload>,
) -> Result<(StatusCode, Json<ProviderUser>), ApiError> {
    let user = state.identity.sign_up(&payload.email, &payload.password).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /auth/verify - ask the provider who the bearer token belongs to
pub async fn verify(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ProviderUser>, ApiError> {
    let token = extract_bearer_token(&headers).map_err(ApiError::unauthorized)?;
    let user = state.identity.user(&token).await?;
    Ok(Json(user))
}

/// POST /auth/recover - trigger the provider's password-recovery email
pub async fn recover(
    State(state): State<AppState>,
    Json(payload): Json<EmailPayload>,
) -> Result<StatusCode, ApiError> {
    state.identity.send_recovery(&payload.email).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /auth/password - update the password of the token's user
pub async fn update_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<PasswordPayload>,
) -> Result<Json<ProviderUser>, ApiError> {
    let token = extract_bearer_token(&headers).map_err(ApiError::unauthorized)?;
    let user = state.identity.update_password(&token, &payload.password).await?;
    Ok(Json(user))
}

/// DELETE /api/auth/users/:id - admin deletion via the service-role key
pub async fn admin_delete_user(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    tracing::info!(actor = %auth_user.id, "deleting provider user {}", id);
    state.identity.admin_delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /auth/otp - issue a one-time code and email it
pub async fn request_otp(
    State(state): State<AppState>,
    Json(payload): Json<EmailPayload>,
) -> Result<StatusCode, ApiError> {
    if payload.email.trim().is_empty() {
        return Err(ApiError::bad_request("email is required"));
    }
    let code = state.otp.issue(&payload.email).await;
    let ttl_minutes = config::config().otp.ttl_secs / 60;
    state.mailer.send_otp_email(&payload.email, &code, ttl_minutes).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /auth/otp/verify - check and consume a one-time code
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(payload): Json<OtpVerifyPayload>,
) -> Result<StatusCode, ApiError> {
    if state.otp.verify(&payload.email, &payload.code).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::unauthorized("invalid or expired code"))
    }
}
