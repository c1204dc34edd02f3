use std::time::Duration;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PresignQuery {
    pub key: String,
    /// Requested URL lifetime in seconds; clamped to the configured maximum.
    pub expires_in: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct PresignResponse {
    pub url: String,
    pub expires_in: u64,
}

#[derive(Debug, Deserialize)]
pub struct FileListQuery {
    pub prefix: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FileListResponse {
    pub keys: Vec<String>,
}

/// GET /api/files/presign - time-limited GET URL for one object key
pub async fn presign(
    State(state): State<AppState>,
    Query(query): Query<PresignQuery>,
) -> Result<Json<PresignResponse>, ApiError> {
    if query.key.trim().is_empty() {
        return Err(ApiError::bad_request("key is required"));
    }

    let storage = &config::config().storage;
    let expires_in = query
        .expires_in
        .unwrap_or(storage.presign_expiry_secs)
        .min(storage.max_presign_expiry_secs);
    if expires_in == 0 {
        return Err(ApiError::bad_request("expires_in must be positive"));
    }

    let url = state
        .storage
        .presigned_get_url(&query.key, Duration::from_secs(expires_in))
        .await?;
    Ok(Json(PresignResponse { url, expires_in }))
}

/// GET /api/files - object keys under a prefix
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<FileListQuery>,
) -> Result<Json<FileListResponse>, ApiError> {
    let prefix = query.prefix.unwrap_or_default();
    let keys = state.storage.list_keys(&prefix).await?;
    Ok(Json(FileListResponse { keys }))
}
