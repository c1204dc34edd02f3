use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::session::{NewSession, Session, SessionFilters, SessionPatch};
use crate::database::repositories::SessionRepository;
use crate::error::ApiError;
use crate::state::AppState;

use super::parse_pagination;

#[derive(Debug, Deserialize)]
pub struct SessionListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub student_id: Option<Uuid>,
    pub therapist_id: Option<Uuid>,
    pub status: Option<String>,
    /// RFC 3339 timestamps bounding `scheduled_at`
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// GET /api/sessions
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<SessionListQuery>,
) -> Result<Json<Vec<Session>>, ApiError> {
    let pagination = parse_pagination(query.page, query.limit)?;
    let filters = SessionFilters {
        student_id: query.student_id,
        therapist_id: query.therapist_id,
        status: query.status,
        from: query.from,
        to: query.to,
    };
    let sessions = SessionRepository::new(state.pool.clone()).list(&filters, &pagination).await?;
    Ok(Json(sessions))
}

/// GET /api/sessions/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Session>, ApiError> {
    let session = SessionRepository::new(state.pool.clone()).get(id).await?;
    Ok(Json(session))
}

/// POST /api/sessions
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewSession>,
) -> Result<(StatusCode, Json<Session>), ApiError> {
    let session = SessionRepository::new(state.pool.clone()).create(&payload).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// PATCH /api/sessions/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SessionPatch>,
) -> Result<Json<Session>, ApiError> {
    let session = SessionRepository::new(state.pool.clone()).update(id, &payload).await?;
    Ok(Json(session))
}

/// DELETE /api/sessions/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    SessionRepository::new(state.pool.clone()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
