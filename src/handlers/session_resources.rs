use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::session_resource::{
    NewSessionResource, SessionResource, SessionResourceFilters, SessionResourceWithResource,
};
use crate::database::repositories::SessionResourceRepository;
use crate::error::ApiError;
use crate::state::AppState;

use super::parse_pagination;

#[derive(Debug, Deserialize)]
pub struct SessionResourceListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub session_id: Option<Uuid>,
    pub resource_id: Option<Uuid>,
}

/// GET /api/session-resources - each link carries its resource record
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<SessionResourceListQuery>,
) -> Result<Json<Vec<SessionResourceWithResource>>, ApiError> {
    let pagination = parse_pagination(query.page, query.limit)?;
    let filters = SessionResourceFilters {
        session_id: query.session_id,
        resource_id: query.resource_id,
    };
    let links =
        SessionResourceRepository::new(state.pool.clone()).list(&filters, &pagination).await?;
    Ok(Json(links))
}

/// GET /api/session-resources/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResource>, ApiError> {
    let link = SessionResourceRepository::new(state.pool.clone()).get(id).await?;
    Ok(Json(link))
}

/// POST /api/session-resources
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewSessionResource>,
) -> Result<(StatusCode, Json<SessionResource>), ApiError> {
    let link = SessionResourceRepository::new(state.pool.clone()).create(&payload).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

/// DELETE /api/session-resources/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    SessionResourceRepository::new(state.pool.clone()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
