use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::resource::{
    NewResource, Resource, ResourceFilters, ResourcePatch, ResourceWithTheme,
};
use crate::database::repositories::ResourceRepository;
use crate::error::ApiError;
use crate::state::AppState;

use super::parse_pagination;

#[derive(Debug, Deserialize)]
pub struct ResourceListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub theme_id: Option<Uuid>,
    pub grade_level: Option<i32>,
    pub resource_type: Option<String>,
    pub title: Option<String>,
}

/// GET /api/resources - each row carries its theme, joined in one query
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ResourceListQuery>,
) -> Result<Json<Vec<ResourceWithTheme>>, ApiError> {
    let pagination = parse_pagination(query.page, query.limit)?;
    let filters = ResourceFilters {
        theme_id: query.theme_id,
        grade_level: query.grade_level,
        resource_type: query.resource_type,
        title: query.title,
    };
    let resources = ResourceRepository::new(state.pool.clone()).list(&filters, &pagination).await?;
    Ok(Json(resources))
}

/// GET /api/resources/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Resource>, ApiError> {
    let resource = ResourceRepository::new(state.pool.clone()).get(id).await?;
    Ok(Json(resource))
}

/// POST /api/resources
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewResource>,
) -> Result<(StatusCode, Json<Resource>), ApiError> {
    let resource = ResourceRepository::new(state.pool.clone()).create(&payload).await?;
    Ok((StatusCode::CREATED, Json(resource)))
}

/// PATCH /api/resources/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ResourcePatch>,
) -> Result<Json<Resource>, ApiError> {
    let resource = ResourceRepository::new(state.pool.clone()).update(id, &payload).await?;
    Ok(Json(resource))
}

/// DELETE /api/resources/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ResourceRepository::new(state.pool.clone()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
