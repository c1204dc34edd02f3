use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::theme::{NewTheme, Theme, ThemeFilters, ThemePatch};
use crate::database::repositories::ThemeRepository;
use crate::error::ApiError;
use crate::state::AppState;

use super::parse_pagination;

#[derive(Debug, Deserialize)]
pub struct ThemeListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub name: Option<String>,
}

/// GET /api/themes
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ThemeListQuery>,
) -> Result<Json<Vec<Theme>>, ApiError> {
    let pagination = parse_pagination(query.page, query.limit)?;
    let filters = ThemeFilters { name: query.name };
    let themes = ThemeRepository::new(state.pool.clone()).list(&filters, &pagination).await?;
    Ok(Json(themes))
}

/// GET /api/themes/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Theme>, ApiError> {
    let theme = ThemeRepository::new(state.pool.clone()).get(id).await?;
    Ok(Json(theme))
}

/// POST /api/themes
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewTheme>,
) -> Result<(StatusCode, Json<Theme>), ApiError> {
    let theme = ThemeRepository::new(state.pool.clone()).create(&payload).await?;
    Ok((StatusCode::CREATED, Json(theme)))
}

/// PATCH /api/themes/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ThemePatch>,
) -> Result<Json<Theme>, ApiError> {
    let theme = ThemeRepository::new(state.pool.clone()).update(id, &payload).await?;
    Ok(Json(theme))
}

/// DELETE /api/themes/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ThemeRepository::new(state.pool.clone()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
