use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::therapist::{
    NewTherapist, Therapist, TherapistFilters, TherapistPatch,
};
use crate::database::repositories::TherapistRepository;
use crate::error::ApiError;
use crate::state::AppState;

use super::parse_pagination;

#[derive(Debug, Deserialize)]
pub struct TherapistListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub specialty: Option<String>,
    pub name: Option<String>,
}

/// GET /api/therapists
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<TherapistListQuery>,
) -> Result<Json<Vec<Therapist>>, ApiError> {
    let pagination = parse_pagination(query.page, query.limit)?;
    let filters = TherapistFilters { specialty: query.specialty, name: query.name };
    let therapists =
        TherapistRepository::new(state.pool.clone()).list(&filters, &pagination).await?;
    Ok(Json(therapists))
}

/// GET /api/therapists/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Therapist>, ApiError> {
    let therapist = TherapistRepository::new(state.pool.clone()).get(id).await?;
    Ok(Json(therapist))
}

/// POST /api/therapists
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewTherapist>,
) -> Result<(StatusCode, Json<Therapist>), ApiError> {
    let therapist = TherapistRepository::new(state.pool.clone()).create(&payload).await?;
    Ok((StatusCode::CREATED, Json(therapist)))
}

/// PATCH /api/therapists/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TherapistPatch>,
) -> Result<Json<Therapist>, ApiError> {
    let therapist = TherapistRepository::new(state.pool.clone()).update(id, &payload).await?;
    Ok(Json(therapist))
}

/// DELETE /api/therapists/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    TherapistRepository::new(state.pool.clone()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
