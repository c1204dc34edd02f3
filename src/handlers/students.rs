use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::student::{NewStudent, Student, StudentFilters, StudentPatch};
use crate::database::repositories::StudentRepository;
use crate::error::ApiError;
use crate::state::AppState;

use super::parse_pagination;

#[derive(Debug, Deserialize)]
pub struct StudentListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub therapist_id: Option<Uuid>,
    pub grade_level: Option<i32>,
    pub name: Option<String>,
}

/// GET /api/students
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<StudentListQuery>,
) -> Result<Json<Vec<Student>>, ApiError> {
    let pagination = parse_pagination(query.page, query.limit)?;
    let filters = StudentFilters {
        therapist_id: query.therapist_id,
        grade_level: query.grade_level,
        name: query.name,
    };
    let students = StudentRepository::new(state.pool.clone()).list(&filters, &pagination).await?;
    Ok(Json(students))
}

/// GET /api/students/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Student>, ApiError> {
    let student = StudentRepository::new(state.pool.clone()).get(id).await?;
    Ok(Json(student))
}

/// POST /api/students
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewStudent>,
) -> Result<(StatusCode, Json<Student>), ApiError> {
    let student = StudentRepository::new(state.pool.clone()).create(&payload).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// PATCH /api/students/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<StudentPatch>,
) -> Result<Json<Student>, ApiError> {
    let student = StudentRepository::new(state.pool.clone()).update(id, &payload).await?;
    Ok(Json(student))
}

/// DELETE /api/students/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    StudentRepository::new(state.pool.clone()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
