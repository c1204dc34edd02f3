use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::game_result::{GameResult, GameResultFilters, NewGameResult};
use crate::database::repositories::GameResultRepository;
use crate::error::ApiError;
use crate::state::AppState;

use super::parse_pagination;

#[derive(Debug, Deserialize)]
pub struct GameResultListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    /// Comma-separated student UUIDs; membership is matched with a single
    /// array parameter server-side.
    pub student_ids: Option<String>,
    pub resource_id: Option<Uuid>,
    /// RFC 3339 timestamps bounding `played_at`
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// GET /api/game-results
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<GameResultListQuery>,
) -> Result<Json<Vec<GameResult>>, ApiError> {
    let pagination = parse_pagination(query.page, query.limit)?;
    let student_ids = match query.student_ids.as_deref() {
        Some(raw) => parse_uuid_list(raw)?,
        None => vec![],
    };
    let filters = GameResultFilters {
        student_ids,
        resource_id: query.resource_id,
        from: query.from,
        to: query.to,
    };
    let results = GameResultRepository::new(state.pool.clone()).list(&filters, &pagination).await?;
    Ok(Json(results))
}

/// GET /api/game-results/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GameResult>, ApiError> {
    let result = GameResultRepository::new(state.pool.clone()).get(id).await?;
    Ok(Json(result))
}

/// POST /api/game-results
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewGameResult>,
) -> Result<(StatusCode, Json<GameResult>), ApiError> {
    let result = GameResultRepository::new(state.pool.clone()).create(&payload).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// DELETE /api/game-results/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    GameResultRepository::new(state.pool.clone()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn parse_uuid_list(raw: &str) -> Result<Vec<Uuid>, ApiError> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            Uuid::parse_str(part)
                .map_err(|_| ApiError::bad_request(format!("invalid UUID in student_ids: {part}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_list_parses_and_trims() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let raw = format!(" {a}, {b} ,");
        assert_eq!(parse_uuid_list(&raw).unwrap(), vec![a, b]);
    }

    #[test]
    fn uuid_list_rejects_garbage() {
        assert!(parse_uuid_list("not-a-uuid").is_err());
    }

    #[test]
    fn empty_uuid_list_is_empty() {
        assert!(parse_uuid_list("").unwrap().is_empty());
    }
}
