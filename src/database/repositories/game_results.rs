use sqlx::PgPool;
use uuid::Uuid;

use crate::database::error::DataError;
use crate::database::models::game_result::{GameResult, GameResultFilters, NewGameResult};
use crate::query::{bind_values, build_select, Pagination};

const COLUMNS: &str =
    "id, student_id, resource_id, score, max_score, played_at, created_at, updated_at";

const LIST_ORDER: &str = "played_at DESC, id";

pub struct GameResultRepository {
    pool: PgPool,
}

impl GameResultRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        filters: &GameResultFilters,
        pagination: &Pagination,
    ) -> Result<Vec<GameResult>, DataError> {
        let base = format!("SELECT {COLUMNS} FROM game_results");
        let (sql, args) = build_select(&base, &filters.to_filter_set(), LIST_ORDER, pagination);
        let rows = bind_values(sqlx::query_as::<_, GameResult>(&sql), &args)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: Uuid) -> Result<GameResult, DataError> {
        sqlx::query_as::<_, GameResult>(&format!("SELECT {COLUMNS} FROM game_results WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DataError::NotFound("game result"))
    }

    pub async fn create(&self, new: &NewGameResult) -> Result<GameResult, DataError> {
        let row = sqlx::query_as::<_, GameResult>(&format!(
            "INSERT INTO game_results (student_id, resource_id, score, max_score, played_at) \
             VALUES ($1, $2, $3, $4, COALESCE($5, now())) RETURNING {COLUMNS}"
        ))
        .bind(new.student_id)
        .bind(new.resource_id)
        .bind(new.score)
        .bind(new.max_score)
        .bind(new.played_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DataError> {
        let result = sqlx::query("DELETE FROM game_results WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DataError::NotFound("game result"));
        }
        Ok(())
    }
}
