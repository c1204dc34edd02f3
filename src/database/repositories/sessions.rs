use sqlx::PgPool;
use uuid::Uuid;

use crate::database::error::DataError;
use crate::database::models::session::{NewSession, Session, SessionFilters, SessionPatch};
use crate::query::{bind_values, build_select, Pagination};

const COLUMNS: &str = "id, student_id, therapist_id, scheduled_at, duration_minutes, status, \
     notes, created_at, updated_at";

// Chronological so page boundaries are stable while new sessions are booked.
const LIST_ORDER: &str = "scheduled_at DESC, id";

pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        filters: &SessionFilters,
        pagination: &Pagination,
    ) -> Result<Vec<Session>, DataError> {
        let base = format!("SELECT {COLUMNS} FROM sessions");
        let (sql, args) = build_select(&base, &filters.to_filter_set(), LIST_ORDER, pagination);
        let rows = bind_values(sqlx::query_as::<_, Session>(&sql), &args)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: Uuid) -> Result<Session, DataError> {
        sqlx::query_as::<_, Session>(&format!("SELECT {COLUMNS} FROM sessions WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DataError::NotFound("session"))
    }

    pub async fn create(&self, new: &NewSession) -> Result<Session, DataError> {
        let row = sqlx::query_as::<_, Session>(&format!(
            "INSERT INTO sessions (student_id, therapist_id, scheduled_at, duration_minutes, status, notes) \
             VALUES ($1, $2, $3, $4, COALESCE($5, 'scheduled'), $6) RETURNING {COLUMNS}"
        ))
        .bind(new.student_id)
        .bind(new.therapist_id)
        .bind(new.scheduled_at)
        .bind(new.duration_minutes)
        .bind(&new.status)
        .bind(&new.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, id: Uuid, patch: &SessionPatch) -> Result<Session, DataError> {
        sqlx::query_as::<_, Session>(&format!(
            "UPDATE sessions SET \
             scheduled_at = COALESCE($2, scheduled_at), \
             duration_minutes = COALESCE($3, duration_minutes), \
             status = COALESCE($4, status), \
             notes = COALESCE($5, notes), \
             updated_at = now() \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(patch.scheduled_at)
        .bind(patch.duration_minutes)
        .bind(&patch.status)
        .bind(&patch.notes)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DataError::NotFound("session"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DataError> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DataError::NotFound("session"));
        }
        Ok(())
    }
}
