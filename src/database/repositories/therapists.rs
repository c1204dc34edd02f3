use sqlx::PgPool;
use uuid::Uuid;

use crate::database::error::DataError;
use crate::database::models::therapist::{NewTherapist, Therapist, TherapistFilters, TherapistPatch};
use crate::query::{bind_values, build_select, Pagination};

const COLUMNS: &str = "id, first_name, last_name, email, specialty, bio, created_at, updated_at";

const LIST_ORDER: &str = "last_name, first_name, id";

pub struct TherapistRepository {
    pool: PgPool,
}

impl TherapistRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        filters: &TherapistFilters,
        pagination: &Pagination,
    ) -> Result<Vec<Therapist>, DataError> {
        let base = format!("SELECT {COLUMNS} FROM therapists");
        let (sql, args) = build_select(&base, &filters.to_filter_set(), LIST_ORDER, pagination);
        let rows = bind_values(sqlx::query_as::<_, Therapist>(&sql), &args)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: Uuid) -> Result<Therapist, DataError> {
        sqlx::query_as::<_, Therapist>(&format!("SELECT {COLUMNS} FROM therapists WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DataError::NotFound("therapist"))
    }

    pub async fn create(&self, new: &NewTherapist) -> Result<Therapist, DataError> {
        let row = sqlx::query_as::<_, Therapist>(&format!(
            "INSERT INTO therapists (first_name, last_name, email, specialty, bio) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
        ))
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.email)
        .bind(&new.specialty)
        .bind(&new.bio)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, id: Uuid, patch: &TherapistPatch) -> Result<Therapist, DataError> {
        sqlx::query_as::<_, Therapist>(&format!(
            "UPDATE therapists SET \
             first_name = COALESCE($2, first_name), \
             last_name = COALESCE($3, last_name), \
             email = COALESCE($4, email), \
             specialty = COALESCE($5, specialty), \
             bio = COALESCE($6, bio), \
             updated_at = now() \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(&patch.first_name)
        .bind(&patch.last_name)
        .bind(&patch.email)
        .bind(&patch.specialty)
        .bind(&patch.bio)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DataError::NotFound("therapist"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DataError> {
        let result = sqlx::query("DELETE FROM therapists WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DataError::NotFound("therapist"));
        }
        Ok(())
    }
}
