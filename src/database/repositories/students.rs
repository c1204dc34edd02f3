use sqlx::PgPool;
use uuid::Uuid;

use crate::database::error::DataError;
use crate::database::models::student::{NewStudent, Student, StudentFilters, StudentPatch};
use crate::query::{bind_values, build_select, Pagination};

const COLUMNS: &str =
    "id, first_name, last_name, grade_level, notes, therapist_id, created_at, updated_at";

const LIST_ORDER: &str = "last_name, first_name, id";

pub struct StudentRepository {
    pool: PgPool,
}

impl StudentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        filters: &StudentFilters,
        pagination: &Pagination,
    ) -> Result<Vec<Student>, DataError> {
        let base = format!("SELECT {COLUMNS} FROM students");
        let (sql, args) = build_select(&base, &filters.to_filter_set(), LIST_ORDER, pagination);
        let rows = bind_values(sqlx::query_as::<_, Student>(&sql), &args)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: Uuid) -> Result<Student, DataError> {
        sqlx::query_as::<_, Student>(&format!("SELECT {COLUMNS} FROM students WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DataError::NotFound("student"))
    }

    pub async fn create(&self, new: &NewStudent) -> Result<Student, DataError> {
        let row = sqlx::query_as::<_, Student>(&format!(
            "INSERT INTO students (first_name, last_name, grade_level, notes, therapist_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
        ))
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(new.grade_level)
        .bind(&new.notes)
        .bind(new.therapist_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, id: Uuid, patch: &StudentPatch) -> Result<Student, DataError> {
        sqlx::query_as::<_, Student>(&format!(
            "UPDATE students SET \
             first_name = COALESCE($2, first_name), \
             last_name = COALESCE($3, last_name), \
             grade_level = COALESCE($4, grade_level), \
             notes = COALESCE($5, notes), \
             therapist_id = COALESCE($6, therapist_id), \
             updated_at = now() \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(&patch.first_name)
        .bind(&patch.last_name)
        .bind(patch.grade_level)
        .bind(&patch.notes)
        .bind(patch.therapist_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DataError::NotFound("student"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DataError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DataError::NotFound("student"));
        }
        Ok(())
    }
}
