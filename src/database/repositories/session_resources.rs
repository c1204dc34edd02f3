use sqlx::PgPool;
use uuid::Uuid;

use crate::database::error::DataError;
use crate::database::models::session_resource::{
    NewSessionResource, SessionResource, SessionResourceFilters, SessionResourceWithResource,
};
use crate::query::{bind_values, build_select, Pagination};

const COLUMNS: &str = "id, session_id, resource_id, notes, created_at";

const LIST_BASE: &str = "SELECT sr.id, sr.session_id, sr.resource_id, sr.notes, sr.created_at, \
     r.id AS resource_pk, r.title AS resource_title, r.description AS resource_description, \
     r.url AS resource_url, r.resource_type AS resource_resource_type, \
     r.grade_level AS resource_grade_level, r.theme_id AS resource_theme_id, \
     r.created_at AS resource_created_at, r.updated_at AS resource_updated_at \
     FROM session_resources sr JOIN resources r ON r.id = sr.resource_id";

const LIST_ORDER: &str = "sr.created_at DESC, sr.id";

pub struct SessionResourceRepository {
    pool: PgPool,
}

impl SessionResourceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        filters: &SessionResourceFilters,
        pagination: &Pagination,
    ) -> Result<Vec<SessionResourceWithResource>, DataError> {
        let (sql, args) = build_select(LIST_BASE, &filters.to_filter_set(), LIST_ORDER, pagination);
        let rows = bind_values(sqlx::query_as::<_, SessionResourceWithResource>(&sql), &args)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: Uuid) -> Result<SessionResource, DataError> {
        sqlx::query_as::<_, SessionResource>(&format!(
            "SELECT {COLUMNS} FROM session_resources WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DataError::NotFound("session resource"))
    }

    pub async fn create(&self, new: &NewSessionResource) -> Result<SessionResource, DataError> {
        let row = sqlx::query_as::<_, SessionResource>(&format!(
            "INSERT INTO session_resources (session_id, resource_id, notes) \
             VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        ))
        .bind(new.session_id)
        .bind(new.resource_id)
        .bind(&new.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DataError> {
        let result = sqlx::query("DELETE FROM session_resources WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DataError::NotFound("session resource"));
        }
        Ok(())
    }
}
