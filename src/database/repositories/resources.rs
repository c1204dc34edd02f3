use sqlx::PgPool;
use uuid::Uuid;

use crate::database::error::DataError;
use crate::database::models::resource::{
    NewResource, Resource, ResourceFilters, ResourcePatch, ResourceWithTheme,
};
use crate::query::{bind_values, build_select, Pagination};

const COLUMNS: &str =
    "id, title, description, url, resource_type, grade_level, theme_id, created_at, updated_at";

const LIST_BASE: &str = "SELECT r.id, r.title, r.description, r.url, r.resource_type, \
     r.grade_level, r.theme_id, r.created_at, r.updated_at, \
     t.id AS theme_pk, t.name AS theme_name, t.description AS theme_description, \
     t.created_at AS theme_created_at, t.updated_at AS theme_updated_at \
     FROM resources r LEFT JOIN themes t ON t.id = r.theme_id";

const LIST_ORDER: &str = "r.created_at DESC, r.id";

pub struct ResourceRepository {
    pool: PgPool,
}

impl ResourceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        filters: &ResourceFilters,
        pagination: &Pagination,
    ) -> Result<Vec<ResourceWithTheme>, DataError> {
        let (sql, args) = build_select(LIST_BASE, &filters.to_filter_set(), LIST_ORDER, pagination);
        let rows = bind_values(sqlx::query_as::<_, ResourceWithTheme>(&sql), &args)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: Uuid) -> Result<Resource, DataError> {
        sqlx::query_as::<_, Resource>(&format!("SELECT {COLUMNS} FROM resources WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DataError::NotFound("resource"))
    }

    pub async fn create(&self, new: &NewResource) -> Result<Resource, DataError> {
        let row = sqlx::query_as::<_, Resource>(&format!(
            "INSERT INTO resources (title, description, url, resource_type, grade_level, theme_id) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {COLUMNS}"
        ))
        .bind(&new.title)
        .bind(&new.description)
        .bind(&new.url)
        .bind(&new.resource_type)
        .bind(new.grade_level)
        .bind(new.theme_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, id: Uuid, patch: &ResourcePatch) -> Result<Resource, DataError> {
        sqlx::query_as::<_, Resource>(&format!(
            "UPDATE resources SET \
             title = COALESCE($2, title), \
             description = COALESCE($3, description), \
             url = COALESCE($4, url), \
             resource_type = COALESCE($5, resource_type), \
             grade_level = COALESCE($6, grade_level), \
             theme_id = COALESCE($7, theme_id), \
             updated_at = now() \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(&patch.title)
        .bind(&patch.description)
        .bind(&patch.url)
        .bind(&patch.resource_type)
        .bind(patch.grade_level)
        .bind(patch.theme_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DataError::NotFound("resource"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DataError> {
        let result = sqlx::query("DELETE FROM resources WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DataError::NotFound("resource"));
        }
        Ok(())
    }
}
