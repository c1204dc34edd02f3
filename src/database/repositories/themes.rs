use sqlx::PgPool;
use uuid::Uuid;

use crate::database::error::DataError;
use crate::database::models::theme::{NewTheme, Theme, ThemeFilters, ThemePatch};
use crate::query::{bind_values, build_select, Pagination};

const COLUMNS: &str = "id, name, description, created_at, updated_at";

const LIST_ORDER: &str = "name, id";

pub struct ThemeRepository {
    pool: PgPool,
}

impl ThemeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        filters: &ThemeFilters,
        pagination: &Pagination,
    ) -> Result<Vec<Theme>, DataError> {
        let base = format!("SELECT {COLUMNS} FROM themes");
        let (sql, args) = build_select(&base, &filters.to_filter_set(), LIST_ORDER, pagination);
        let rows = bind_values(sqlx::query_as::<_, Theme>(&sql), &args)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: Uuid) -> Result<Theme, DataError> {
        sqlx::query_as::<_, Theme>(&format!("SELECT {COLUMNS} FROM themes WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DataError::NotFound("theme"))
    }

    pub async fn create(&self, new: &NewTheme) -> Result<Theme, DataError> {
        let row = sqlx::query_as::<_, Theme>(&format!(
            "INSERT INTO themes (name, description) VALUES ($1, $2) RETURNING {COLUMNS}"
        ))
        .bind(&new.name)
        .bind(&new.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, id: Uuid, patch: &ThemePatch) -> Result<Theme, DataError> {
        sqlx::query_as::<_, Theme>(&format!(
            "UPDATE themes SET \
             name = COALESCE($2, name), \
             description = COALESCE($3, description), \
             updated_at = now() \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.description)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DataError::NotFound("theme"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DataError> {
        let result = sqlx::query("DELETE FROM themes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DataError::NotFound("theme"));
        }
        Ok(())
    }
}
