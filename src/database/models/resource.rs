use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use uuid::Uuid;

use crate::database::models::theme::Theme;
use crate::query::FilterSet;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Resource {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub resource_type: Option<String>,
    pub grade_level: Option<i32>,
    pub theme_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Resource plus its theme, decoded from a single LEFT JOIN row. The joined
/// theme columns are aliased `theme_*` in the SELECT so they can sit next to
/// the resource's own columns without colliding.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceWithTheme {
    #[serde(flatten)]
    pub resource: Resource,
    pub theme: Option<Theme>,
}

impl FromRow<'_, PgRow> for ResourceWithTheme {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let resource = Resource::from_row(row)?;
        let theme = match row.try_get::<Option<Uuid>, _>("theme_pk")? {
            Some(id) => Some(Theme {
                id,
                name: row.try_get("theme_name")?,
                description: row.try_get("theme_description")?,
                created_at: row.try_get("theme_created_at")?,
                updated_at: row.try_get("theme_updated_at")?,
            }),
            None => None,
        };
        Ok(Self { resource, theme })
    }
}

#[derive(Debug, Deserialize)]
pub struct NewResource {
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub resource_type: Option<String>,
    pub grade_level: Option<i32>,
    pub theme_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResourcePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub resource_type: Option<String>,
    pub grade_level: Option<i32>,
    pub theme_id: Option<Uuid>,
}

/// Optional list filters. Clauses are generated in field-declaration order,
/// so the SQL shape is reproducible for any construction of this struct.
#[derive(Debug, Default)]
pub struct ResourceFilters {
    pub theme_id: Option<Uuid>,
    pub grade_level: Option<i32>,
    pub resource_type: Option<String>,
    pub title: Option<String>,
}

impl ResourceFilters {
    pub fn to_filter_set(&self) -> FilterSet {
        let mut filters = FilterSet::new();
        filters.equals("r.theme_id", self.theme_id);
        filters.equals("r.grade_level", self.grade_level);
        filters.equals("r.resource_type", self.resource_type.clone());
        filters.contains("r.title", self.title.clone());
        filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{build_select, Pagination, SqlValue};

    #[test]
    fn clause_order_follows_declaration_order_not_assignment_order() {
        let theme_id = Uuid::new_v4();
        // Struct literals name fields in arbitrary order; the generated SQL
        // must not care.
        let a = ResourceFilters {
            title: Some("cvc words".to_string()),
            theme_id: Some(theme_id),
            grade_level: Some(2),
            resource_type: None,
        };
        let b = ResourceFilters {
            theme_id: Some(theme_id),
            grade_level: Some(2),
            resource_type: None,
            title: Some("cvc words".to_string()),
        };
        let pagination = Pagination::default();
        let (sql_a, args_a) = build_select("SELECT 1", &a.to_filter_set(), "r.id", &pagination);
        let (sql_b, args_b) = build_select("SELECT 1", &b.to_filter_set(), "r.id", &pagination);
        assert_eq!(sql_a, sql_b);
        assert_eq!(args_a, args_b);
        assert!(sql_a.contains("r.theme_id = $1"));
        assert!(sql_a.contains("r.grade_level = $2"));
        assert!(sql_a.contains("r.title ILIKE $3"));
    }

    #[test]
    fn single_theme_filter_scenario() {
        let theme_id = Uuid::new_v4();
        let filters = ResourceFilters { theme_id: Some(theme_id), ..Default::default() };
        let pagination = Pagination::from_parts(Some(1), Some(10));
        let (sql, args) = build_select("SELECT 1", &filters.to_filter_set(), "r.id", &pagination);
        assert_eq!(sql.matches("AND r.theme_id = $1").count(), 1);
        assert_eq!(
            args,
            vec![SqlValue::Uuid(theme_id), SqlValue::BigInt(10), SqlValue::BigInt(0)]
        );
    }
}
