use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use uuid::Uuid;

use crate::database::models::resource::Resource;
use crate::query::FilterSet;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SessionResource {
    pub id: Uuid,
    pub session_id: Uuid,
    pub resource_id: Uuid,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Join row plus the full resource it points at, decoded from one row. The
/// resource columns are aliased `resource_*` in the SELECT; the join is inner,
/// so the embedded record is always present.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResourceWithResource {
    #[serde(flatten)]
    pub link: SessionResource,
    pub resource: Resource,
}

impl FromRow<'_, PgRow> for SessionResourceWithResource {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let link = SessionResource::from_row(row)?;
        let resource = Resource {
            id: row.try_get("resource_pk")?,
            title: row.try_get("resource_title")?,
            description: row.try_get("resource_description")?,
            url: row.try_get("resource_url")?,
            resource_type: row.try_get("resource_resource_type")?,
            grade_level: row.try_get("resource_grade_level")?,
            theme_id: row.try_get("resource_theme_id")?,
            created_at: row.try_get("resource_created_at")?,
            updated_at: row.try_get("resource_updated_at")?,
        };
        Ok(Self { link, resource })
    }
}

#[derive(Debug, Deserialize)]
pub struct NewSessionResource {
    pub session_id: Uuid,
    pub resource_id: Uuid,
    pub notes: Option<String>,
}

#[derive(Debug, Default)]
pub struct SessionResourceFilters {
    pub session_id: Option<Uuid>,
    pub resource_id: Option<Uuid>,
}

impl SessionResourceFilters {
    pub fn to_filter_set(&self) -> FilterSet {
        let mut filters = FilterSet::new();
        filters.equals("sr.session_id", self.session_id);
        filters.equals("sr.resource_id", self.resource_id);
        filters
    }
}
