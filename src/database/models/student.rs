use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::query::FilterSet;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub grade_level: Option<i32>,
    pub notes: Option<String>,
    pub therapist_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub grade_level: Option<i32>,
    pub notes: Option<String>,
    pub therapist_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StudentPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub grade_level: Option<i32>,
    pub notes: Option<String>,
    pub therapist_id: Option<Uuid>,
}

#[derive(Debug, Default)]
pub struct StudentFilters {
    pub therapist_id: Option<Uuid>,
    pub grade_level: Option<i32>,
    pub name: Option<String>,
}

impl StudentFilters {
    pub fn to_filter_set(&self) -> FilterSet {
        let mut filters = FilterSet::new();
        filters.equals("therapist_id", self.therapist_id);
        filters.equals("grade_level", self.grade_level);
        filters.contains("first_name || ' ' || last_name", self.name.clone());
        filters
    }
}
