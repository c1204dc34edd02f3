use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::query::FilterSet;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub id: Uuid,
    pub student_id: Uuid,
    pub therapist_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: Option<i32>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct NewSession {
    pub student_id: Uuid,
    pub therapist_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: Option<i32>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SessionPatch {
    pub scheduled_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Default)]
pub struct SessionFilters {
    pub student_id: Option<Uuid>,
    pub therapist_id: Option<Uuid>,
    pub status: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl SessionFilters {
    pub fn to_filter_set(&self) -> FilterSet {
        let mut filters = FilterSet::new();
        filters.equals("student_id", self.student_id);
        filters.equals("therapist_id", self.therapist_id);
        filters.equals("status", self.status.clone());
        filters.at_least("scheduled_at", self.from);
        filters.at_most("scheduled_at", self.to);
        filters
    }
}
