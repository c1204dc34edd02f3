use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::query::FilterSet;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GameResult {
    pub id: Uuid,
    pub student_id: Uuid,
    pub resource_id: Option<Uuid>,
    pub score: i32,
    pub max_score: Option<i32>,
    pub played_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct NewGameResult {
    pub student_id: Uuid,
    pub resource_id: Option<Uuid>,
    pub score: i32,
    pub max_score: Option<i32>,
    pub played_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
pub struct GameResultFilters {
    pub student_ids: Vec<Uuid>,
    pub resource_id: Option<Uuid>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl GameResultFilters {
    pub fn to_filter_set(&self) -> FilterSet {
        let mut filters = FilterSet::new();
        filters.any_of("student_id", self.student_ids.clone());
        filters.equals("resource_id", self.resource_id);
        filters.at_least("played_at", self.from);
        filters.at_most("played_at", self.to);
        filters
    }
}
