use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::query::FilterSet;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Therapist {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub specialty: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct NewTherapist {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub specialty: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TherapistPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub specialty: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Default)]
pub struct TherapistFilters {
    pub specialty: Option<String>,
    pub name: Option<String>,
}

impl TherapistFilters {
    pub fn to_filter_set(&self) -> FilterSet {
        let mut filters = FilterSet::new();
        filters.equals("specialty", self.specialty.clone());
        filters.contains("first_name || ' ' || last_name", self.name.clone());
        filters
    }
}
