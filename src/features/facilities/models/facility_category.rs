use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Top-level grouping, e.g. "Hospital" or "Health Post"
#[derive(Debug, Clone, FromRow)]
pub struct FacilityCategory {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
