use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct FacilityType {
    pub id: Uuid,
    pub category_id: Option<Uuid>,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
