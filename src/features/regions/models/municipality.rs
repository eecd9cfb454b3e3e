use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Local level (palika)
#[derive(Debug, Clone, FromRow)]
pub struct Municipality {
    pub id: Uuid,
    pub name: String,
    pub province_id: Option<Uuid>,
    pub district_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
