use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Province (pradesh); `code` is the official province number
#[derive(Debug, Clone, FromRow)]
pub struct Province {
    pub id: Uuid,
    pub code: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
