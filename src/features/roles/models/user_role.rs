use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Role assignment joined with its group name
#[derive(Debug, Clone, FromRow)]
pub struct UserRole {
    pub id: Uuid,
    pub user_id: Uuid,
    pub group_name: String,
    pub province_id: Option<Uuid>,
    pub facility_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
