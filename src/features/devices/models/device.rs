use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Registered push-notification device
#[derive(Debug, Clone, FromRow)]
pub struct Device {
    pub id: Uuid,
    pub device_id: String,
    pub platform: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
