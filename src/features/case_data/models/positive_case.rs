use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Individual confirmed case
#[derive(Debug, Clone, FromRow)]
pub struct PositiveCase {
    pub id: Uuid,
    pub age: i32,
    pub gender: String,
    pub current_status: String,
    pub detected_date: Option<NaiveDate>,
    pub returned_date: Option<NaiveDate>,
    pub came_from: Option<String>,
    pub transit: Option<String>,
    pub laboratory: Option<String>,
    pub remarks: Option<String>,
    pub in_isolation: bool,
    pub province_id: Option<Uuid>,
    pub district_id: Option<Uuid>,
    pub municipality_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
