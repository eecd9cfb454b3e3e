use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Population split by age band for a district or municipality
#[derive(Debug, Clone, FromRow)]
pub struct AgeGroup {
    pub id: Uuid,
    pub hlcit_code: String,
    pub pcode: String,
    pub l0_14: i32,
    pub l15_49: i32,
    pub l50plus: i32,
    pub ltotal: i32,
    pub district_id: Option<Uuid>,
    pub municipality_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
