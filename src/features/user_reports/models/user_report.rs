use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::TriageResult;

/// Select list for `UserReport`
pub const REPORT_COLUMNS: &str = r#"
    id, user_id, name, address, contact_no, symptoms, travel_history,
    temperature, lat, lng, location IS NOT NULL AS has_location, result,
    update_date
"#;

/// Self-reported symptoms with the triage label computed on save
#[derive(Debug, Clone, FromRow)]
pub struct UserReport {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub address: String,
    pub contact_no: String,
    pub symptoms: String,
    pub travel_history: String,
    pub temperature: f64,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub has_location: bool,
    pub result: TriageResult,
    pub update_date: DateTime<Utc>,
}
