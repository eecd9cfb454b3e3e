use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

pub const LOCATION_COLUMNS: &str = r#"
    id, user_id, lat, lng, location IS NOT NULL AS has_location, update_date
"#;

/// Last reported position of a signed-in user
#[derive(Debug, Clone, FromRow)]
pub struct UserLocation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub has_location: bool,
    pub update_date: DateTime<Utc>,
}
