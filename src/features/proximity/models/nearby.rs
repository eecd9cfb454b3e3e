use sqlx::FromRow;

use crate::features::facilities::models::MedicalFacility;
use crate::features::user_reports::models::UserReport;

/// Facility row annotated with its distance to the search point
#[derive(Debug, Clone, FromRow)]
pub struct NearbyFacility {
    #[sqlx(flatten)]
    pub facility: MedicalFacility,
    pub distance_m: f64,
}

#[derive(Debug, Clone, FromRow)]
pub struct NearbyReport {
    #[sqlx(flatten)]
    pub report: UserReport,
    pub distance_m: f64,
}
