use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Select list for `MedicalFacility`; `has_location` reports whether the
/// geography column is set.
pub const FACILITY_COLUMNS: &str = r#"
    id, province_id, district_id, municipality_id, name, category_id, type_id,
    ownership, contact_person, contact_num, used_for_corona_response,
    num_of_bed, num_of_icu_bed, occupied_icu_bed, num_of_ventilators,
    occupied_ventilators, num_of_isolation_bed, occupied_isolation_bed,
    total_tested, total_positive, total_death, total_in_isolation,
    hlcit_code, remarks, lat, lng, location IS NOT NULL AS has_location,
    created_at, updated_at
"#;

/// Who operates a facility
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "facility_ownership", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FacilityOwnership {
    #[default]
    Unknown,
    Government,
    Private,
    NepalArmy,
}

impl std::fmt::Display for FacilityOwnership {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FacilityOwnership::Unknown => write!(f, "unknown"),
            FacilityOwnership::Government => write!(f, "government"),
            FacilityOwnership::Private => write!(f, "private"),
            FacilityOwnership::NepalArmy => write!(f, "nepal_army"),
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct MedicalFacility {
    pub id: Uuid,
    pub province_id: Option<Uuid>,
    pub district_id: Option<Uuid>,
    pub municipality_id: Option<Uuid>,
    pub name: String,
    pub category_id: Option<Uuid>,
    pub type_id: Uuid,
    pub ownership: FacilityOwnership,
    pub contact_person: Option<String>,
    pub contact_num: Option<String>,
    pub used_for_corona_response: bool,
    pub num_of_bed: i32,
    pub num_of_icu_bed: i32,
    pub occupied_icu_bed: i32,
    pub num_of_ventilators: i32,
    pub occupied_ventilators: i32,
    pub num_of_isolation_bed: i32,
    pub occupied_isolation_bed: i32,
    pub total_tested: i32,
    pub total_positive: i32,
    pub total_death: i32,
    pub total_in_isolation: i32,
    pub hlcit_code: Option<String>,
    pub remarks: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub has_location: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
