use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::exports::dtos::ActionType;
use crate::features::facilities::models::{FacilityOwnership, MedicalFacility};
use crate::shared::geo::{stored_point, GeoPoint};

fn default_true() -> bool {
    true
}

/// Query parameters for listing facilities
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct FacilityQuery {
    pub id: Option<Uuid>,
    pub type_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub province_id: Option<Uuid>,
    pub district_id: Option<Uuid>,
    pub municipality_id: Option<Uuid>,

    /// Page number (1-indexed)
    #[param(minimum = 1)]
    pub page: Option<i64>,

    /// Items per page (default 100, max 1000)
    #[param(minimum = 1, maximum = 1000)]
    pub page_size: Option<i64>,

    /// `generate` queues an export instead of listing (FrontEnd only)
    #[param(value_type = Option<String>, example = "generate")]
    pub action_type: Option<ActionType>,
}

/// Create/replace payload for a facility.
///
/// Counters default to 0. When `location` is given it wins over `lat`/`long`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct FacilityPayloadDto {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    #[schema(example = "Bir Hospital")]
    pub name: String,

    pub type_id: Uuid,
    pub category_id: Option<Uuid>,
    pub province_id: Option<Uuid>,
    pub district_id: Option<Uuid>,
    pub municipality_id: Option<Uuid>,

    #[serde(default)]
    pub ownership: FacilityOwnership,

    #[validate(length(max = 200, message = "Contact person must be at most 200 characters"))]
    pub contact_person: Option<String>,

    #[validate(length(max = 100, message = "Contact number must be at most 100 characters"))]
    pub contact_num: Option<String>,

    #[serde(default = "default_true")]
    pub used_for_corona_response: bool,

    #[serde(default)]
    #[validate(range(min = 0, message = "Counters cannot be negative"))]
    pub num_of_bed: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "Counters cannot be negative"))]
    pub num_of_icu_bed: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "Counters cannot be negative"))]
    pub occupied_icu_bed: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "Counters cannot be negative"))]
    pub num_of_ventilators: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "Counters cannot be negative"))]
    pub occupied_ventilators: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "Counters cannot be negative"))]
    pub num_of_isolation_bed: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "Counters cannot be negative"))]
    pub occupied_isolation_bed: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "Counters cannot be negative"))]
    pub total_tested: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "Counters cannot be negative"))]
    pub total_positive: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "Counters cannot be negative"))]
    pub total_death: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "Counters cannot be negative"))]
    pub total_in_isolation: i32,

    #[validate(length(max = 50, message = "HLCIT code must be at most 50 characters"))]
    pub hlcit_code: Option<String>,

    #[serde(default)]
    pub remarks: String,

    pub location: Option<GeoPoint>,
    pub lat: Option<f64>,
    #[serde(rename = "long")]
    pub lng: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FacilityResponseDto {
    pub id: Uuid,
    pub name: String,
    pub type_id: Uuid,
    pub category_id: Option<Uuid>,
    pub province_id: Option<Uuid>,
    pub district_id: Option<Uuid>,
    pub municipality_id: Option<Uuid>,
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
    pub location: Option<GeoPoint>,
    pub lat: Option<f64>,
    #[serde(rename = "long")]
    pub lng: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MedicalFacility> for FacilityResponseDto {
    fn from(f: MedicalFacility) -> Self {
        Self {
            location: stored_point(f.has_location, f.lat, f.lng),
            id: f.id,
            name: f.name,
            type_id: f.type_id,
            category_id: f.category_id,
            province_id: f.province_id,
            district_id: f.district_id,
            municipality_id: f.municipality_id,
            ownership: f.ownership,
            contact_person: f.contact_person,
            contact_num: f.contact_num,
            used_for_corona_response: f.used_for_corona_response,
            num_of_bed: f.num_of_bed,
            num_of_icu_bed: f.num_of_icu_bed,
            occupied_icu_bed: f.occupied_icu_bed,
            num_of_ventilators: f.num_of_ventilators,
            occupied_ventilators: f.occupied_ventilators,
            num_of_isolation_bed: f.num_of_isolation_bed,
            occupied_isolation_bed: f.occupied_isolation_bed,
            total_tested: f.total_tested,
            total_positive: f.total_positive,
            total_death: f.total_death,
            total_in_isolation: f.total_in_isolation,
            hlcit_code: f.hlcit_code,
            remarks: f.remarks,
            lat: f.lat,
            lng: f.lng,
            created_at: f.created_at,
            updated_at: f.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_defaults() {
        let dto: FacilityPayloadDto = serde_json::from_value(serde_json::json!({
            "name": "Bir Hospital",
            "type_id": "0190a000-0000-7000-8000-000000000001",
            "lat": 27.7047,
            "long": 85.3131
        }))
        .unwrap();

        assert!(dto.used_for_corona_response);
        assert_eq!(dto.ownership, FacilityOwnership::Unknown);
        assert_eq!(dto.num_of_bed, 0);
        assert_eq!(dto.remarks, "");
        assert_eq!(dto.lng, Some(85.3131));
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_negative_counter_rejected() {
        let dto: FacilityPayloadDto = serde_json::from_value(serde_json::json!({
            "name": "Bir Hospital",
            "type_id": "0190a000-0000-7000-8000-000000000001",
            "num_of_icu_bed": -1
        }))
        .unwrap();

        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_ownership_wire_names() {
        let dto: FacilityPayloadDto = serde_json::from_value(serde_json::json!({
            "name": "Shree Birendra Hospital",
            "type_id": "0190a000-0000-7000-8000-000000000001",
            "ownership": "nepal_army"
        }))
        .unwrap();

        assert_eq!(dto.ownership, FacilityOwnership::NepalArmy);
    }
}
