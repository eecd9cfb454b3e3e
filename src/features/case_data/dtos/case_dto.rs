use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::case_data::models::{AgeGroup, PositiveCase};

fn default_status() -> String {
    "unknown".to_string()
}

// ==================== Positive cases ====================

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct CaseQuery {
    pub province_id: Option<Uuid>,
    pub district_id: Option<Uuid>,
    pub municipality_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CasePayloadDto {
    #[serde(default)]
    #[validate(range(min = 0, max = 150, message = "Age must be between 0 and 150"))]
    pub age: i32,

    #[validate(length(min = 1, max = 15, message = "Gender must be 1-15 characters"))]
    #[schema(example = "Female")]
    pub gender: String,

    #[serde(default = "default_status")]
    #[validate(length(min = 1, max = 31, message = "Status must be 1-31 characters"))]
    #[schema(example = "recovered")]
    pub current_status: String,

    pub detected_date: Option<NaiveDate>,
    pub returned_date: Option<NaiveDate>,

    #[validate(length(max = 255))]
    pub came_from: Option<String>,

    #[validate(length(max = 255))]
    pub transit: Option<String>,

    /// Testing laboratory; older clients send it as `labrotary`
    #[serde(alias = "labrotary")]
    #[validate(length(max = 255))]
    pub laboratory: Option<String>,

    #[validate(length(max = 255))]
    pub remarks: Option<String>,

    #[serde(default)]
    pub in_isolation: bool,

    pub province_id: Option<Uuid>,
    pub district_id: Option<Uuid>,
    pub municipality_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CaseResponseDto {
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

impl From<PositiveCase> for CaseResponseDto {
    fn from(c: PositiveCase) -> Self {
        Self {
            id: c.id,
            age: c.age,
            gender: c.gender,
            current_status: c.current_status,
            detected_date: c.detected_date,
            returned_date: c.returned_date,
            came_from: c.came_from,
            transit: c.transit,
            laboratory: c.laboratory,
            remarks: c.remarks,
            in_isolation: c.in_isolation,
            province_id: c.province_id,
            district_id: c.district_id,
            municipality_id: c.municipality_id,
            created_at: c.created_at,
        }
    }
}

// ==================== Age groups ====================

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct AgeGroupQuery {
    pub district_id: Option<Uuid>,
    pub municipality_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AgeGroupPayloadDto {
    #[validate(length(min = 1, max = 63, message = "HLCIT code must be 1-63 characters"))]
    pub hlcit_code: String,

    #[validate(length(min = 1, max = 31, message = "P-code must be 1-31 characters"))]
    pub pcode: String,

    #[serde(default)]
    #[validate(range(min = 0, message = "Counts cannot be negative"))]
    pub l0_14: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "Counts cannot be negative"))]
    pub l15_49: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "Counts cannot be negative"))]
    pub l50plus: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "Counts cannot be negative"))]
    pub ltotal: i32,

    pub district_id: Option<Uuid>,
    pub municipality_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AgeGroupResponseDto {
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

impl From<AgeGroup> for AgeGroupResponseDto {
    fn from(a: AgeGroup) -> Self {
        Self {
            id: a.id,
            hlcit_code: a.hlcit_code,
            pcode: a.pcode,
            l0_14: a.l0_14,
            l15_49: a.l15_49,
            l50plus: a.l50plus,
            ltotal: a.ltotal,
            district_id: a.district_id,
            municipality_id: a.municipality_id,
            created_at: a.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_case_defaults_and_legacy_laboratory_key() {
        let dto: CasePayloadDto = serde_json::from_value(json!({
            "age": 34,
            "gender": "Male",
            "labrotary": "NPHL",
            "detected_date": "2020-03-23"
        }))
        .unwrap();

        assert_eq!(dto.current_status, "unknown");
        assert_eq!(dto.laboratory.as_deref(), Some("NPHL"));
        assert_eq!(dto.detected_date, NaiveDate::from_ymd_opt(2020, 3, 23));
        assert!(!dto.in_isolation);
        assert!(dto.validate().is_ok());
    }
}
