use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::regions::models::{District, Municipality, Province};

// ==================== Queries ====================

/// Query parameters for listing provinces
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ProvinceQuery {
    /// Search by name (case-insensitive, partial match)
    #[param(example = "bagmati")]
    pub search: Option<String>,
}

/// Query parameters for listing districts
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct DistrictQuery {
    /// Search by name (case-insensitive, partial match)
    pub search: Option<String>,
    pub province_id: Option<Uuid>,
}

/// Query parameters for listing municipalities
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct MunicipalityQuery {
    /// Search by name (case-insensitive, partial match)
    pub search: Option<String>,
    pub province_id: Option<Uuid>,
    pub district_id: Option<Uuid>,
}

// ==================== Province ====================

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProvinceDto {
    #[validate(range(min = 1, message = "Province code must be positive"))]
    #[schema(example = 3)]
    pub code: i32,

    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[schema(example = "Bagmati")]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateProvinceDto {
    #[validate(range(min = 1, message = "Province code must be positive"))]
    pub code: Option<i32>,

    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProvinceResponseDto {
    pub id: Uuid,
    pub code: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Province> for ProvinceResponseDto {
    fn from(province: Province) -> Self {
        Self {
            id: province.id,
            code: province.code,
            name: province.name,
            created_at: province.created_at,
        }
    }
}

// ==================== District ====================

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateDistrictDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[schema(example = "Kathmandu")]
    pub name: String,

    pub province_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateDistrictDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    pub province_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DistrictResponseDto {
    pub id: Uuid,
    pub name: String,
    pub province_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<District> for DistrictResponseDto {
    fn from(district: District) -> Self {
        Self {
            id: district.id,
            name: district.name,
            province_id: district.province_id,
            created_at: district.created_at,
        }
    }
}

// ==================== Municipality ====================

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateMunicipalityDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[schema(example = "Kathmandu Metropolitan City")]
    pub name: String,

    pub province_id: Option<Uuid>,
    pub district_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateMunicipalityDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    pub province_id: Option<Uuid>,
    pub district_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MunicipalityResponseDto {
    pub id: Uuid,
    pub name: String,
    pub province_id: Option<Uuid>,
    pub district_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<Municipality> for MunicipalityResponseDto {
    fn from(municipality: Municipality) -> Self {
        Self {
            id: municipality.id,
            name: municipality.name,
            province_id: municipality.province_id,
            district_id: municipality.district_id,
            created_at: municipality.created_at,
        }
    }
}
