use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::facilities::models::{FacilityCategory, FacilityType};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CategoryPayloadDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[schema(example = "Hospital")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<FacilityCategory> for CategoryResponseDto {
    fn from(category: FacilityCategory) -> Self {
        Self {
            id: category.id,
            name: category.name,
            created_at: category.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct FacilityTypeQuery {
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct FacilityTypePayloadDto {
    pub category_id: Option<Uuid>,

    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[schema(example = "Zonal Hospital")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FacilityTypeResponseDto {
    pub id: Uuid,
    pub category_id: Option<Uuid>,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<FacilityType> for FacilityTypeResponseDto {
    fn from(facility_type: FacilityType) -> Self {
        Self {
            id: facility_type.id,
            category_id: facility_type.category_id,
            name: facility_type.name,
            created_at: facility_type.created_at,
        }
    }
}
