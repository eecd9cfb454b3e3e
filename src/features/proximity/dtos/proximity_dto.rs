use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::facilities::dtos::FacilityResponseDto;
use crate::features::proximity::models::{NearbyFacility, NearbyReport};
use crate::features::user_reports::dtos::CompactUserReportDto;
use crate::features::user_reports::models::TriageResult;

/// Query parameters for the nearest-facility lookup
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct NearFacilityQuery {
    #[param(example = 27.7172)]
    pub lat: f64,

    #[serde(rename = "long")]
    #[param(example = 85.324)]
    pub lng: f64,

    /// Search radius in kilometres (default 500)
    pub km: Option<f64>,

    /// Maximum number of facilities (default 10)
    #[param(minimum = 1)]
    pub limit: Option<i64>,
}

/// Query parameters for the nearest-report lookup
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct NearReportQuery {
    pub lat: f64,

    #[serde(rename = "long")]
    pub lng: f64,

    /// Triage label to match
    pub result: TriageResult,

    /// Search radius in kilometres
    pub km: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NearFacilityDto {
    #[serde(flatten)]
    pub facility: FacilityResponseDto,
    /// Geodesic distance to the search point in meters
    pub distance_m: f64,
}

impl From<NearbyFacility> for NearFacilityDto {
    fn from(row: NearbyFacility) -> Self {
        Self {
            facility: row.facility.into(),
            distance_m: row.distance_m,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NearReportDto {
    #[serde(flatten)]
    pub report: CompactUserReportDto,
    pub distance_m: f64,
}

impl From<NearbyReport> for NearReportDto {
    fn from(row: NearbyReport) -> Self {
        Self {
            report: row.report.into(),
            distance_m: row.distance_m,
        }
    }
}
