use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::error::Result;
use crate::core::extractor::AppQuery;
use crate::features::auth::guards::RequireFrontend;
use crate::features::proximity::dtos::{
    NearFacilityDto, NearFacilityQuery, NearReportDto, NearReportQuery,
};
use crate::features::proximity::services::ProximityService;
use crate::shared::constants::{
    MAX_PAGE_SIZE, NEAR_FACILITY_DEFAULT_KM, NEAR_FACILITY_LIMIT, NEAR_REPORT_LIMIT,
};
use crate::shared::geo::{check_coordinates, radius_meters};
use crate::shared::types::ApiResponse;

/// Facilities nearest to a point
#[utoipa::path(
    get,
    path = "/api/near-facility",
    params(NearFacilityQuery),
    responses(
        (status = 200, description = "Facilities ordered by distance", body = ApiResponse<Vec<NearFacilityDto>>),
        (status = 400, description = "Missing or out-of-range coordinates or radius"),
        (status = 403, description = "FrontEnd group required")
    ),
    tag = "proximity",
    security(("bearer_auth" = []))
)]
pub async fn near_facility(
    _guard: RequireFrontend,
    State(service): State<Arc<ProximityService>>,
    AppQuery(query): AppQuery<NearFacilityQuery>,
) -> Result<Json<ApiResponse<Vec<NearFacilityDto>>>> {
    check_coordinates(query.lat, query.lng)?;
    let radius = radius_meters(query.km.unwrap_or(NEAR_FACILITY_DEFAULT_KM))?;
    let limit = query
        .limit
        .unwrap_or(NEAR_FACILITY_LIMIT)
        .clamp(1, MAX_PAGE_SIZE);

    let rows = service
        .near_facilities(query.lat, query.lng, radius, limit)
        .await?;
    let dtos: Vec<NearFacilityDto> = rows.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

/// Self-reports with a given triage label nearest to a point
#[utoipa::path(
    get,
    path = "/api/near-report",
    params(NearReportQuery),
    responses(
        (status = 200, description = "Reports ordered by distance", body = ApiResponse<Vec<NearReportDto>>),
        (status = 400, description = "Missing or invalid parameters"),
        (status = 403, description = "FrontEnd group required")
    ),
    tag = "proximity",
    security(("bearer_auth" = []))
)]
pub async fn near_report(
    _guard: RequireFrontend,
    State(service): State<Arc<ProximityService>>,
    AppQuery(query): AppQuery<NearReportQuery>,
) -> Result<Json<ApiResponse<Vec<NearReportDto>>>> {
    check_coordinates(query.lat, query.lng)?;
    let radius = radius_meters(query.km)?;

    let rows = service
        .near_reports(query.lat, query.lng, query.result, radius, NEAR_REPORT_LIMIT)
        .await?;
    let dtos: Vec<NearReportDto> = rows.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}
