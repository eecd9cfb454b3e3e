use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::regions::dtos::{
    CreateDistrictDto, CreateMunicipalityDto, CreateProvinceDto, DistrictQuery,
    DistrictResponseDto, MunicipalityQuery, MunicipalityResponseDto, ProvinceQuery,
    ProvinceResponseDto, UpdateDistrictDto, UpdateMunicipalityDto, UpdateProvinceDto,
};
use crate::features::regions::services::RegionService;
use crate::shared::types::ApiResponse;

// ==================== Province Handlers ====================

/// List provinces
#[utoipa::path(
    get,
    path = "/api/provinces",
    params(ProvinceQuery),
    responses(
        (status = 200, description = "List of provinces", body = ApiResponse<Vec<ProvinceResponseDto>>)
    ),
    tag = "regions"
)]
pub async fn list_provinces(
    State(service): State<Arc<RegionService>>,
    AppQuery(query): AppQuery<ProvinceQuery>,
) -> Result<Json<ApiResponse<Vec<ProvinceResponseDto>>>> {
    let provinces = service.list_provinces(query.search.as_deref()).await?;
    let dtos: Vec<ProvinceResponseDto> = provinces.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

/// Get a province by id
#[utoipa::path(
    get,
    path = "/api/provinces/{id}",
    params(("id" = Uuid, Path, description = "Province ID")),
    responses(
        (status = 200, description = "Province details", body = ApiResponse<ProvinceResponseDto>),
        (status = 404, description = "Province not found")
    ),
    tag = "regions"
)]
pub async fn get_province(
    State(service): State<Arc<RegionService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProvinceResponseDto>>> {
    let province = service.get_province(id).await?;
    Ok(Json(ApiResponse::success(Some(province.into()), None, None)))
}

/// Create a province
#[utoipa::path(
    post,
    path = "/api/provinces",
    request_body = CreateProvinceDto,
    responses(
        (status = 201, description = "Province created", body = ApiResponse<ProvinceResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Province code already exists")
    ),
    tag = "regions",
    security(("bearer_auth" = []))
)]
pub async fn create_province(
    _user: AuthenticatedUser,
    State(service): State<Arc<RegionService>>,
    AppJson(dto): AppJson<CreateProvinceDto>,
) -> Result<(StatusCode, Json<ApiResponse<ProvinceResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let province = service.create_province(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(province.into()), None, None)),
    ))
}

/// Update a province
#[utoipa::path(
    put,
    path = "/api/provinces/{id}",
    params(("id" = Uuid, Path, description = "Province ID")),
    request_body = UpdateProvinceDto,
    responses(
        (status = 200, description = "Province updated", body = ApiResponse<ProvinceResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Province not found")
    ),
    tag = "regions",
    security(("bearer_auth" = []))
)]
pub async fn update_province(
    _user: AuthenticatedUser,
    State(service): State<Arc<RegionService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateProvinceDto>,
) -> Result<Json<ApiResponse<ProvinceResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let province = service.update_province(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(province.into()), None, None)))
}

/// Delete a province with its districts and municipalities
#[utoipa::path(
    delete,
    path = "/api/provinces/{id}",
    params(("id" = Uuid, Path, description = "Province ID")),
    responses(
        (status = 200, description = "Province deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Province not found")
    ),
    tag = "regions",
    security(("bearer_auth" = []))
)]
pub async fn delete_province(
    _user: AuthenticatedUser,
    State(service): State<Arc<RegionService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete_province(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Province deleted".to_string()),
        None,
    )))
}

// ==================== District Handlers ====================

/// List districts
#[utoipa::path(
    get,
    path = "/api/districts",
    params(DistrictQuery),
    responses(
        (status = 200, description = "List of districts", body = ApiResponse<Vec<DistrictResponseDto>>)
    ),
    tag = "regions"
)]
pub async fn list_districts(
    State(service): State<Arc<RegionService>>,
    AppQuery(query): AppQuery<DistrictQuery>,
) -> Result<Json<ApiResponse<Vec<DistrictResponseDto>>>> {
    let districts = service.list_districts(&query).await?;
    let dtos: Vec<DistrictResponseDto> = districts.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

/// Get a district by id
#[utoipa::path(
    get,
    path = "/api/districts/{id}",
    params(("id" = Uuid, Path, description = "District ID")),
    responses(
        (status = 200, description = "District details", body = ApiResponse<DistrictResponseDto>),
        (status = 404, description = "District not found")
    ),
    tag = "regions"
)]
pub async fn get_district(
    State(service): State<Arc<RegionService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DistrictResponseDto>>> {
    let district = service.get_district(id).await?;
    Ok(Json(ApiResponse::success(Some(district.into()), None, None)))
}

/// Create a district
#[utoipa::path(
    post,
    path = "/api/districts",
    request_body = CreateDistrictDto,
    responses(
        (status = 201, description = "District created", body = ApiResponse<DistrictResponseDto>),
        (status = 400, description = "Validation error or unknown province"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "regions",
    security(("bearer_auth" = []))
)]
pub async fn create_district(
    _user: AuthenticatedUser,
    State(service): State<Arc<RegionService>>,
    AppJson(dto): AppJson<CreateDistrictDto>,
) -> Result<(StatusCode, Json<ApiResponse<DistrictResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let district = service.create_district(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(district.into()), None, None)),
    ))
}

/// Update a district
#[utoipa::path(
    put,
    path = "/api/districts/{id}",
    params(("id" = Uuid, Path, description = "District ID")),
    request_body = UpdateDistrictDto,
    responses(
        (status = 200, description = "District updated", body = ApiResponse<DistrictResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "District not found")
    ),
    tag = "regions",
    security(("bearer_auth" = []))
)]
pub async fn update_district(
    _user: AuthenticatedUser,
    State(service): State<Arc<RegionService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateDistrictDto>,
) -> Result<Json<ApiResponse<DistrictResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let district = service.update_district(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(district.into()), None, None)))
}

/// Delete a district with its municipalities
#[utoipa::path(
    delete,
    path = "/api/districts/{id}",
    params(("id" = Uuid, Path, description = "District ID")),
    responses(
        (status = 200, description = "District deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "District not found")
    ),
    tag = "regions",
    security(("bearer_auth" = []))
)]
pub async fn delete_district(
    _user: AuthenticatedUser,
    State(service): State<Arc<RegionService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete_district(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("District deleted".to_string()),
        None,
    )))
}

// ==================== Municipality Handlers ====================

/// List municipalities
#[utoipa::path(
    get,
    path = "/api/municipalities",
    params(MunicipalityQuery),
    responses(
        (status = 200, description = "List of municipalities", body = ApiResponse<Vec<MunicipalityResponseDto>>)
    ),
    tag = "regions"
)]
pub async fn list_municipalities(
    State(service): State<Arc<RegionService>>,
    AppQuery(query): AppQuery<MunicipalityQuery>,
) -> Result<Json<ApiResponse<Vec<MunicipalityResponseDto>>>> {
    let municipalities = service.list_municipalities(&query).await?;
    let dtos: Vec<MunicipalityResponseDto> = municipalities.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

/// Get a municipality by id
#[utoipa::path(
    get,
    path = "/api/municipalities/{id}",
    params(("id" = Uuid, Path, description = "Municipality ID")),
    responses(
        (status = 200, description = "Municipality details", body = ApiResponse<MunicipalityResponseDto>),
        (status = 404, description = "Municipality not found")
    ),
    tag = "regions"
)]
pub async fn get_municipality(
    State(service): State<Arc<RegionService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MunicipalityResponseDto>>> {
    let municipality = service.get_municipality(id).await?;
    Ok(Json(ApiResponse::success(
        Some(municipality.into()),
        None,
        None,
    )))
}

/// Create a municipality
#[utoipa::path(
    post,
    path = "/api/municipalities",
    request_body = CreateMunicipalityDto,
    responses(
        (status = 201, description = "Municipality created", body = ApiResponse<MunicipalityResponseDto>),
        (status = 400, description = "Validation error or unknown parent region"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "regions",
    security(("bearer_auth" = []))
)]
pub async fn create_municipality(
    _user: AuthenticatedUser,
    State(service): State<Arc<RegionService>>,
    AppJson(dto): AppJson<CreateMunicipalityDto>,
) -> Result<(StatusCode, Json<ApiResponse<MunicipalityResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let municipality = service.create_municipality(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(municipality.into()), None, None)),
    ))
}

/// Update a municipality
#[utoipa::path(
    put,
    path = "/api/municipalities/{id}",
    params(("id" = Uuid, Path, description = "Municipality ID")),
    request_body = UpdateMunicipalityDto,
    responses(
        (status = 200, description = "Municipality updated", body = ApiResponse<MunicipalityResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Municipality not found")
    ),
    tag = "regions",
    security(("bearer_auth" = []))
)]
pub async fn update_municipality(
    _user: AuthenticatedUser,
    State(service): State<Arc<RegionService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateMunicipalityDto>,
) -> Result<Json<ApiResponse<MunicipalityResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let municipality = service.update_municipality(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(municipality.into()),
        None,
        None,
    )))
}

/// Delete a municipality
#[utoipa::path(
    delete,
    path = "/api/municipalities/{id}",
    params(("id" = Uuid, Path, description = "Municipality ID")),
    responses(
        (status = 200, description = "Municipality deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Municipality not found")
    ),
    tag = "regions",
    security(("bearer_auth" = []))
)]
pub async fn delete_municipality(
    _user: AuthenticatedUser,
    State(service): State<Arc<RegionService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete_municipality(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Municipality deleted".to_string()),
        None,
    )))
}
