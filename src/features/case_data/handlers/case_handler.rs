use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::case_data::dtos::{
    AgeGroupPayloadDto, AgeGroupQuery, AgeGroupResponseDto, CasePayloadDto, CaseQuery,
    CaseResponseDto,
};
use crate::features::case_data::services::CaseService;
use crate::shared::types::ApiResponse;

// ==================== Positive cases ====================

/// List positive cases
#[utoipa::path(
    get,
    path = "/api/cases",
    params(CaseQuery),
    responses(
        (status = 200, description = "Positive cases", body = ApiResponse<Vec<CaseResponseDto>>)
    ),
    tag = "case-data"
)]
pub async fn list_cases(
    State(service): State<Arc<CaseService>>,
    AppQuery(query): AppQuery<CaseQuery>,
) -> Result<Json<ApiResponse<Vec<CaseResponseDto>>>> {
    let cases = service.list_cases(&query).await?;
    let dtos: Vec<CaseResponseDto> = cases.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/cases/{id}",
    params(("id" = Uuid, Path, description = "Case ID")),
    responses(
        (status = 200, description = "Positive case", body = ApiResponse<CaseResponseDto>),
        (status = 404, description = "Case not found")
    ),
    tag = "case-data"
)]
pub async fn get_case(
    State(service): State<Arc<CaseService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CaseResponseDto>>> {
    let case = service.get_case(id).await?;
    Ok(Json(ApiResponse::success(Some(case.into()), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/cases",
    request_body = CasePayloadDto,
    responses(
        (status = 201, description = "Case recorded", body = ApiResponse<CaseResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "case-data",
    security(("bearer_auth" = []))
)]
pub async fn create_case(
    _user: AuthenticatedUser,
    State(service): State<Arc<CaseService>>,
    AppJson(dto): AppJson<CasePayloadDto>,
) -> Result<(StatusCode, Json<ApiResponse<CaseResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let case = service.create_case(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(case.into()), None, None)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/cases/{id}",
    params(("id" = Uuid, Path, description = "Case ID")),
    request_body = CasePayloadDto,
    responses(
        (status = 200, description = "Case updated", body = ApiResponse<CaseResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Case not found")
    ),
    tag = "case-data",
    security(("bearer_auth" = []))
)]
pub async fn update_case(
    _user: AuthenticatedUser,
    State(service): State<Arc<CaseService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<CasePayloadDto>,
) -> Result<Json<ApiResponse<CaseResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let case = service.update_case(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(case.into()), None, None)))
}

#[utoipa::path(
    delete,
    path = "/api/cases/{id}",
    params(("id" = Uuid, Path, description = "Case ID")),
    responses(
        (status = 200, description = "Case deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Case not found")
    ),
    tag = "case-data",
    security(("bearer_auth" = []))
)]
pub async fn delete_case(
    _user: AuthenticatedUser,
    State(service): State<Arc<CaseService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete_case(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Case deleted".to_string()),
        None,
    )))
}

// ==================== Age groups ====================

/// List age-group population data
#[utoipa::path(
    get,
    path = "/api/age-groups",
    params(AgeGroupQuery),
    responses(
        (status = 200, description = "Age groups", body = ApiResponse<Vec<AgeGroupResponseDto>>)
    ),
    tag = "case-data"
)]
pub async fn list_age_groups(
    State(service): State<Arc<CaseService>>,
    AppQuery(query): AppQuery<AgeGroupQuery>,
) -> Result<Json<ApiResponse<Vec<AgeGroupResponseDto>>>> {
    let groups = service.list_age_groups(&query).await?;
    let dtos: Vec<AgeGroupResponseDto> = groups.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/age-groups/{id}",
    params(("id" = Uuid, Path, description = "Age group ID")),
    responses(
        (status = 200, description = "Age group", body = ApiResponse<AgeGroupResponseDto>),
        (status = 404, description = "Age group not found")
    ),
    tag = "case-data"
)]
pub async fn get_age_group(
    State(service): State<Arc<CaseService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AgeGroupResponseDto>>> {
    let group = service.get_age_group(id).await?;
    Ok(Json(ApiResponse::success(Some(group.into()), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/age-groups",
    request_body = AgeGroupPayloadDto,
    responses(
        (status = 201, description = "Age group created", body = ApiResponse<AgeGroupResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "case-data",
    security(("bearer_auth" = []))
)]
pub async fn create_age_group(
    _user: AuthenticatedUser,
    State(service): State<Arc<CaseService>>,
    AppJson(dto): AppJson<AgeGroupPayloadDto>,
) -> Result<(StatusCode, Json<ApiResponse<AgeGroupResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let group = service.create_age_group(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(group.into()), None, None)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/age-groups/{id}",
    params(("id" = Uuid, Path, description = "Age group ID")),
    request_body = AgeGroupPayloadDto,
    responses(
        (status = 200, description = "Age group updated", body = ApiResponse<AgeGroupResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Age group not found")
    ),
    tag = "case-data",
    security(("bearer_auth" = []))
)]
pub async fn update_age_group(
    _user: AuthenticatedUser,
    State(service): State<Arc<CaseService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<AgeGroupPayloadDto>,
) -> Result<Json<ApiResponse<AgeGroupResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let group = service.update_age_group(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(group.into()), None, None)))
}

#[utoipa::path(
    delete,
    path = "/api/age-groups/{id}",
    params(("id" = Uuid, Path, description = "Age group ID")),
    responses(
        (status = 200, description = "Age group deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Age group not found")
    ),
    tag = "case-data",
    security(("bearer_auth" = []))
)]
pub async fn delete_age_group(
    _user: AuthenticatedUser,
    State(service): State<Arc<CaseService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete_age_group(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Age group deleted".to_string()),
        None,
    )))
}
