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
use crate::features::facilities::dtos::{
    CategoryPayloadDto, CategoryResponseDto, FacilityTypePayloadDto, FacilityTypeQuery,
    FacilityTypeResponseDto,
};
use crate::features::facilities::services::CategoryService;
use crate::shared::types::ApiResponse;

// ==================== Category Handlers ====================

/// List facility categories
#[utoipa::path(
    get,
    path = "/api/health-categories",
    responses(
        (status = 200, description = "Facility categories", body = ApiResponse<Vec<CategoryResponseDto>>)
    ),
    tag = "facilities"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let categories = service.list_categories().await?;
    let dtos: Vec<CategoryResponseDto> = categories.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

/// Get a facility category
#[utoipa::path(
    get,
    path = "/api/health-categories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Facility category", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "facilities"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.get_category(id).await?;
    Ok(Json(ApiResponse::success(Some(category.into()), None, None)))
}

/// Create a facility category
#[utoipa::path(
    post,
    path = "/api/health-categories",
    request_body = CategoryPayloadDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Name already used")
    ),
    tag = "facilities",
    security(("bearer_auth" = []))
)]
pub async fn create_category(
    _user: AuthenticatedUser,
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<CategoryPayloadDto>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.create_category(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(category.into()), None, None)),
    ))
}

/// Rename a facility category
#[utoipa::path(
    put,
    path = "/api/health-categories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    request_body = CategoryPayloadDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found")
    ),
    tag = "facilities",
    security(("bearer_auth" = []))
)]
pub async fn update_category(
    _user: AuthenticatedUser,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<CategoryPayloadDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.update_category(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(category.into()), None, None)))
}

/// Delete a facility category
#[utoipa::path(
    delete,
    path = "/api/health-categories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found")
    ),
    tag = "facilities",
    security(("bearer_auth" = []))
)]
pub async fn delete_category(
    _user: AuthenticatedUser,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete_category(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Category deleted".to_string()),
        None,
    )))
}

// ==================== Type Handlers ====================

/// List facility types
#[utoipa::path(
    get,
    path = "/api/health-types",
    params(FacilityTypeQuery),
    responses(
        (status = 200, description = "Facility types", body = ApiResponse<Vec<FacilityTypeResponseDto>>)
    ),
    tag = "facilities"
)]
pub async fn list_types(
    State(service): State<Arc<CategoryService>>,
    AppQuery(query): AppQuery<FacilityTypeQuery>,
) -> Result<Json<ApiResponse<Vec<FacilityTypeResponseDto>>>> {
    let types = service.list_types(query.category_id).await?;
    let dtos: Vec<FacilityTypeResponseDto> = types.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

/// Get a facility type
#[utoipa::path(
    get,
    path = "/api/health-types/{id}",
    params(("id" = Uuid, Path, description = "Facility type ID")),
    responses(
        (status = 200, description = "Facility type", body = ApiResponse<FacilityTypeResponseDto>),
        (status = 404, description = "Facility type not found")
    ),
    tag = "facilities"
)]
pub async fn get_type(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<FacilityTypeResponseDto>>> {
    let facility_type = service.get_type(id).await?;
    Ok(Json(ApiResponse::success(
        Some(facility_type.into()),
        None,
        None,
    )))
}

/// Create a facility type
#[utoipa::path(
    post,
    path = "/api/health-types",
    request_body = FacilityTypePayloadDto,
    responses(
        (status = 201, description = "Facility type created", body = ApiResponse<FacilityTypeResponseDto>),
        (status = 400, description = "Validation error or unknown category"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "facilities",
    security(("bearer_auth" = []))
)]
pub async fn create_type(
    _user: AuthenticatedUser,
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<FacilityTypePayloadDto>,
) -> Result<(StatusCode, Json<ApiResponse<FacilityTypeResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let facility_type = service.create_type(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(facility_type.into()), None, None)),
    ))
}

/// Update a facility type
#[utoipa::path(
    put,
    path = "/api/health-types/{id}",
    params(("id" = Uuid, Path, description = "Facility type ID")),
    request_body = FacilityTypePayloadDto,
    responses(
        (status = 200, description = "Facility type updated", body = ApiResponse<FacilityTypeResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Facility type not found")
    ),
    tag = "facilities",
    security(("bearer_auth" = []))
)]
pub async fn update_type(
    _user: AuthenticatedUser,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<FacilityTypePayloadDto>,
) -> Result<Json<ApiResponse<FacilityTypeResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let facility_type = service.update_type(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(facility_type.into()),
        None,
        None,
    )))
}

/// Delete a facility type and the facilities of that type
#[utoipa::path(
    delete,
    path = "/api/health-types/{id}",
    params(("id" = Uuid, Path, description = "Facility type ID")),
    responses(
        (status = 200, description = "Facility type deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Facility type not found")
    ),
    tag = "facilities",
    security(("bearer_auth" = []))
)]
pub async fn delete_type(
    _user: AuthenticatedUser,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete_type(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Facility type deleted".to_string()),
        None,
    )))
}
