use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::guards::{OptionalUser, RequireFrontend};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::exports::dtos::{ActionType, ExportRequestedDto};
use crate::features::exports::models::ExportKind;
use crate::features::exports::ExportJobService;
use crate::features::facilities::dtos::{FacilityPayloadDto, FacilityQuery, FacilityResponseDto};
use crate::features::facilities::services::FacilityService;
use crate::shared::types::{ApiResponse, Meta};

/// State for facility handlers
#[derive(Clone)]
pub struct FacilityState {
    pub facility_service: Arc<FacilityService>,
    pub export_service: Arc<ExportJobService>,
}

/// List facilities, or queue an export with `action_type=generate`
#[utoipa::path(
    get,
    path = "/api/health-facilities",
    params(FacilityQuery),
    responses(
        (status = 200, description = "Page of facilities", body = ApiResponse<Vec<FacilityResponseDto>>),
        (status = 202, description = "Export queued", body = ApiResponse<ExportRequestedDto>),
        (status = 400, description = "Invalid filter"),
        (status = 403, description = "Export requires the FrontEnd group")
    ),
    tag = "facilities"
)]
pub async fn list_facilities(
    OptionalUser(user): OptionalUser,
    State(state): State<FacilityState>,
    AppQuery(query): AppQuery<FacilityQuery>,
) -> Result<Response> {
    if query.action_type == Some(ActionType::Generate) {
        let user = RequireFrontend::check_or_forbid(user.as_ref())?;
        let job = state
            .export_service
            .enqueue(ExportKind::Facility, Some(user.user_id))
            .await?;

        return Ok((
            StatusCode::ACCEPTED,
            Json(ApiResponse::success(
                Some(ExportRequestedDto::for_job(&job)),
                None,
                None,
            )),
        )
            .into_response());
    }

    let (facilities, total) = state.facility_service.list(&query).await?;
    let dtos: Vec<FacilityResponseDto> = facilities.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    ))
    .into_response())
}

/// Get a facility
#[utoipa::path(
    get,
    path = "/api/health-facilities/{id}",
    params(("id" = Uuid, Path, description = "Facility ID")),
    responses(
        (status = 200, description = "Facility", body = ApiResponse<FacilityResponseDto>),
        (status = 404, description = "Facility not found")
    ),
    tag = "facilities"
)]
pub async fn get_facility(
    State(state): State<FacilityState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<FacilityResponseDto>>> {
    let facility = state.facility_service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(facility.into()), None, None)))
}

/// Create a facility
#[utoipa::path(
    post,
    path = "/api/health-facilities",
    request_body = FacilityPayloadDto,
    responses(
        (status = 201, description = "Facility created", body = ApiResponse<FacilityResponseDto>),
        (status = 400, description = "Validation error or unknown reference"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "facilities",
    security(("bearer_auth" = []))
)]
pub async fn create_facility(
    _user: AuthenticatedUser,
    State(state): State<FacilityState>,
    AppJson(dto): AppJson<FacilityPayloadDto>,
) -> Result<(StatusCode, Json<ApiResponse<FacilityResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let facility = state.facility_service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(facility.into()), None, None)),
    ))
}

/// Replace a facility
#[utoipa::path(
    put,
    path = "/api/health-facilities/{id}",
    params(("id" = Uuid, Path, description = "Facility ID")),
    request_body = FacilityPayloadDto,
    responses(
        (status = 200, description = "Facility updated", body = ApiResponse<FacilityResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Facility not found")
    ),
    tag = "facilities",
    security(("bearer_auth" = []))
)]
pub async fn update_facility(
    _user: AuthenticatedUser,
    State(state): State<FacilityState>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<FacilityPayloadDto>,
) -> Result<Json<ApiResponse<FacilityResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let facility = state.facility_service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(facility.into()), None, None)))
}

/// Delete a facility
#[utoipa::path(
    delete,
    path = "/api/health-facilities/{id}",
    params(("id" = Uuid, Path, description = "Facility ID")),
    responses(
        (status = 200, description = "Facility deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Facility not found")
    ),
    tag = "facilities",
    security(("bearer_auth" = []))
)]
pub async fn delete_facility(
    _user: AuthenticatedUser,
    State(state): State<FacilityState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    state.facility_service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Facility deleted".to_string()),
        None,
    )))
}
