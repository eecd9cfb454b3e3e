use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::guards::RequireFrontend;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::tracking::dtos::{LocationPayloadDto, LocationQuery, LocationResponseDto};
use crate::features::tracking::services::LocationService;
use crate::shared::constants::DEFAULT_LOCATION_PAGE_SIZE;
use crate::shared::types::{ApiResponse, Meta, PageWindow};

/// Record the caller's current position
#[utoipa::path(
    post,
    path = "/api/track-me",
    request_body = LocationPayloadDto,
    responses(
        (status = 201, description = "Location recorded", body = ApiResponse<LocationResponseDto>),
        (status = 400, description = "Missing or out-of-range coordinates"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "tracking",
    security(("bearer_auth" = []))
)]
pub async fn track_me(
    user: AuthenticatedUser,
    State(service): State<Arc<LocationService>>,
    AppJson(dto): AppJson<LocationPayloadDto>,
) -> Result<(StatusCode, Json<ApiResponse<LocationResponseDto>>)> {
    let placement = dto.placement()?;
    let location = service.record(user.user_id, placement).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(location.into()), None, None)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/track-me",
    params(LocationQuery),
    responses(
        (status = 200, description = "Page of tracked locations", body = ApiResponse<Vec<LocationResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "tracking",
    security(("bearer_auth" = []))
)]
pub async fn list_locations(
    _guard: RequireFrontend,
    State(service): State<Arc<LocationService>>,
    AppQuery(query): AppQuery<LocationQuery>,
) -> Result<Json<ApiResponse<Vec<LocationResponseDto>>>> {
    let window = PageWindow::resolve(query.page, query.page_size, DEFAULT_LOCATION_PAGE_SIZE);
    let (locations, total) = service.list(query.user_id, window).await?;
    let dtos: Vec<LocationResponseDto> = locations.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

#[utoipa::path(
    get,
    path = "/api/track-me/{id}",
    params(("id" = Uuid, Path, description = "Location ID")),
    responses(
        (status = 200, description = "Tracked location", body = ApiResponse<LocationResponseDto>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Location not found")
    ),
    tag = "tracking",
    security(("bearer_auth" = []))
)]
pub async fn get_location(
    _guard: RequireFrontend,
    State(service): State<Arc<LocationService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<LocationResponseDto>>> {
    let location = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(location.into()), None, None)))
}

#[utoipa::path(
    put,
    path = "/api/track-me/{id}",
    params(("id" = Uuid, Path, description = "Location ID")),
    request_body = LocationPayloadDto,
    responses(
        (status = 200, description = "Location updated", body = ApiResponse<LocationResponseDto>),
        (status = 400, description = "Missing or out-of-range coordinates"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Location not found")
    ),
    tag = "tracking",
    security(("bearer_auth" = []))
)]
pub async fn update_location(
    _guard: RequireFrontend,
    State(service): State<Arc<LocationService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<LocationPayloadDto>,
) -> Result<Json<ApiResponse<LocationResponseDto>>> {
    let placement = dto.placement()?;
    let location = service.update(id, placement).await?;
    Ok(Json(ApiResponse::success(Some(location.into()), None, None)))
}

#[utoipa::path(
    delete,
    path = "/api/track-me/{id}",
    params(("id" = Uuid, Path, description = "Location ID")),
    responses(
        (status = 200, description = "Location deleted"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Location not found")
    ),
    tag = "tracking",
    security(("bearer_auth" = []))
)]
pub async fn delete_location(
    _guard: RequireFrontend,
    State(service): State<Arc<LocationService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Location deleted".to_string()),
        None,
    )))
}
