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
use crate::features::auth::guards::RequireFrontend;
use crate::features::case_data::dtos::{
    CreateSnapshotDto, NationalStatsDto, RegionStatsDto, SnapshotQuery, SnapshotResponseDto,
    StatsQuery, UpdateSnapshotDto,
};
use crate::features::case_data::services::SnapshotService;
use crate::shared::types::ApiResponse;

/// Headline statistics
///
/// With `province`, `district` or `municipality` (`all` or an id) returns the
/// active snapshots of that level with facility counts; without any returns
/// the national aggregate.
#[utoipa::path(
    get,
    path = "/api/stats",
    params(StatsQuery),
    responses(
        (status = 200, description = "National aggregate; a list of `RegionStatsDto` when a region parameter is given", body = ApiResponse<NationalStatsDto>),
        (status = 400, description = "Region id is neither `all` nor a UUID")
    ),
    tag = "case-data"
)]
pub async fn get_stats(
    State(service): State<Arc<SnapshotService>>,
    AppQuery(query): AppQuery<StatsQuery>,
) -> Result<Response> {
    let response = match query.selection()? {
        Some((level, selector)) => {
            let rows = service.region_stats(level, selector).await?;
            let dtos: Vec<RegionStatsDto> = rows.into_iter().map(Into::into).collect();
            Json(ApiResponse::success(Some(dtos), None, None)).into_response()
        }
        None => {
            let stats = service.national_stats().await?;
            Json(ApiResponse::success(Some(stats), None, None)).into_response()
        }
    };

    Ok(response)
}

/// List case snapshots
#[utoipa::path(
    get,
    path = "/api/case-snapshots",
    params(SnapshotQuery),
    responses(
        (status = 200, description = "Snapshots, newest first", body = ApiResponse<Vec<SnapshotResponseDto>>)
    ),
    tag = "case-data"
)]
pub async fn list_snapshots(
    State(service): State<Arc<SnapshotService>>,
    AppQuery(query): AppQuery<SnapshotQuery>,
) -> Result<Json<ApiResponse<Vec<SnapshotResponseDto>>>> {
    let snapshots = service.list(&query).await?;
    let dtos: Vec<SnapshotResponseDto> = snapshots.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

/// Get a case snapshot
#[utoipa::path(
    get,
    path = "/api/case-snapshots/{id}",
    params(("id" = Uuid, Path, description = "Snapshot ID")),
    responses(
        (status = 200, description = "Snapshot", body = ApiResponse<SnapshotResponseDto>),
        (status = 404, description = "Snapshot not found")
    ),
    tag = "case-data"
)]
pub async fn get_snapshot(
    State(service): State<Arc<SnapshotService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SnapshotResponseDto>>> {
    let snapshot = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(snapshot.into()), None, None)))
}

/// Record a new snapshot, replacing the region's active one
#[utoipa::path(
    post,
    path = "/api/case-snapshots",
    request_body = CreateSnapshotDto,
    responses(
        (status = 201, description = "Snapshot recorded", body = ApiResponse<SnapshotResponseDto>),
        (status = 400, description = "Validation error or unknown region"),
        (status = 403, description = "FrontEnd group required"),
        (status = 409, description = "Concurrent activation for the same region")
    ),
    tag = "case-data",
    security(("bearer_auth" = []))
)]
pub async fn create_snapshot(
    _guard: RequireFrontend,
    State(service): State<Arc<SnapshotService>>,
    AppJson(dto): AppJson<CreateSnapshotDto>,
) -> Result<(StatusCode, Json<ApiResponse<SnapshotResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let snapshot = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(snapshot.into()), None, None)),
    ))
}

/// Correct a snapshot's counters
#[utoipa::path(
    put,
    path = "/api/case-snapshots/{id}",
    params(("id" = Uuid, Path, description = "Snapshot ID")),
    request_body = UpdateSnapshotDto,
    responses(
        (status = 200, description = "Snapshot updated", body = ApiResponse<SnapshotResponseDto>),
        (status = 403, description = "FrontEnd group required"),
        (status = 404, description = "Snapshot not found"),
        (status = 409, description = "Another snapshot is active for the region")
    ),
    tag = "case-data",
    security(("bearer_auth" = []))
)]
pub async fn update_snapshot(
    _guard: RequireFrontend,
    State(service): State<Arc<SnapshotService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateSnapshotDto>,
) -> Result<Json<ApiResponse<SnapshotResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let snapshot = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(snapshot.into()), None, None)))
}

/// Delete a snapshot
#[utoipa::path(
    delete,
    path = "/api/case-snapshots/{id}",
    params(("id" = Uuid, Path, description = "Snapshot ID")),
    responses(
        (status = 200, description = "Snapshot deleted"),
        (status = 403, description = "FrontEnd group required"),
        (status = 404, description = "Snapshot not found")
    ),
    tag = "case-data",
    security(("bearer_auth" = []))
)]
pub async fn delete_snapshot(
    _guard: RequireFrontend,
    State(service): State<Arc<SnapshotService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Snapshot deleted".to_string()),
        None,
    )))
}
