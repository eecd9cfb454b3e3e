use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::auth::guards::RequireFrontend;
use crate::features::exports::dtos::{ExportDownloadDto, ExportJobResponseDto};
use crate::features::exports::services::ExportJobService;
use crate::shared::types::{ApiResponse, Meta};

/// List the caller's export jobs
#[utoipa::path(
    get,
    path = "/api/exports",
    responses(
        (status = 200, description = "Export jobs", body = ApiResponse<Vec<ExportJobResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "FrontEnd group required")
    ),
    tag = "exports",
    security(("bearer_auth" = []))
)]
pub async fn list_exports(
    RequireFrontend(user): RequireFrontend,
    State(service): State<Arc<ExportJobService>>,
) -> Result<Json<ApiResponse<Vec<ExportJobResponseDto>>>> {
    let jobs: Vec<ExportJobResponseDto> = service
        .list_for_user(user.user_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = jobs.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(jobs),
        None,
        Some(Meta { total }),
    )))
}

/// Get an export job's status
#[utoipa::path(
    get,
    path = "/api/exports/{id}",
    params(("id" = Uuid, Path, description = "Export job ID")),
    responses(
        (status = 200, description = "Export job", body = ApiResponse<ExportJobResponseDto>),
        (status = 403, description = "FrontEnd group required"),
        (status = 404, description = "Export job not found")
    ),
    tag = "exports",
    security(("bearer_auth" = []))
)]
pub async fn get_export(
    RequireFrontend(user): RequireFrontend,
    State(service): State<Arc<ExportJobService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ExportJobResponseDto>>> {
    let job = service.get_for_user(id, user.user_id).await?;
    Ok(Json(ApiResponse::success(Some(job.into()), None, None)))
}

/// Download the rows of a completed export
#[utoipa::path(
    get,
    path = "/api/exports/{id}/download",
    params(("id" = Uuid, Path, description = "Export job ID")),
    responses(
        (status = 200, description = "Rendered rows", body = ApiResponse<ExportDownloadDto>),
        (status = 403, description = "FrontEnd group required"),
        (status = 404, description = "Export job not found"),
        (status = 409, description = "Export job not completed yet")
    ),
    tag = "exports",
    security(("bearer_auth" = []))
)]
pub async fn download_export(
    RequireFrontend(user): RequireFrontend,
    State(service): State<Arc<ExportJobService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ExportDownloadDto>>> {
    let download = service.download(id, user.user_id).await?;
    Ok(Json(ApiResponse::success(Some(download), None, None)))
}
