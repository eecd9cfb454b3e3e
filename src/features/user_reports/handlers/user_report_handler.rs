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
use crate::features::exports::dtos::{ActionType, ExportRequestedDto};
use crate::features::exports::models::ExportKind;
use crate::features::exports::ExportJobService;
use crate::features::user_reports::dtos::{
    CompactUserReportDto, UserReportCreatedDto, UserReportPayloadDto, UserReportQuery,
    UserReportResponseDto,
};
use crate::features::user_reports::services::UserReportService;
use crate::shared::constants::DEFAULT_REPORT_PAGE_SIZE;
use crate::shared::types::{ApiResponse, Meta, PageWindow};

/// State for user report handlers
#[derive(Clone)]
pub struct UserReportState {
    pub report_service: Arc<UserReportService>,
    pub export_service: Arc<ExportJobService>,
}

/// Submit a self-report and receive its triage label
#[utoipa::path(
    post,
    path = "/api/user-reports",
    request_body = UserReportPayloadDto,
    responses(
        (status = 201, description = "Report triaged", body = ApiResponse<UserReportCreatedDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "user-reports"
)]
pub async fn create_user_report(
    OptionalUser(user): OptionalUser,
    State(state): State<UserReportState>,
    AppJson(dto): AppJson<UserReportPayloadDto>,
) -> Result<(StatusCode, Json<ApiResponse<UserReportCreatedDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let report = state
        .report_service
        .create(user.map(|u| u.user_id), dto)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(UserReportCreatedDto::from(&report)),
            None,
            None,
        )),
    ))
}

/// List reports, or queue an export with `action_type=generate`
///
/// `data_type=all` returns full records; a triage label returns the compact
/// `{id, name, lat, long, result}` form of matching reports.
#[utoipa::path(
    get,
    path = "/api/user-reports",
    params(UserReportQuery),
    responses(
        (status = 200, description = "Page of reports", body = ApiResponse<Vec<UserReportResponseDto>>),
        (status = 202, description = "Export queued", body = ApiResponse<ExportRequestedDto>),
        (status = 400, description = "Unknown data_type"),
        (status = 401, description = "Listing without a token"),
        (status = 403, description = "FrontEnd group required; anonymous export requests also get 403")
    ),
    tag = "user-reports",
    security(("bearer_auth" = []))
)]
pub async fn list_user_reports(
    OptionalUser(user): OptionalUser,
    State(state): State<UserReportState>,
    AppQuery(query): AppQuery<UserReportQuery>,
) -> Result<Response> {
    if query.action_type == Some(ActionType::Generate) {
        let user = RequireFrontend::check_or_forbid(user.as_ref())?;
        let job = state
            .export_service
            .enqueue(ExportKind::UserReport, Some(user.user_id))
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

    RequireFrontend::check(user.as_ref())?;
    let filter = query.result_filter()?;
    let window = PageWindow::resolve(query.page, query.page_size, DEFAULT_REPORT_PAGE_SIZE);
    let (reports, total) = state.report_service.list(filter, window).await?;
    let meta = Some(Meta { total });

    let response = match filter {
        None => {
            let dtos: Vec<UserReportResponseDto> = reports.into_iter().map(Into::into).collect();
            Json(ApiResponse::success(Some(dtos), None, meta)).into_response()
        }
        Some(_) => {
            let dtos: Vec<CompactUserReportDto> = reports.into_iter().map(Into::into).collect();
            Json(ApiResponse::success(Some(dtos), None, meta)).into_response()
        }
    };

    Ok(response)
}

/// Get a report
#[utoipa::path(
    get,
    path = "/api/user-reports/{id}",
    params(("id" = Uuid, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Report", body = ApiResponse<UserReportResponseDto>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Report not found")
    ),
    tag = "user-reports",
    security(("bearer_auth" = []))
)]
pub async fn get_user_report(
    _guard: RequireFrontend,
    State(state): State<UserReportState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserReportResponseDto>>> {
    let report = state.report_service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(report.into()), None, None)))
}

/// Replace a report and recompute its triage label
#[utoipa::path(
    put,
    path = "/api/user-reports/{id}",
    params(("id" = Uuid, Path, description = "Report ID")),
    request_body = UserReportPayloadDto,
    responses(
        (status = 200, description = "Report updated", body = ApiResponse<UserReportResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Report not found")
    ),
    tag = "user-reports",
    security(("bearer_auth" = []))
)]
pub async fn update_user_report(
    _guard: RequireFrontend,
    State(state): State<UserReportState>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UserReportPayloadDto>,
) -> Result<Json<ApiResponse<UserReportResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let report = state.report_service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(report.into()), None, None)))
}

/// Delete a report
#[utoipa::path(
    delete,
    path = "/api/user-reports/{id}",
    params(("id" = Uuid, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Report deleted"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Report not found")
    ),
    tag = "user-reports",
    security(("bearer_auth" = []))
)]
pub async fn delete_user_report(
    _guard: RequireFrontend,
    State(state): State<UserReportState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    state.report_service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("User report deleted".to_string()),
        None,
    )))
}
