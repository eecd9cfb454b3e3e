use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireFrontend;
use crate::features::devices::dtos::{DeviceResponseDto, RegisterDeviceDto};
use crate::features::devices::services::DeviceService;
use crate::shared::types::ApiResponse;

/// Register a push device
///
/// Idempotent on `device_id`; the reply body is always `{}`.
#[utoipa::path(
    post,
    path = "/api/devices",
    request_body = RegisterDeviceDto,
    responses(
        (status = 201, description = "Device registered"),
        (status = 400, description = "Validation error")
    ),
    tag = "devices"
)]
pub async fn register_device(
    State(service): State<Arc<DeviceService>>,
    AppJson(dto): AppJson<RegisterDeviceDto>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.register(dto).await?;
    Ok((StatusCode::CREATED, Json(serde_json::json!({}))))
}

#[utoipa::path(
    get,
    path = "/api/devices",
    responses(
        (status = 200, description = "Registered devices", body = ApiResponse<Vec<DeviceResponseDto>>),
        (status = 403, description = "Forbidden")
    ),
    tag = "devices",
    security(("bearer_auth" = []))
)]
pub async fn list_devices(
    _guard: RequireFrontend,
    State(service): State<Arc<DeviceService>>,
) -> Result<Json<ApiResponse<Vec<DeviceResponseDto>>>> {
    let devices = service.list_devices().await?;
    let dtos: Vec<DeviceResponseDto> = devices.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

#[utoipa::path(
    delete,
    path = "/api/devices/{id}",
    params(("id" = Uuid, Path, description = "Device ID")),
    responses(
        (status = 200, description = "Device removed"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Device not found")
    ),
    tag = "devices",
    security(("bearer_auth" = []))
)]
pub async fn delete_device(
    _guard: RequireFrontend,
    State(service): State<Arc<DeviceService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete_device(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Device removed".to_string()),
        None,
    )))
}
