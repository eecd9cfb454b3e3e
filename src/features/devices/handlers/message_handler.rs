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
use crate::features::devices::dtos::{DeviceMessagePayloadDto, DeviceMessageResponseDto};
use crate::features::devices::services::DeviceService;
use crate::shared::types::ApiResponse;

/// Messages shown in the mobile app, newest first
#[utoipa::path(
    get,
    path = "/api/device-messages",
    responses(
        (status = 200, description = "Messages", body = ApiResponse<Vec<DeviceMessageResponseDto>>)
    ),
    tag = "devices"
)]
pub async fn list_messages(
    State(service): State<Arc<DeviceService>>,
) -> Result<Json<ApiResponse<Vec<DeviceMessageResponseDto>>>> {
    let messages = service.list_messages().await?;
    let dtos: Vec<DeviceMessageResponseDto> = messages.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/device-messages/{id}",
    params(("id" = Uuid, Path, description = "Message ID")),
    responses(
        (status = 200, description = "Message", body = ApiResponse<DeviceMessageResponseDto>),
        (status = 404, description = "Message not found")
    ),
    tag = "devices"
)]
pub async fn get_message(
    State(service): State<Arc<DeviceService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeviceMessageResponseDto>>> {
    let message = service.get_message(id).await?;
    Ok(Json(ApiResponse::success(Some(message.into()), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/device-messages",
    request_body = DeviceMessagePayloadDto,
    responses(
        (status = 201, description = "Message created", body = ApiResponse<DeviceMessageResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden")
    ),
    tag = "devices",
    security(("bearer_auth" = []))
)]
pub async fn create_message(
    _guard: RequireFrontend,
    State(service): State<Arc<DeviceService>>,
    AppJson(dto): AppJson<DeviceMessagePayloadDto>,
) -> Result<(StatusCode, Json<ApiResponse<DeviceMessageResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    dto.check_content()?;

    let message = service.create_message(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(message.into()), None, None)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/device-messages/{id}",
    params(("id" = Uuid, Path, description = "Message ID")),
    request_body = DeviceMessagePayloadDto,
    responses(
        (status = 200, description = "Message updated", body = ApiResponse<DeviceMessageResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Message not found")
    ),
    tag = "devices",
    security(("bearer_auth" = []))
)]
pub async fn update_message(
    _guard: RequireFrontend,
    State(service): State<Arc<DeviceService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<DeviceMessagePayloadDto>,
) -> Result<Json<ApiResponse<DeviceMessageResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    dto.check_content()?;

    let message = service.update_message(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(message.into()), None, None)))
}

#[utoipa::path(
    delete,
    path = "/api/device-messages/{id}",
    params(("id" = Uuid, Path, description = "Message ID")),
    responses(
        (status = 200, description = "Message deleted"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Message not found")
    ),
    tag = "devices",
    security(("bearer_auth" = []))
)]
pub async fn delete_message(
    _guard: RequireFrontend,
    State(service): State<Arc<DeviceService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete_message(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Message deleted".to_string()),
        None,
    )))
}
