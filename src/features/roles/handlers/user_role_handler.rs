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
use crate::features::auth::guards::RequireFrontend;
use crate::features::roles::dtos::{CreateUserRoleDto, UserRoleQuery, UserRoleResponseDto};
use crate::features::roles::services::RoleService;
use crate::shared::types::ApiResponse;

/// List role assignments
#[utoipa::path(
    get,
    path = "/api/user-roles",
    params(UserRoleQuery),
    responses(
        (status = 200, description = "Role assignments", body = ApiResponse<Vec<UserRoleResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "FrontEnd group required")
    ),
    tag = "roles",
    security(("bearer_auth" = []))
)]
pub async fn list_user_roles(
    RequireFrontend(_user): RequireFrontend,
    State(service): State<Arc<RoleService>>,
    AppQuery(query): AppQuery<UserRoleQuery>,
) -> Result<Json<ApiResponse<Vec<UserRoleResponseDto>>>> {
    let roles = service.list(query.user_id).await?;
    Ok(Json(ApiResponse::success(Some(roles), None, None)))
}

/// Assign a group to a user
#[utoipa::path(
    post,
    path = "/api/user-roles",
    request_body = CreateUserRoleDto,
    responses(
        (status = 201, description = "Role assigned", body = ApiResponse<UserRoleResponseDto>),
        (status = 400, description = "Validation error or unknown group"),
        (status = 403, description = "FrontEnd group required"),
        (status = 409, description = "Assignment already exists")
    ),
    tag = "roles",
    security(("bearer_auth" = []))
)]
pub async fn create_user_role(
    RequireFrontend(_user): RequireFrontend,
    State(service): State<Arc<RoleService>>,
    AppJson(dto): AppJson<CreateUserRoleDto>,
) -> Result<(StatusCode, Json<ApiResponse<UserRoleResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let role = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(role), None, None)),
    ))
}

/// Remove a role assignment
#[utoipa::path(
    delete,
    path = "/api/user-roles/{id}",
    params(("id" = Uuid, Path, description = "Role assignment ID")),
    responses(
        (status = 200, description = "Role removed"),
        (status = 403, description = "FrontEnd group required"),
        (status = 404, description = "Role assignment not found")
    ),
    tag = "roles",
    security(("bearer_auth" = []))
)]
pub async fn delete_user_role(
    RequireFrontend(_user): RequireFrontend,
    State(service): State<Arc<RoleService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Role assignment deleted".to_string()),
        None,
    )))
}
