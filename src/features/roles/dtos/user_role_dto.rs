use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::roles::models::UserRole;

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct UserRoleQuery {
    /// Only assignments of this user
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUserRoleDto {
    pub user_id: Uuid,

    /// Group name, e.g. "FrontEnd"
    #[validate(length(min = 1, max = 80, message = "Group must be 1-80 characters"))]
    #[schema(example = "FrontEnd")]
    pub group: String,

    pub province_id: Option<Uuid>,
    pub facility_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserRoleResponseDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub group: String,
    pub province_id: Option<Uuid>,
    pub facility_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<UserRole> for UserRoleResponseDto {
    fn from(role: UserRole) -> Self {
        Self {
            id: role.id,
            user_id: role.user_id,
            group: role.group_name,
            province_id: role.province_id,
            facility_id: role.facility_id,
            created_at: role.created_at,
        }
    }
}
