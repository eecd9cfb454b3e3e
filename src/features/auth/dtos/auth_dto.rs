use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::auth::model::User;
use crate::features::roles::dtos::UserRoleResponseDto;

/// Request DTO for account registration
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequestDto {
    #[validate(
        length(min = 1, max = 150, message = "Username must be 1-150 characters"),
        regex(
            path = "*crate::shared::validation::USERNAME_REGEX",
            message = "Username may only contain letters, digits and @/./+/-/_"
        )
    )]
    pub username: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

/// Request DTO for token login
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Issued token with the caller's role assignments
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponseDto {
    pub token: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub user_id: Uuid,
    pub email: Option<String>,
    pub roles: Vec<UserRoleResponseDto>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponseDto {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    /// Group names
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl UserResponseDto {
    pub fn from_user(user: User, roles: Vec<String>) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            roles,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_validation() {
        let valid = RegisterRequestDto {
            username: "district.officer".to_string(),
            password: "long-enough".to_string(),
            email: Some("officer@example.org".to_string()),
        };
        assert!(valid.validate().is_ok());

        let bad_username = RegisterRequestDto {
            username: "has space".to_string(),
            ..valid_copy(&valid)
        };
        assert!(bad_username.validate().is_err());

        let short_password = RegisterRequestDto {
            password: "short".to_string(),
            ..valid_copy(&valid)
        };
        assert!(short_password.validate().is_err());

        let bad_email = RegisterRequestDto {
            email: Some("not-an-email".to_string()),
            ..valid_copy(&valid)
        };
        assert!(bad_email.validate().is_err());
    }

    fn valid_copy(dto: &RegisterRequestDto) -> RegisterRequestDto {
        RegisterRequestDto {
            username: dto.username.clone(),
            password: dto.password.clone(),
            email: dto.email.clone(),
        }
    }
}
