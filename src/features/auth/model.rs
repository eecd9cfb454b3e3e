use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::constants::ROLE_FRONTEND;

/// Caller resolved from a bearer token; roles are the user's group names.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub username: String,
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    /// Check if user has a specific role
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Operator tier: may manage reports, snapshots and exports
    pub fn is_frontend(&self) -> bool {
        self.has_role(ROLE_FRONTEND)
    }
}

/// Stored account
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// JWT claims carried by access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frontend_role_check() {
        let mut user = AuthenticatedUser {
            user_id: Uuid::new_v4(),
            username: "ops".to_string(),
            roles: vec!["ProvinceAdmin".to_string()],
        };
        assert!(!user.is_frontend());
        assert!(user.has_role("ProvinceAdmin"));

        user.roles.push(ROLE_FRONTEND.to_string());
        assert!(user.is_frontend());
    }
}
