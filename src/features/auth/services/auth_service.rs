use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::config::BootstrapAdmin;
use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{
    LoginRequestDto, RegisterRequestDto, TokenResponseDto, UserResponseDto,
};
use crate::features::auth::model::{AuthenticatedUser, User};
use crate::features::auth::services::password::{hash_password, verify_password};
use crate::features::auth::services::token_service::TokenService;
use crate::features::roles::RoleService;
use crate::shared::constants::ROLE_FRONTEND;

const INVALID_CREDENTIALS: &str = "Unable to log in with provided credentials";

/// Service for accounts, logins and token resolution
pub struct AuthService {
    pool: PgPool,
    tokens: TokenService,
    roles: Arc<RoleService>,
}

impl AuthService {
    pub fn new(pool: PgPool, tokens: TokenService, roles: Arc<RoleService>) -> Self {
        Self {
            pool,
            tokens,
            roles,
        }
    }

    /// Create an account
    pub async fn register(&self, dto: RegisterRequestDto) -> Result<UserResponseDto> {
        let user = self
            .insert_user(&dto.username, &dto.password, dto.email.as_deref())
            .await?;

        tracing::info!("Registered user {} ({})", user.username, user.id);

        Ok(UserResponseDto::from_user(user, Vec::new()))
    }

    /// Exchange credentials for a token
    pub async fn login(&self, dto: LoginRequestDto) -> Result<TokenResponseDto> {
        let user = self
            .find_by_username(&dto.username)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| AppError::BadRequest(INVALID_CREDENTIALS.to_string()))?;

        let password = dto.password;
        let hash = user.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| AppError::Internal(format!("Password check failed: {}", e)))?;

        if !valid {
            return Err(AppError::BadRequest(INVALID_CREDENTIALS.to_string()));
        }

        let token = self.tokens.issue(user.id, &user.username)?;
        let roles = self.roles.list(Some(user.id)).await?;

        Ok(TokenResponseDto {
            token,
            expires_in: self.tokens.ttl_secs(),
            user_id: user.id,
            email: user.email,
            roles,
        })
    }

    /// Current user with group names
    pub async fn me(&self, user: &AuthenticatedUser) -> Result<UserResponseDto> {
        let account = self.find_by_id(user.user_id).await?.ok_or_else(|| {
            AppError::NotFound(format!("User with id {} not found", user.user_id))
        })?;

        let roles = self.roles.group_names(account.id).await?;
        Ok(UserResponseDto::from_user(account, roles))
    }

    /// Resolve a bearer token into the calling user.
    ///
    /// Roles are read on every call so group changes apply to live tokens.
    pub async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser> {
        let (user_id, _claims) = self.tokens.verify(token)?;

        let user = self
            .find_by_id(user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| AppError::Unauthorized("User no longer exists".to_string()))?;

        let roles = self.roles.group_names(user.id).await?;

        Ok(AuthenticatedUser {
            user_id: user.id,
            username: user.username,
            roles,
        })
    }

    /// Create the configured operator account if it does not exist yet
    pub async fn ensure_bootstrap_admin(&self, admin: &BootstrapAdmin) -> Result<()> {
        let user = match self.find_by_username(&admin.username).await? {
            Some(user) => user,
            None => {
                let user = self.insert_user(&admin.username, &admin.password, None).await?;
                tracing::info!("Created bootstrap admin {}", user.username);
                user
            }
        };

        self.roles.ensure_group(user.id, ROLE_FRONTEND).await
    }

    async fn insert_user(
        &self,
        username: &str,
        password: &str,
        email: Option<&str>,
    ) -> Result<User> {
        let password = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))??;

        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash, is_active, created_at, updated_at
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "A user with that username already exists"))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, is_active, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch user {}: {:?}", username, e);
            AppError::Database(e)
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, is_active, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch user {}: {:?}", id, e);
            AppError::Database(e)
        })
    }
}
