use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::roles::dtos::{CreateUserRoleDto, UserRoleResponseDto};
use crate::features::roles::models::UserRole;

const SELECT_USER_ROLE: &str = r#"
    SELECT ur.id, ur.user_id, g.name AS group_name, ur.province_id, ur.facility_id, ur.created_at
    FROM user_roles ur
    JOIN groups g ON g.id = ur.group_id
"#;

pub struct RoleService {
    pool: PgPool,
}

impl RoleService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List assignments, optionally for one user
    pub async fn list(&self, user_id: Option<Uuid>) -> Result<Vec<UserRoleResponseDto>> {
        let query = format!(
            "{} WHERE ($1::uuid IS NULL OR ur.user_id = $1) ORDER BY ur.created_at ASC",
            SELECT_USER_ROLE
        );

        let roles: Vec<UserRole> = sqlx::query_as(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch user roles: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(roles.into_iter().map(Into::into).collect())
    }

    /// Distinct group names held by a user
    pub async fn group_names(&self, user_id: Uuid) -> Result<Vec<String>> {
        let names: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT DISTINCT g.name
            FROM user_roles ur
            JOIN groups g ON g.id = ur.group_id
            WHERE ur.user_id = $1
            ORDER BY g.name
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch groups for user {}: {:?}", user_id, e);
            AppError::Database(e)
        })?;

        Ok(names)
    }

    pub async fn create(&self, dto: CreateUserRoleDto) -> Result<UserRoleResponseDto> {
        let group_id = self.find_group_id(&dto.group).await?;

        let role: UserRole = sqlx::query_as(
            r#"
            WITH inserted AS (
                INSERT INTO user_roles (user_id, group_id, province_id, facility_id)
                VALUES ($1, $2, $3, $4)
                RETURNING id, user_id, group_id, province_id, facility_id, created_at
            )
            SELECT i.id, i.user_id, g.name AS group_name, i.province_id, i.facility_id, i.created_at
            FROM inserted i
            JOIN groups g ON g.id = i.group_id
            "#,
        )
            .bind(dto.user_id)
            .bind(group_id)
            .bind(dto.province_id)
            .bind(dto.facility_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_write(e, "This role assignment already exists"))?;

        tracing::info!("Assigned group {} to user {}", dto.group, dto.user_id);

        Ok(role.into())
    }

    /// Give a user an unscoped group role unless they already hold it
    pub async fn ensure_group(&self, user_id: Uuid, group: &str) -> Result<()> {
        let group_id = self.find_group_id(group).await?;

        sqlx::query(
            r#"
            INSERT INTO user_roles (user_id, group_id)
            SELECT $1, $2
            WHERE NOT EXISTS (
                SELECT 1 FROM user_roles
                WHERE user_id = $1 AND group_id = $2
                  AND province_id IS NULL AND facility_id IS NULL
            )
            "#,
        )
        .bind(user_id)
        .bind(group_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "This role assignment already exists"))?;

        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM user_roles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "User role with id {} not found",
                id
            )));
        }

        Ok(())
    }

    async fn find_group_id(&self, name: &str) -> Result<Uuid> {
        sqlx::query_scalar("SELECT id FROM groups WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::BadRequest(format!("Unknown group '{}'", name)))
    }
}
