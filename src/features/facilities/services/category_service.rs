use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::facilities::dtos::{CategoryPayloadDto, FacilityTypePayloadDto};
use crate::features::facilities::models::{FacilityCategory, FacilityType};

/// Service for facility categories and types
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ==================== Categories ====================

    pub async fn list_categories(&self) -> Result<Vec<FacilityCategory>> {
        sqlx::query_as::<_, FacilityCategory>(
            "SELECT id, name, created_at FROM facility_categories ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch facility categories: {:?}", e);
            AppError::Database(e)
        })
    }

    pub async fn get_category(&self, id: Uuid) -> Result<FacilityCategory> {
        sqlx::query_as::<_, FacilityCategory>(
            "SELECT id, name, created_at FROM facility_categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))
    }

    pub async fn create_category(&self, dto: CategoryPayloadDto) -> Result<FacilityCategory> {
        sqlx::query_as::<_, FacilityCategory>(
            "INSERT INTO facility_categories (name) VALUES ($1) RETURNING id, name, created_at",
        )
        .bind(&dto.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "A category with this name already exists"))
    }

    pub async fn update_category(
        &self,
        id: Uuid,
        dto: CategoryPayloadDto,
    ) -> Result<FacilityCategory> {
        sqlx::query_as::<_, FacilityCategory>(
            r#"
            UPDATE facility_categories SET name = $1
            WHERE id = $2
            RETURNING id, name, created_at
            "#,
        )
        .bind(&dto.name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "A category with this name already exists"))?
        .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))
    }

    pub async fn delete_category(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM facility_categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Category with id {} not found",
                id
            )));
        }
        Ok(())
    }

    // ==================== Types ====================

    pub async fn list_types(&self, category_id: Option<Uuid>) -> Result<Vec<FacilityType>> {
        sqlx::query_as::<_, FacilityType>(
            r#"
            SELECT id, category_id, name, created_at
            FROM facility_types
            WHERE ($1::uuid IS NULL OR category_id = $1)
            ORDER BY created_at ASC
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch facility types: {:?}", e);
            AppError::Database(e)
        })
    }

    pub async fn get_type(&self, id: Uuid) -> Result<FacilityType> {
        sqlx::query_as::<_, FacilityType>(
            "SELECT id, category_id, name, created_at FROM facility_types WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound(format!("Facility type with id {} not found", id)))
    }

    pub async fn create_type(&self, dto: FacilityTypePayloadDto) -> Result<FacilityType> {
        sqlx::query_as::<_, FacilityType>(
            r#"
            INSERT INTO facility_types (category_id, name)
            VALUES ($1, $2)
            RETURNING id, category_id, name, created_at
            "#,
        )
        .bind(dto.category_id)
        .bind(&dto.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "A facility type with this name already exists"))
    }

    pub async fn update_type(&self, id: Uuid, dto: FacilityTypePayloadDto) -> Result<FacilityType> {
        sqlx::query_as::<_, FacilityType>(
            r#"
            UPDATE facility_types SET category_id = $1, name = $2
            WHERE id = $3
            RETURNING id, category_id, name, created_at
            "#,
        )
        .bind(dto.category_id)
        .bind(&dto.name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "A facility type with this name already exists"))?
        .ok_or_else(|| AppError::NotFound(format!("Facility type with id {} not found", id)))
    }

    pub async fn delete_type(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM facility_types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Facility type with id {} not found",
                id
            )));
        }
        Ok(())
    }
}
