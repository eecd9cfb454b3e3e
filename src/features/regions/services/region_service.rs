use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::regions::dtos::{
    CreateDistrictDto, CreateMunicipalityDto, CreateProvinceDto, DistrictQuery, MunicipalityQuery,
    UpdateDistrictDto, UpdateMunicipalityDto, UpdateProvinceDto,
};
use crate::features::regions::models::{District, Municipality, Province};
use crate::shared::constants::MAX_SEARCH_RESULTS;

/// `%term%` pattern for a case-insensitive name search, `None` for blank input
fn search_pattern(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(|term| format!("%{}%", term.to_lowercase()))
}

/// Row cap: name searches are bounded, plain listings are not
fn row_limit(pattern: &Option<String>) -> Option<i64> {
    pattern.as_ref().map(|_| MAX_SEARCH_RESULTS)
}

/// Service for the province/district/municipality hierarchy
pub struct RegionService {
    pool: PgPool,
}

impl RegionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ==================== Province Methods ====================

    pub async fn list_provinces(&self, search: Option<&str>) -> Result<Vec<Province>> {
        let pattern = search_pattern(search);

        sqlx::query_as::<_, Province>(
            r#"
            SELECT id, code, name, created_at, updated_at
            FROM provinces
            WHERE ($1::text IS NULL OR LOWER(name) LIKE $1)
            ORDER BY created_at ASC, code ASC
            LIMIT $2
            "#,
        )
        .bind(&pattern)
        .bind(row_limit(&pattern))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch provinces: {:?}", e);
            AppError::Database(e)
        })
    }

    pub async fn get_province(&self, id: Uuid) -> Result<Province> {
        sqlx::query_as::<_, Province>(
            "SELECT id, code, name, created_at, updated_at FROM provinces WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch province {}: {:?}", id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Province with id {} not found", id)))
    }

    pub async fn create_province(&self, dto: CreateProvinceDto) -> Result<Province> {
        let province = sqlx::query_as::<_, Province>(
            r#"
            INSERT INTO provinces (code, name)
            VALUES ($1, $2)
            RETURNING id, code, name, created_at, updated_at
            "#,
        )
        .bind(dto.code)
        .bind(&dto.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "A province with this code already exists"))?;

        tracing::info!("Created province {} ({})", province.name, province.code);
        Ok(province)
    }

    pub async fn update_province(&self, id: Uuid, dto: UpdateProvinceDto) -> Result<Province> {
        sqlx::query_as::<_, Province>(
            r#"
            UPDATE provinces
            SET code = COALESCE($1, code),
                name = COALESCE($2, name),
                updated_at = NOW()
            WHERE id = $3
            RETURNING id, code, name, created_at, updated_at
            "#,
        )
        .bind(dto.code)
        .bind(dto.name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "A province with this code already exists"))?
        .ok_or_else(|| AppError::NotFound(format!("Province with id {} not found", id)))
    }

    pub async fn delete_province(&self, id: Uuid) -> Result<()> {
        self.delete_by_id("provinces", "Province", id).await
    }

    // ==================== District Methods ====================

    pub async fn list_districts(&self, query: &DistrictQuery) -> Result<Vec<District>> {
        let pattern = search_pattern(query.search.as_deref());

        sqlx::query_as::<_, District>(
            r#"
            SELECT id, name, province_id, created_at, updated_at
            FROM districts
            WHERE ($1::text IS NULL OR LOWER(name) LIKE $1)
              AND ($2::uuid IS NULL OR province_id = $2)
            ORDER BY created_at ASC, name ASC
            LIMIT $3
            "#,
        )
        .bind(&pattern)
        .bind(query.province_id)
        .bind(row_limit(&pattern))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch districts: {:?}", e);
            AppError::Database(e)
        })
    }

    pub async fn get_district(&self, id: Uuid) -> Result<District> {
        sqlx::query_as::<_, District>(
            "SELECT id, name, province_id, created_at, updated_at FROM districts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch district {}: {:?}", id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("District with id {} not found", id)))
    }

    pub async fn create_district(&self, dto: CreateDistrictDto) -> Result<District> {
        let district = sqlx::query_as::<_, District>(
            r#"
            INSERT INTO districts (name, province_id)
            VALUES ($1, $2)
            RETURNING id, name, province_id, created_at, updated_at
            "#,
        )
        .bind(&dto.name)
        .bind(dto.province_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "This district already exists"))?;

        tracing::info!("Created district {}", district.name);
        Ok(district)
    }

    pub async fn update_district(&self, id: Uuid, dto: UpdateDistrictDto) -> Result<District> {
        sqlx::query_as::<_, District>(
            r#"
            UPDATE districts
            SET name = COALESCE($1, name),
                province_id = COALESCE($2, province_id),
                updated_at = NOW()
            WHERE id = $3
            RETURNING id, name, province_id, created_at, updated_at
            "#,
        )
        .bind(dto.name)
        .bind(dto.province_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "This district already exists"))?
        .ok_or_else(|| AppError::NotFound(format!("District with id {} not found", id)))
    }

    pub async fn delete_district(&self, id: Uuid) -> Result<()> {
        self.delete_by_id("districts", "District", id).await
    }

    // ==================== Municipality Methods ====================

    pub async fn list_municipalities(&self, query: &MunicipalityQuery) -> Result<Vec<Municipality>> {
        let pattern = search_pattern(query.search.as_deref());

        sqlx::query_as::<_, Municipality>(
            r#"
            SELECT id, name, province_id, district_id, created_at, updated_at
            FROM municipalities
            WHERE ($1::text IS NULL OR LOWER(name) LIKE $1)
              AND ($2::uuid IS NULL OR province_id = $2)
              AND ($3::uuid IS NULL OR district_id = $3)
            ORDER BY created_at ASC, name ASC
            LIMIT $4
            "#,
        )
        .bind(&pattern)
        .bind(query.province_id)
        .bind(query.district_id)
        .bind(row_limit(&pattern))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch municipalities: {:?}", e);
            AppError::Database(e)
        })
    }

    pub async fn get_municipality(&self, id: Uuid) -> Result<Municipality> {
        sqlx::query_as::<_, Municipality>(
            r#"
            SELECT id, name, province_id, district_id, created_at, updated_at
            FROM municipalities
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch municipality {}: {:?}", id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Municipality with id {} not found", id)))
    }

    pub async fn create_municipality(&self, dto: CreateMunicipalityDto) -> Result<Municipality> {
        let municipality = sqlx::query_as::<_, Municipality>(
            r#"
            INSERT INTO municipalities (name, province_id, district_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, province_id, district_id, created_at, updated_at
            "#,
        )
        .bind(&dto.name)
        .bind(dto.province_id)
        .bind(dto.district_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "This municipality already exists"))?;

        tracing::info!("Created municipality {}", municipality.name);
        Ok(municipality)
    }

    pub async fn update_municipality(
        &self,
        id: Uuid,
        dto: UpdateMunicipalityDto,
    ) -> Result<Municipality> {
        sqlx::query_as::<_, Municipality>(
            r#"
            UPDATE municipalities
            SET name = COALESCE($1, name),
                province_id = COALESCE($2, province_id),
                district_id = COALESCE($3, district_id),
                updated_at = NOW()
            WHERE id = $4
            RETURNING id, name, province_id, district_id, created_at, updated_at
            "#,
        )
        .bind(dto.name)
        .bind(dto.province_id)
        .bind(dto.district_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "This municipality already exists"))?
        .ok_or_else(|| AppError::NotFound(format!("Municipality with id {} not found", id)))
    }

    pub async fn delete_municipality(&self, id: Uuid) -> Result<()> {
        self.delete_by_id("municipalities", "Municipality", id).await
    }

    /// `table` is always one of the fixed region tables above
    async fn delete_by_id(&self, table: &'static str, label: &str, id: Uuid) -> Result<()> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", table))
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete {} {}: {:?}", label, id, e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "{} with id {} not found",
                label, id
            )));
        }

        tracing::info!("Deleted {} {}", label, id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_pattern() {
        assert_eq!(search_pattern(Some("Bagmati")), Some("%bagmati%".to_string()));
        assert_eq!(search_pattern(Some("  Koshi ")), Some("%koshi%".to_string()));
        assert_eq!(search_pattern(Some("   ")), None);
        assert_eq!(search_pattern(None), None);
    }

    #[test]
    fn test_row_limit_only_for_searches() {
        assert_eq!(row_limit(&Some("%a%".to_string())), Some(MAX_SEARCH_RESULTS));
        assert_eq!(row_limit(&None), None);
    }
}
