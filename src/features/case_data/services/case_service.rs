use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::case_data::dtos::{
    AgeGroupPayloadDto, AgeGroupQuery, CasePayloadDto, CaseQuery,
};
use crate::features::case_data::models::{AgeGroup, PositiveCase};

const CASE_COLUMNS: &str = r#"
    id, age, gender, current_status, detected_date, returned_date, came_from,
    transit, laboratory, remarks, in_isolation, province_id, district_id,
    municipality_id, created_at
"#;

const AGE_GROUP_COLUMNS: &str = r#"
    id, hlcit_code, pcode, l0_14, l15_49, l50plus, ltotal, district_id,
    municipality_id, created_at
"#;

/// Service for individual positive cases and age-group population data
pub struct CaseService {
    pool: PgPool,
}

impl CaseService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ==================== Positive cases ====================

    pub async fn list_cases(&self, query: &CaseQuery) -> Result<Vec<PositiveCase>> {
        let sql = format!(
            r#"
            SELECT {} FROM positive_cases
            WHERE ($1::uuid IS NULL OR province_id = $1)
              AND ($2::uuid IS NULL OR district_id = $2)
              AND ($3::uuid IS NULL OR municipality_id = $3)
            ORDER BY detected_date DESC NULLS LAST, created_at DESC
            "#,
            CASE_COLUMNS
        );

        sqlx::query_as(&sql)
            .bind(query.province_id)
            .bind(query.district_id)
            .bind(query.municipality_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch positive cases: {:?}", e);
                AppError::Database(e)
            })
    }

    pub async fn get_case(&self, id: Uuid) -> Result<PositiveCase> {
        let sql = format!("SELECT {} FROM positive_cases WHERE id = $1", CASE_COLUMNS);

        sqlx::query_as::<_, PositiveCase>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound(format!("Case with id {} not found", id)))
    }

    pub async fn create_case(&self, dto: CasePayloadDto) -> Result<PositiveCase> {
        let sql = format!(
            r#"
            INSERT INTO positive_cases (
                age, gender, current_status, detected_date, returned_date, came_from,
                transit, laboratory, remarks, in_isolation, province_id, district_id,
                municipality_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {}
            "#,
            CASE_COLUMNS
        );

        let case: PositiveCase = sqlx::query_as(&sql)
            .bind(dto.age)
            .bind(&dto.gender)
            .bind(&dto.current_status)
            .bind(dto.detected_date)
            .bind(dto.returned_date)
            .bind(&dto.came_from)
            .bind(&dto.transit)
            .bind(&dto.laboratory)
            .bind(&dto.remarks)
            .bind(dto.in_isolation)
            .bind(dto.province_id)
            .bind(dto.district_id)
            .bind(dto.municipality_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_write(e, "This case already exists"))?;

        tracing::info!("Recorded positive case {}", case.id);
        Ok(case)
    }

    pub async fn update_case(&self, id: Uuid, dto: CasePayloadDto) -> Result<PositiveCase> {
        let sql = format!(
            r#"
            UPDATE positive_cases SET
                age = $1, gender = $2, current_status = $3, detected_date = $4,
                returned_date = $5, came_from = $6, transit = $7, laboratory = $8,
                remarks = $9, in_isolation = $10, province_id = $11,
                district_id = $12, municipality_id = $13
            WHERE id = $14
            RETURNING {}
            "#,
            CASE_COLUMNS
        );

        sqlx::query_as::<_, PositiveCase>(&sql)
            .bind(dto.age)
            .bind(&dto.gender)
            .bind(&dto.current_status)
            .bind(dto.detected_date)
            .bind(dto.returned_date)
            .bind(&dto.came_from)
            .bind(&dto.transit)
            .bind(&dto.laboratory)
            .bind(&dto.remarks)
            .bind(dto.in_isolation)
            .bind(dto.province_id)
            .bind(dto.district_id)
            .bind(dto.municipality_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_write(e, "This case already exists"))?
            .ok_or_else(|| AppError::NotFound(format!("Case with id {} not found", id)))
    }

    pub async fn delete_case(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM positive_cases WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Case with id {} not found", id)));
        }
        Ok(())
    }

    // ==================== Age groups ====================

    pub async fn list_age_groups(&self, query: &AgeGroupQuery) -> Result<Vec<AgeGroup>> {
        let sql = format!(
            r#"
            SELECT {} FROM age_groups
            WHERE ($1::uuid IS NULL OR district_id = $1)
              AND ($2::uuid IS NULL OR municipality_id = $2)
            ORDER BY hlcit_code ASC
            "#,
            AGE_GROUP_COLUMNS
        );

        sqlx::query_as(&sql)
            .bind(query.district_id)
            .bind(query.municipality_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch age groups: {:?}", e);
                AppError::Database(e)
            })
    }

    pub async fn get_age_group(&self, id: Uuid) -> Result<AgeGroup> {
        let sql = format!("SELECT {} FROM age_groups WHERE id = $1", AGE_GROUP_COLUMNS);

        sqlx::query_as::<_, AgeGroup>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound(format!("Age group with id {} not found", id)))
    }

    pub async fn create_age_group(&self, dto: AgeGroupPayloadDto) -> Result<AgeGroup> {
        let sql = format!(
            r#"
            INSERT INTO age_groups (
                hlcit_code, pcode, l0_14, l15_49, l50plus, ltotal, district_id, municipality_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            AGE_GROUP_COLUMNS
        );

        sqlx::query_as(&sql)
            .bind(&dto.hlcit_code)
            .bind(&dto.pcode)
            .bind(dto.l0_14)
            .bind(dto.l15_49)
            .bind(dto.l50plus)
            .bind(dto.ltotal)
            .bind(dto.district_id)
            .bind(dto.municipality_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_write(e, "Age group data already exists for this code"))
    }

    pub async fn update_age_group(&self, id: Uuid, dto: AgeGroupPayloadDto) -> Result<AgeGroup> {
        let sql = format!(
            r#"
            UPDATE age_groups SET
                hlcit_code = $1, pcode = $2, l0_14 = $3, l15_49 = $4, l50plus = $5,
                ltotal = $6, district_id = $7, municipality_id = $8
            WHERE id = $9
            RETURNING {}
            "#,
            AGE_GROUP_COLUMNS
        );

        sqlx::query_as::<_, AgeGroup>(&sql)
            .bind(&dto.hlcit_code)
            .bind(&dto.pcode)
            .bind(dto.l0_14)
            .bind(dto.l15_49)
            .bind(dto.l50plus)
            .bind(dto.ltotal)
            .bind(dto.district_id)
            .bind(dto.municipality_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_write(e, "Age group data already exists for this code"))?
            .ok_or_else(|| AppError::NotFound(format!("Age group with id {} not found", id)))
    }

    pub async fn delete_age_group(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM age_groups WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Age group with id {} not found",
                id
            )));
        }
        Ok(())
    }
}
