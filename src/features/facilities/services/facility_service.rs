use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::facilities::dtos::{FacilityPayloadDto, FacilityQuery};
use crate::features::facilities::models::{MedicalFacility, FACILITY_COLUMNS};
use crate::shared::constants::DEFAULT_FACILITY_PAGE_SIZE;
use crate::shared::geo::Placement;
use crate::shared::types::PageWindow;

/// Filter shared by the count and page queries, parameters $1..$6
const FILTER_CLAUSE: &str = r#"
    WHERE ($1::uuid IS NULL OR id = $1)
      AND ($2::uuid IS NULL OR type_id = $2)
      AND ($3::uuid IS NULL OR category_id = $3)
      AND ($4::uuid IS NULL OR province_id = $4)
      AND ($5::uuid IS NULL OR district_id = $5)
      AND ($6::uuid IS NULL OR municipality_id = $6)
"#;

pub struct FacilityService {
    pool: PgPool,
}

impl FacilityService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Filtered page of facilities and the total matching count
    pub async fn list(&self, query: &FacilityQuery) -> Result<(Vec<MedicalFacility>, i64)> {
        let window = PageWindow::resolve(query.page, query.page_size, DEFAULT_FACILITY_PAGE_SIZE);

        let count_query = format!("SELECT COUNT(*) FROM medical_facilities {}", FILTER_CLAUSE);
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(query.id)
            .bind(query.type_id)
            .bind(query.category_id)
            .bind(query.province_id)
            .bind(query.district_id)
            .bind(query.municipality_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count facilities: {:?}", e);
                AppError::Database(e)
            })?;

        let page_query = format!(
            "SELECT {} FROM medical_facilities {} ORDER BY name ASC, id ASC LIMIT $7 OFFSET $8",
            FACILITY_COLUMNS, FILTER_CLAUSE
        );
        let facilities: Vec<MedicalFacility> = sqlx::query_as(&page_query)
            .bind(query.id)
            .bind(query.type_id)
            .bind(query.category_id)
            .bind(query.province_id)
            .bind(query.district_id)
            .bind(query.municipality_id)
            .bind(window.limit)
            .bind(window.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch facilities: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((facilities, total))
    }

    pub async fn get(&self, id: Uuid) -> Result<MedicalFacility> {
        let query = format!("SELECT {} FROM medical_facilities WHERE id = $1", FACILITY_COLUMNS);

        sqlx::query_as::<_, MedicalFacility>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch facility {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Facility with id {} not found", id)))
    }

    pub async fn create(&self, dto: FacilityPayloadDto) -> Result<MedicalFacility> {
        let placement = Placement::resolve(dto.location, dto.lat, dto.lng)?;

        let query = format!(
            r#"
            INSERT INTO medical_facilities (
                name, type_id, category_id, province_id, district_id, municipality_id,
                ownership, contact_person, contact_num, used_for_corona_response,
                num_of_bed, num_of_icu_bed, occupied_icu_bed, num_of_ventilators,
                occupied_ventilators, num_of_isolation_bed, occupied_isolation_bed,
                total_tested, total_positive, total_death, total_in_isolation,
                hlcit_code, remarks, lat, lng, location
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                $17, $18, $19, $20, $21, $22, $23, $24, $25,
                ST_SetSRID(ST_MakePoint($26::float8, $27::float8), 4326)::geography
            )
            RETURNING {}
            "#,
            FACILITY_COLUMNS
        );

        let facility = bind_payload(sqlx::query_as::<_, MedicalFacility>(&query), &dto, &placement)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_write(e, "This facility already exists"))?;

        tracing::info!("Created facility {} ({})", facility.name, facility.id);
        Ok(facility)
    }

    /// Replace every field of a facility
    pub async fn update(&self, id: Uuid, dto: FacilityPayloadDto) -> Result<MedicalFacility> {
        let placement = Placement::resolve(dto.location, dto.lat, dto.lng)?;

        let query = format!(
            r#"
            UPDATE medical_facilities SET
                name = $1, type_id = $2, category_id = $3, province_id = $4,
                district_id = $5, municipality_id = $6, ownership = $7,
                contact_person = $8, contact_num = $9, used_for_corona_response = $10,
                num_of_bed = $11, num_of_icu_bed = $12, occupied_icu_bed = $13,
                num_of_ventilators = $14, occupied_ventilators = $15,
                num_of_isolation_bed = $16, occupied_isolation_bed = $17,
                total_tested = $18, total_positive = $19, total_death = $20,
                total_in_isolation = $21, hlcit_code = $22, remarks = $23,
                lat = $24, lng = $25,
                location = ST_SetSRID(ST_MakePoint($26::float8, $27::float8), 4326)::geography,
                updated_at = NOW()
            WHERE id = $28
            RETURNING {}
            "#,
            FACILITY_COLUMNS
        );

        bind_payload(sqlx::query_as::<_, MedicalFacility>(&query), &dto, &placement)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_write(e, "This facility already exists"))?
            .ok_or_else(|| AppError::NotFound(format!("Facility with id {} not found", id)))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM medical_facilities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete facility {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Facility with id {} not found",
                id
            )));
        }

        tracing::info!("Deleted facility {}", id);
        Ok(())
    }

    /// Every facility with a stored point, for map rendering
    pub async fn list_located(&self) -> Result<Vec<MedicalFacility>> {
        let query = format!(
            "SELECT {} FROM medical_facilities WHERE location IS NOT NULL ORDER BY name ASC",
            FACILITY_COLUMNS
        );

        sqlx::query_as(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch located facilities: {:?}", e);
                AppError::Database(e)
            })
    }

    /// Whole table, for exports
    pub async fn list_all(&self) -> Result<Vec<MedicalFacility>> {
        let query = format!(
            "SELECT {} FROM medical_facilities ORDER BY name ASC, id ASC",
            FACILITY_COLUMNS
        );

        sqlx::query_as(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch facilities for export: {:?}", e);
                AppError::Database(e)
            })
    }
}

/// Bind $1..$27 of the insert/update statements
fn bind_payload<'q>(
    query: sqlx::query::QueryAs<'q, sqlx::Postgres, MedicalFacility, sqlx::postgres::PgArguments>,
    dto: &'q FacilityPayloadDto,
    placement: &Placement,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, MedicalFacility, sqlx::postgres::PgArguments> {
    query
        .bind(&dto.name)
        .bind(dto.type_id)
        .bind(dto.category_id)
        .bind(dto.province_id)
        .bind(dto.district_id)
        .bind(dto.municipality_id)
        .bind(dto.ownership)
        .bind(&dto.contact_person)
        .bind(&dto.contact_num)
        .bind(dto.used_for_corona_response)
        .bind(dto.num_of_bed)
        .bind(dto.num_of_icu_bed)
        .bind(dto.occupied_icu_bed)
        .bind(dto.num_of_ventilators)
        .bind(dto.occupied_ventilators)
        .bind(dto.num_of_isolation_bed)
        .bind(dto.occupied_isolation_bed)
        .bind(dto.total_tested)
        .bind(dto.total_positive)
        .bind(dto.total_death)
        .bind(dto.total_in_isolation)
        .bind(&dto.hlcit_code)
        .bind(&dto.remarks)
        .bind(placement.lat)
        .bind(placement.lng)
        .bind(placement.point_x())
        .bind(placement.point_y())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at a PostGIS server"]
    async fn test_facility_rows_default_to_corona_response(pool: PgPool) {
        let type_id: Uuid =
            sqlx::query_scalar("INSERT INTO facility_types (name) VALUES ('Hospital') RETURNING id")
                .fetch_one(&pool)
                .await
                .unwrap();
        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO medical_facilities (name, type_id) VALUES ('Bir Hospital', $1) RETURNING id",
        )
        .bind(type_id)
        .fetch_one(&pool)
        .await
        .unwrap();

        let facility = FacilityService::new(pool).get(id).await.unwrap();
        assert!(facility.used_for_corona_response);
    }
}
