use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::facilities::models::FACILITY_COLUMNS;
use crate::features::proximity::models::{NearbyFacility, NearbyReport};
use crate::features::user_reports::models::{TriageResult, REPORT_COLUMNS};

/// Search point as a geography, parameters $1 (longitude) and $2 (latitude)
const SEARCH_POINT: &str = "ST_SetSRID(ST_MakePoint($1::float8, $2::float8), 4326)::geography";

/// Radius searches over facilities and self-reports
pub struct ProximityService {
    pool: PgPool,
}

impl ProximityService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Facilities within `radius_m` of the point, nearest first
    pub async fn near_facilities(
        &self,
        lat: f64,
        lng: f64,
        radius_m: f64,
        limit: i64,
    ) -> Result<Vec<NearbyFacility>> {
        let query = format!(
            r#"
            SELECT {columns}, ST_Distance(location, {point}) AS distance_m
            FROM medical_facilities
            WHERE location IS NOT NULL
              AND ST_DWithin(location, {point}, $3)
            ORDER BY distance_m ASC
            LIMIT $4
            "#,
            columns = FACILITY_COLUMNS,
            point = SEARCH_POINT
        );

        sqlx::query_as(&query)
            .bind(lng)
            .bind(lat)
            .bind(radius_m)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to search nearby facilities: {:?}", e);
                AppError::Database(e)
            })
    }

    /// Reports with the given label within `radius_m`, nearest first
    pub async fn near_reports(
        &self,
        lat: f64,
        lng: f64,
        result: TriageResult,
        radius_m: f64,
        limit: i64,
    ) -> Result<Vec<NearbyReport>> {
        let query = format!(
            r#"
            SELECT {columns}, ST_Distance(location, {point}) AS distance_m
            FROM user_reports
            WHERE result = $3
              AND location IS NOT NULL
              AND ST_DWithin(location, {point}, $4)
            ORDER BY distance_m ASC
            LIMIT $5
            "#,
            columns = REPORT_COLUMNS,
            point = SEARCH_POINT
        );

        sqlx::query_as(&query)
            .bind(lng)
            .bind(lat)
            .bind(result)
            .bind(radius_m)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to search nearby user reports: {:?}", e);
                AppError::Database(e)
            })
    }
}
