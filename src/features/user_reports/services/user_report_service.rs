use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::user_reports::dtos::UserReportPayloadDto;
use crate::features::user_reports::models::{TravelFlags, TriageResult, UserReport, REPORT_COLUMNS};
use crate::shared::geo::Placement;
use crate::shared::types::PageWindow;

/// Service for self-reports and their triage
pub struct UserReportService {
    pool: PgPool,
}

impl UserReportService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Triage and persist a report; `user_id` is set when the reporter is signed in
    pub async fn create(&self, user_id: Option<Uuid>, dto: UserReportPayloadDto) -> Result<UserReport> {
        let placement = Placement::resolve(dto.location, dto.lat, dto.lng)?;
        let result = TriageResult::assess(dto.temperature, TravelFlags::parse(&dto.travel_history));

        let query = format!(
            r#"
            INSERT INTO user_reports (
                user_id, name, address, contact_no, symptoms, travel_history,
                temperature, result, lat, lng, location
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                ST_SetSRID(ST_MakePoint($11::float8, $12::float8), 4326)::geography
            )
            RETURNING {}
            "#,
            REPORT_COLUMNS
        );

        let report: UserReport = sqlx::query_as(&query)
            .bind(user_id)
            .bind(&dto.name)
            .bind(&dto.address)
            .bind(&dto.contact_no)
            .bind(&dto.symptoms)
            .bind(&dto.travel_history)
            .bind(dto.temperature)
            .bind(result)
            .bind(placement.lat)
            .bind(placement.lng)
            .bind(placement.point_x())
            .bind(placement.point_y())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create user report: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!("User report {} triaged as {}", report.id, report.result);
        Ok(report)
    }

    /// Page of reports, newest first, optionally restricted to one label
    pub async fn list(
        &self,
        result: Option<TriageResult>,
        window: PageWindow,
    ) -> Result<(Vec<UserReport>, i64)> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM user_reports WHERE ($1::triage_result IS NULL OR result = $1)",
        )
        .bind(result)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count user reports: {:?}", e);
            AppError::Database(e)
        })?;

        let query = format!(
            r#"
            SELECT {} FROM user_reports
            WHERE ($1::triage_result IS NULL OR result = $1)
            ORDER BY update_date DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
            REPORT_COLUMNS
        );

        let reports = sqlx::query_as(&query)
            .bind(result)
            .bind(window.limit)
            .bind(window.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch user reports: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((reports, total))
    }

    pub async fn get(&self, id: Uuid) -> Result<UserReport> {
        let query = format!("SELECT {} FROM user_reports WHERE id = $1", REPORT_COLUMNS);

        sqlx::query_as::<_, UserReport>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound(format!("User report with id {} not found", id)))
    }

    /// Replace a report and recompute its label; the reporter is kept
    pub async fn update(&self, id: Uuid, dto: UserReportPayloadDto) -> Result<UserReport> {
        let placement = Placement::resolve(dto.location, dto.lat, dto.lng)?;
        let result = TriageResult::assess(dto.temperature, TravelFlags::parse(&dto.travel_history));

        let query = format!(
            r#"
            UPDATE user_reports SET
                name = $1, address = $2, contact_no = $3, symptoms = $4,
                travel_history = $5, temperature = $6, result = $7,
                lat = $8, lng = $9,
                location = ST_SetSRID(ST_MakePoint($10::float8, $11::float8), 4326)::geography
            WHERE id = $12
            RETURNING {}
            "#,
            REPORT_COLUMNS
        );

        sqlx::query_as::<_, UserReport>(&query)
            .bind(&dto.name)
            .bind(&dto.address)
            .bind(&dto.contact_no)
            .bind(&dto.symptoms)
            .bind(&dto.travel_history)
            .bind(dto.temperature)
            .bind(result)
            .bind(placement.lat)
            .bind(placement.lng)
            .bind(placement.point_x())
            .bind(placement.point_y())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update user report {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("User report with id {} not found", id)))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM user_reports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "User report with id {} not found",
                id
            )));
        }

        tracing::info!("Deleted user report {}", id);
        Ok(())
    }

    /// Reports with a stored point and the given label, for map layers
    pub async fn list_located_by_result(&self, result: TriageResult) -> Result<Vec<UserReport>> {
        let query = format!(
            r#"
            SELECT {} FROM user_reports
            WHERE result = $1 AND location IS NOT NULL
            ORDER BY update_date DESC
            "#,
            REPORT_COLUMNS
        );

        sqlx::query_as(&query)
            .bind(result)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch located user reports: {:?}", e);
                AppError::Database(e)
            })
    }

    /// Whole table, for exports
    pub async fn list_all(&self) -> Result<Vec<UserReport>> {
        let query = format!(
            "SELECT {} FROM user_reports ORDER BY update_date DESC, id DESC",
            REPORT_COLUMNS
        );

        sqlx::query_as(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch user reports for export: {:?}", e);
                AppError::Database(e)
            })
    }
}
