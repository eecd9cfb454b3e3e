use sqlx::PgPool;
use std::time::Duration;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::exports::dtos::ExportDownloadDto;
use crate::features::exports::models::{ExportJob, ExportJobStatus, ExportKind};

const JOB_COLUMNS: &str = r#"
    id, kind, status, requested_by, retry_count, error_message, row_count,
    created_at, started_at, completed_at
"#;

/// Service for the export job queue
pub struct ExportJobService {
    pool: PgPool,
}

impl ExportJobService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Queue a new export
    pub async fn enqueue(&self, kind: ExportKind, requested_by: Option<Uuid>) -> Result<ExportJob> {
        let query = format!(
            "INSERT INTO export_jobs (kind, requested_by) VALUES ($1, $2) RETURNING {}",
            JOB_COLUMNS
        );

        let job: ExportJob = sqlx::query_as(&query)
            .bind(kind)
            .bind(requested_by)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create export job: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!("Export job created: {} ({})", job.id, job.kind);
        Ok(job)
    }

    /// Move the oldest claimable job to `processing` and return it.
    ///
    /// Claimable means pending with retries left, or stuck in `processing` for
    /// longer than `stale_after` (the worker died mid-job). A reclaimed job
    /// spends one retry. Rows locked by another worker are skipped.
    pub async fn claim_next(
        &self,
        max_retries: i32,
        stale_after: Duration,
    ) -> Result<Option<ExportJob>> {
        let query = format!(
            r#"
            UPDATE export_jobs
            SET status = 'processing',
                started_at = NOW(),
                retry_count = CASE WHEN status = 'processing'
                                   THEN retry_count + 1
                                   ELSE retry_count END
            WHERE id = (
                SELECT id FROM export_jobs
                WHERE retry_count < $1
                  AND (
                    status = 'pending'
                    OR (status = 'processing'
                        AND started_at < NOW() - make_interval(secs => $2))
                  )
                ORDER BY created_at ASC
                LIMIT 1
                FOR UPDATE SKIP LOCKED
            )
            RETURNING {}
            "#,
            JOB_COLUMNS
        );

        sqlx::query_as(&query)
            .bind(max_retries)
            .bind(stale_after.as_secs_f64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to claim export job: {:?}", e);
                AppError::Database(e)
            })
    }

    /// Fail jobs stuck in `processing` that have no retries left to reclaim them
    pub async fn fail_abandoned(&self, max_retries: i32, stale_after: Duration) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE export_jobs
            SET status = $3, error_message = 'Worker stopped while processing the export'
            WHERE status = 'processing'
              AND retry_count >= $1
              AND started_at < NOW() - make_interval(secs => $2)
            "#,
        )
        .bind(max_retries)
        .bind(stale_after.as_secs_f64())
        .bind(ExportJobStatus::Failed)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fail abandoned export jobs: {:?}", e);
            AppError::Database(e)
        })?;

        if result.rows_affected() > 0 {
            tracing::warn!("{} abandoned export jobs marked failed", result.rows_affected());
        }
        Ok(result.rows_affected())
    }

    /// Store the rendered rows and mark the job completed
    pub async fn mark_completed(&self, job_id: Uuid, rows: serde_json::Value) -> Result<()> {
        let row_count = rows
            .as_array()
            .map(|r| i32::try_from(r.len()).unwrap_or(i32::MAX));

        sqlx::query(
            r#"
            UPDATE export_jobs
            SET status = $2, payload = $3, row_count = $4, error_message = NULL,
                completed_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(job_id)
        .bind(ExportJobStatus::Completed)
        .bind(rows)
        .bind(row_count)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to mark export job as completed: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Export job {} marked as completed", job_id);
        Ok(())
    }

    /// Record a failed attempt; the job returns to `pending` until retries run out
    pub async fn mark_failed(
        &self,
        job_id: Uuid,
        current_retry_count: i32,
        max_retries: i32,
        error_message: &str,
    ) -> Result<()> {
        let (new_status, new_retry_count) =
            ExportJobStatus::after_failure(current_retry_count, max_retries);

        sqlx::query(
            r#"
            UPDATE export_jobs
            SET status = $2, error_message = $3, retry_count = $4
            WHERE id = $1
            "#,
        )
        .bind(job_id)
        .bind(new_status)
        .bind(error_message)
        .bind(new_retry_count)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to mark export job as failed: {:?}", e);
            AppError::Database(e)
        })?;

        if new_status == ExportJobStatus::Failed {
            tracing::warn!(
                "Export job {} permanently failed after {} retries",
                job_id,
                max_retries
            );
        } else {
            tracing::info!(
                "Export job {} marked for retry ({}/{})",
                job_id,
                new_retry_count,
                max_retries
            );
        }

        Ok(())
    }

    /// Jobs requested by a user, newest first
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ExportJob>> {
        let query = format!(
            "SELECT {} FROM export_jobs WHERE requested_by = $1 ORDER BY created_at DESC",
            JOB_COLUMNS
        );

        sqlx::query_as(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list export jobs for {}: {:?}", user_id, e);
                AppError::Database(e)
            })
    }

    /// A job owned by `user_id`; other users' jobs are reported as missing
    pub async fn get_for_user(&self, id: Uuid, user_id: Uuid) -> Result<ExportJob> {
        let query = format!(
            "SELECT {} FROM export_jobs WHERE id = $1 AND requested_by = $2",
            JOB_COLUMNS
        );

        sqlx::query_as(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound(format!("Export job with id {} not found", id)))
    }

    /// Payload of a completed job
    pub async fn download(&self, id: Uuid, user_id: Uuid) -> Result<ExportDownloadDto> {
        let job = self.get_for_user(id, user_id).await?;

        if job.status != ExportJobStatus::Completed {
            return Err(AppError::Conflict(format!(
                "Export job {} is {}, not completed",
                id, job.status
            )));
        }

        let rows: Option<serde_json::Value> =
            sqlx::query_scalar("SELECT payload FROM export_jobs WHERE id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        Ok(ExportDownloadDto {
            id: job.id,
            kind: job.kind,
            completed_at: job.completed_at,
            rows: rows.unwrap_or_else(|| serde_json::Value::Array(Vec::new())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STALE_AFTER: Duration = Duration::from_secs(600);

    async fn job_state(pool: &PgPool, id: Uuid) -> (ExportJobStatus, i32) {
        sqlx::query_as("SELECT status, retry_count FROM export_jobs WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    async fn backdate_start(pool: &PgPool, id: Uuid) {
        sqlx::query("UPDATE export_jobs SET started_at = NOW() - INTERVAL '1 hour' WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .unwrap();
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at a PostGIS server"]
    async fn test_claim_next_leaves_other_jobs_pending(pool: PgPool) {
        let service = ExportJobService::new(pool.clone());
        let a = service.enqueue(ExportKind::Facility, None).await.unwrap();
        let b = service.enqueue(ExportKind::UserReport, None).await.unwrap();

        let claimed = service.claim_next(3, STALE_AFTER).await.unwrap().unwrap();
        let other = if claimed.id == a.id { b.id } else { a.id };

        assert_eq!(claimed.status, ExportJobStatus::Processing);
        assert_eq!(job_state(&pool, other).await.0, ExportJobStatus::Pending);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at a PostGIS server"]
    async fn test_stranded_processing_job_is_reclaimed(pool: PgPool) {
        let service = ExportJobService::new(pool.clone());
        let job = service.enqueue(ExportKind::Facility, None).await.unwrap();

        // Claimed, then the worker dies before recording an outcome
        service.claim_next(3, STALE_AFTER).await.unwrap().unwrap();
        assert!(service.claim_next(3, STALE_AFTER).await.unwrap().is_none());

        backdate_start(&pool, job.id).await;
        let reclaimed = service.claim_next(3, STALE_AFTER).await.unwrap().unwrap();
        assert_eq!(reclaimed.id, job.id);
        assert_eq!(reclaimed.retry_count, 1);

        service
            .mark_completed(job.id, serde_json::json!([]))
            .await
            .unwrap();
        assert_eq!(job_state(&pool, job.id).await.0, ExportJobStatus::Completed);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at a PostGIS server"]
    async fn test_abandoned_job_without_retries_fails(pool: PgPool) {
        let service = ExportJobService::new(pool.clone());
        let job = service.enqueue(ExportKind::UserReport, None).await.unwrap();

        sqlx::query("UPDATE export_jobs SET status = 'processing', retry_count = 3 WHERE id = $1")
            .bind(job.id)
            .execute(&pool)
            .await
            .unwrap();
        backdate_start(&pool, job.id).await;

        assert!(service.claim_next(3, STALE_AFTER).await.unwrap().is_none());
        assert_eq!(service.fail_abandoned(3, STALE_AFTER).await.unwrap(), 1);
        assert_eq!(job_state(&pool, job.id).await, (ExportJobStatus::Failed, 3));
    }
}
