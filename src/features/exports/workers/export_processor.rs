use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::time::interval;

use crate::core::config::ExportConfig;
use crate::core::error::{AppError, Result};
use crate::features::exports::models::{ExportJob, ExportKind};
use crate::features::exports::services::ExportJobService;
use crate::features::facilities::dtos::FacilityResponseDto;
use crate::features::facilities::FacilityService;
use crate::features::user_reports::dtos::UserReportResponseDto;
use crate::features::user_reports::UserReportService;

/// Background worker that renders queued exports
pub struct ExportProcessor {
    jobs: Arc<ExportJobService>,
    facilities: Arc<FacilityService>,
    user_reports: Arc<UserReportService>,
    config: ExportConfig,
}

impl ExportProcessor {
    pub fn new(
        jobs: Arc<ExportJobService>,
        facilities: Arc<FacilityService>,
        user_reports: Arc<UserReportService>,
        config: ExportConfig,
    ) -> Self {
        Self {
            jobs,
            facilities,
            user_reports,
            config,
        }
    }

    /// Run the processor in a background loop
    pub async fn run(&self) {
        tracing::info!(
            "Starting export processor (every {:?}, batch {}, max retries {}, stale after {:?})",
            self.config.poll_interval,
            self.config.batch_size,
            self.config.max_retries,
            self.config.stale_after
        );

        let mut interval = interval(self.config.poll_interval);

        loop {
            interval.tick().await;

            if let Err(e) = self.process_batch().await {
                tracing::error!("Error processing export batch: {:?}", e);
            }
        }
    }

    /// Claim and render up to `batch_size` jobs, one at a time
    async fn process_batch(&self) -> Result<()> {
        self.jobs
            .fail_abandoned(self.config.max_retries, self.config.stale_after)
            .await?;

        let mut processed = 0;
        while processed < self.config.batch_size {
            let Some(job) = self
                .jobs
                .claim_next(self.config.max_retries, self.config.stale_after)
                .await?
            else {
                break;
            };

            self.process_job(&job).await;
            processed += 1;
        }

        if processed > 0 {
            tracing::info!("Processed {} export jobs", processed);
        }

        Ok(())
    }

    /// Render one claimed job and record the outcome.
    ///
    /// A failed status write is logged only; the job stays `processing` and is
    /// reclaimed once it goes stale.
    async fn process_job(&self, job: &ExportJob) {
        let outcome = match self.render(job).await {
            Ok(rows) => self.jobs.mark_completed(job.id, rows).await,
            Err(e) => {
                tracing::error!("Failed to render export job {}: {:?}", job.id, e);
                self.jobs
                    .mark_failed(
                        job.id,
                        job.retry_count,
                        self.config.max_retries,
                        &e.to_string(),
                    )
                    .await
            }
        };

        if let Err(e) = outcome {
            tracing::error!("Failed to record outcome of export job {}: {:?}", job.id, e);
        }
    }

    /// Dataset of a job as a JSON array of API records
    async fn render(&self, job: &ExportJob) -> Result<Value> {
        tracing::debug!("Rendering {} export for job {}", job.kind, job.id);

        match job.kind {
            ExportKind::Facility => {
                let rows = self.facilities.list_all().await?;
                to_rows::<FacilityResponseDto, _>(rows)
            }
            ExportKind::UserReport => {
                let rows = self.user_reports.list_all().await?;
                to_rows::<UserReportResponseDto, _>(rows)
            }
        }
    }
}

/// Convert model rows to their response DTOs and serialize the lot
fn to_rows<D, M>(rows: Vec<M>) -> Result<Value>
where
    D: From<M> + Serialize,
{
    let dtos: Vec<D> = rows.into_iter().map(D::from).collect();
    serde_json::to_value(dtos)
        .map_err(|e| AppError::Internal(format!("Failed to serialize export rows: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_rows_renders_array() {
        #[derive(Serialize)]
        struct Row {
            n: i32,
        }
        impl From<i32> for Row {
            fn from(n: i32) -> Self {
                Row { n }
            }
        }

        let value = to_rows::<Row, _>(vec![1, 2, 3]).unwrap();
        assert_eq!(value, serde_json::json!([{"n": 1}, {"n": 2}, {"n": 3}]));

        let empty = to_rows::<Row, i32>(vec![]).unwrap();
        assert_eq!(empty, serde_json::json!([]));
    }
}
