use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::exports::models::{ExportJob, ExportJobStatus, ExportKind};

/// `action_type` accepted by listings that can be exported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Queue an export of the whole dataset
    Generate,
}

/// Reply to an `action_type=generate` request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExportRequestedDto {
    #[schema(example = "File being updated")]
    pub message: String,
    pub job_id: Uuid,
}

impl ExportRequestedDto {
    pub fn for_job(job: &ExportJob) -> Self {
        Self {
            message: "File being updated".to_string(),
            job_id: job.id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExportJobResponseDto {
    pub id: Uuid,
    pub kind: ExportKind,
    pub status: ExportJobStatus,
    pub retry_count: i32,
    pub error_message: Option<String>,
    pub row_count: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<ExportJob> for ExportJobResponseDto {
    fn from(job: ExportJob) -> Self {
        Self {
            id: job.id,
            kind: job.kind,
            status: job.status,
            retry_count: job.retry_count,
            error_message: job.error_message,
            row_count: job.row_count,
            created_at: job.created_at,
            started_at: job.started_at,
            completed_at: job.completed_at,
        }
    }
}

/// Rendered export
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExportDownloadDto {
    pub id: Uuid,
    pub kind: ExportKind,
    pub completed_at: Option<DateTime<Utc>>,
    #[schema(value_type = Vec<Object>)]
    pub rows: serde_json::Value,
}
