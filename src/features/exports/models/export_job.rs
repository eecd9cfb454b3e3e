use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Dataset an export job renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "export_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ExportKind {
    UserReport,
    Facility,
}

impl std::fmt::Display for ExportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportKind::UserReport => write!(f, "user_report"),
            ExportKind::Facility => write!(f, "facility"),
        }
    }
}

/// Export job status enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "export_job_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ExportJobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl std::fmt::Display for ExportJobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportJobStatus::Pending => write!(f, "pending"),
            ExportJobStatus::Processing => write!(f, "processing"),
            ExportJobStatus::Completed => write!(f, "completed"),
            ExportJobStatus::Failed => write!(f, "failed"),
        }
    }
}

impl ExportJobStatus {
    /// Status and retry count after a failed attempt
    pub fn after_failure(retry_count: i32, max_retries: i32) -> (Self, i32) {
        let new_retry_count = retry_count + 1;
        if new_retry_count >= max_retries {
            (ExportJobStatus::Failed, new_retry_count)
        } else {
            (ExportJobStatus::Pending, new_retry_count)
        }
    }
}

/// Export job row without its payload
#[derive(Debug, Clone, FromRow)]
pub struct ExportJob {
    pub id: Uuid,
    pub kind: ExportKind,
    pub status: ExportJobStatus,
    pub requested_by: Option<Uuid>,
    pub retry_count: i32,
    pub error_message: Option<String>,
    pub row_count: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_retries_until_limit() {
        assert_eq!(
            ExportJobStatus::after_failure(0, 3),
            (ExportJobStatus::Pending, 1)
        );
        assert_eq!(
            ExportJobStatus::after_failure(1, 3),
            (ExportJobStatus::Pending, 2)
        );
        assert_eq!(
            ExportJobStatus::after_failure(2, 3),
            (ExportJobStatus::Failed, 3)
        );
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(ExportKind::UserReport).unwrap(),
            "user_report"
        );
        assert_eq!(ExportKind::Facility.to_string(), "facility");
    }
}
