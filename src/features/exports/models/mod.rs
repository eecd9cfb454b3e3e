mod export_job;

pub use export_job::{ExportJob, ExportJobStatus, ExportKind};
