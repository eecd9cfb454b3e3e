mod export_job_service;

pub use export_job_service::ExportJobService;
