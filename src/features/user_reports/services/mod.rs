mod user_report_service;

pub use user_report_service::UserReportService;
