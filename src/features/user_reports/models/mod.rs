mod triage;
mod user_report;

pub use triage::{TravelFlags, TriageResult};
pub use user_report::{UserReport, REPORT_COLUMNS};
