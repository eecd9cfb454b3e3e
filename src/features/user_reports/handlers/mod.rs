pub mod user_report_handler;

pub use user_report_handler::*;
