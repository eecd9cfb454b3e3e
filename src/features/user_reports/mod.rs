//! Symptom self-reports with rule-based triage.
//!
//! Each submission is labelled `lesslikely`, `likely` or `morelikely` from the
//! reported temperature and the exposure flags in `travel_history`.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/user-reports` | public | Submit a report, returns `{message, result}` |
//! | GET | `/api/user-reports` | FrontEnd | List (`data_type`, pagination, `action_type=generate`) |
//! | GET/PUT/DELETE | `/api/user-reports/{id}` | FrontEnd | Report by id |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::UserReportService;
