//! Off-request dataset exports.
//!
//! `?action_type=generate` on the facility and user-report listings enqueues an
//! `export_jobs` row; `ExportProcessor` renders it in the background and the
//! operator downloads the stored JSON once the job is completed.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/exports` | Caller's export jobs (FrontEnd) |
//! | GET | `/api/exports/{id}` | Job status (FrontEnd) |
//! | GET | `/api/exports/{id}/download` | Rendered rows of a completed job (FrontEnd) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod workers;

pub use services::ExportJobService;
pub use workers::ExportProcessor;
