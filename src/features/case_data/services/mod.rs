mod case_service;
mod snapshot_service;

pub use case_service::CaseService;
pub use snapshot_service::SnapshotService;
