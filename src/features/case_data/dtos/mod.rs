pub mod case_dto;
pub mod snapshot_dto;
pub mod stats_dto;

pub use case_dto::*;
pub use snapshot_dto::*;
pub use stats_dto::*;
