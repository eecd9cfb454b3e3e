pub mod case_handler;
pub mod snapshot_handler;

pub use case_handler::*;
pub use snapshot_handler::*;
