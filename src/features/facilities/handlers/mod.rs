pub mod category_handler;
pub mod facility_handler;

pub use category_handler::*;
pub use facility_handler::*;
