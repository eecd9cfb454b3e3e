pub mod category_dto;
pub mod facility_dto;

pub use category_dto::*;
pub use facility_dto::*;
