mod category_service;
mod facility_service;

pub use category_service::CategoryService;
pub use facility_service::FacilityService;
