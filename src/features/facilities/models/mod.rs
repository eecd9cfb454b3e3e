mod facility_category;
mod facility_type;
mod medical_facility;

pub use facility_category::FacilityCategory;
pub use facility_type::FacilityType;
pub use medical_facility::{FacilityOwnership, MedicalFacility, FACILITY_COLUMNS};
