pub mod auth;
pub mod case_data;
pub mod devices;
pub mod exports;
pub mod facilities;
pub mod geojson;
pub mod proximity;
pub mod regions;
pub mod roles;
pub mod tracking;
pub mod user_reports;
