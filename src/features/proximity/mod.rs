//! Radius searches backed by PostGIS `ST_DWithin`.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/near-facility?lat=&long=[&km=500][&limit=10]` | Nearest facilities |
//! | GET | `/api/near-report?lat=&long=&result=&km=` | 25 nearest reports with a label |
//!
//! Both require the FrontEnd group.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ProximityService;
