//! Medical facilities with their category/type taxonomy.
//!
//! Facilities carry bed, ICU and ventilator capacity plus testing counters and
//! an optional WGS84 point (see `shared::geo::Placement` for how `location`,
//! `lat` and `long` are reconciled on write).
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET/POST | `/api/health-categories` | List / create categories |
//! | GET/PUT/DELETE | `/api/health-categories/{id}` | Category by id |
//! | GET/POST | `/api/health-types` | List (`category_id` filter) / create types |
//! | GET/PUT/DELETE | `/api/health-types/{id}` | Type by id |
//! | GET/POST | `/api/health-facilities` | Paginated list with filters / create |
//! | GET/PUT/DELETE | `/api/health-facilities/{id}` | Facility by id |
//!
//! Reads are public, writes need a token. `GET /api/health-facilities?action_type=generate`
//! queues an export instead of listing (FrontEnd only).

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{CategoryService, FacilityService};
