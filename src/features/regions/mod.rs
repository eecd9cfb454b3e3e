//! Nepal's administrative hierarchy: Province → District → Municipality.
//!
//! Districts and municipalities reference their parents; deleting a parent
//! removes its children.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/provinces` | List provinces |
//! | POST | `/api/provinces` | Create province (authenticated) |
//! | GET/PUT/DELETE | `/api/provinces/{id}` | Province by id |
//! | GET | `/api/districts` | List districts (`province_id` filter) |
//! | POST | `/api/districts` | Create district (authenticated) |
//! | GET/PUT/DELETE | `/api/districts/{id}` | District by id |
//! | GET | `/api/municipalities` | List municipalities (`province_id`, `district_id` filters) |
//! | POST | `/api/municipalities` | Create municipality (authenticated) |
//! | GET/PUT/DELETE | `/api/municipalities/{id}` | Municipality by id |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::RegionService;
