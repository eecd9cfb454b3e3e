//! GeoJSON map layers (FrontEnd only).
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/geojson/facility` | Facilities with a location |
//! | GET | `/api/geojson/user-report` | `morelikely` reports with a location |

pub mod handlers;
pub mod routes;
pub mod services;

pub use services::GeoJsonService;
