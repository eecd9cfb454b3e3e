//! Location tracking for signed-in users.
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/track-me` | login | Record the caller's position |
//! | GET | `/api/track-me` | FrontEnd | List positions (`user_id`, pagination) |
//! | GET/PUT/DELETE | `/api/track-me/{id}` | FrontEnd | Position by id |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::LocationService;
