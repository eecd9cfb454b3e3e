//! Group membership for users.
//!
//! A `UserRole` ties a user to a group (`FrontEnd`, `ProvinceAdmin`,
//! `FacilityAdmin`), optionally scoped to a province or facility. Group names
//! are what `AuthenticatedUser::roles` carries.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/user-roles` | List role assignments (FrontEnd) |
//! | POST | `/api/user-roles` | Assign a group to a user (FrontEnd) |
//! | DELETE | `/api/user-roles/{id}` | Remove an assignment (FrontEnd) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::RoleService;
