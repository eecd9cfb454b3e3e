//! Local accounts and bearer-token authentication.
//!
//! Passwords are stored as argon2 hashes. Tokens are HS256 JWTs issued by
//! `TokenService`; `auth_middleware` validates them and loads the caller's
//! group roles on every request.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/auth/token` | Exchange username/password for a token |
//! | POST | `/api/auth/register` | Create an account |
//! | GET | `/api/auth/me` | Current user (authenticated) |

pub mod dtos;
pub mod guards;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod services;

pub use services::{AuthService, TokenService};
