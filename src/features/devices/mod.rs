//! Push-device registry and in-app messages.
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/devices` | public | Register a device (idempotent), replies `{}` |
//! | GET | `/api/devices` | FrontEnd | List devices |
//! | DELETE | `/api/devices/{id}` | FrontEnd | Remove a device |
//! | GET | `/api/device-messages[/{id}]` | public | Messages |
//! | POST/PUT/DELETE | `/api/device-messages[/{id}]` | FrontEnd | Manage messages |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::DeviceService;
