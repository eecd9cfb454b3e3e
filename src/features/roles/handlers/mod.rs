pub mod user_role_handler;

pub use user_role_handler::*;
