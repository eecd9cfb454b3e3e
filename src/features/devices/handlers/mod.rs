pub mod device_handler;
pub mod message_handler;

pub use device_handler::*;
pub use message_handler::*;
