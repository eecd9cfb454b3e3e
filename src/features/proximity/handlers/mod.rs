pub mod proximity_handler;

pub use proximity_handler::*;
