pub mod geojson_handler;

pub use geojson_handler::*;
