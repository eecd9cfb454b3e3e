mod geojson_service;

pub use geojson_service::GeoJsonService;
