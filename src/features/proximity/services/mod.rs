mod proximity_service;

pub use proximity_service::ProximityService;
