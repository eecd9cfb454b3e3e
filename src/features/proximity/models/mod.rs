mod nearby;

pub use nearby::{NearbyFacility, NearbyReport};
