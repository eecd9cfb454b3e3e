mod user_location;

pub use user_location::{UserLocation, LOCATION_COLUMNS};
