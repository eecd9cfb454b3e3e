// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for facility listings
pub const DEFAULT_FACILITY_PAGE_SIZE: i64 = 100;

/// Default page size for user report listings
pub const DEFAULT_REPORT_PAGE_SIZE: i64 = 1000;

/// Default page size for tracked location listings
pub const DEFAULT_LOCATION_PAGE_SIZE: i64 = 100;

/// Maximum page size allowed on any paginated endpoint
pub const MAX_PAGE_SIZE: i64 = 1000;

/// Upper bound on name-search results for region listings
pub const MAX_SEARCH_RESULTS: i64 = 100;

// =============================================================================
// PROXIMITY SEARCH
// =============================================================================

/// Default radius for the nearest-facility lookup
pub const NEAR_FACILITY_DEFAULT_KM: f64 = 500.0;

/// Number of facilities returned by the nearest-facility lookup
pub const NEAR_FACILITY_LIMIT: i64 = 10;

/// Number of reports returned by the nearest-report lookup
pub const NEAR_REPORT_LIMIT: i64 = 25;

/// Largest accepted search radius (roughly half the Earth's circumference)
pub const MAX_SEARCH_RADIUS_KM: f64 = 20_000.0;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Operator group - manages reports, snapshots and exports
pub const ROLE_FRONTEND: &str = "FrontEnd";

