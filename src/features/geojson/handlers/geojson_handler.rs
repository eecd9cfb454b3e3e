use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::auth::guards::RequireFrontend;
use crate::features::geojson::services::GeoJsonService;
use crate::shared::geo::FeatureCollection;

/// Facility map layer
///
/// Returned as a bare GeoJSON document so map clients can load it directly.
#[utoipa::path(
    get,
    path = "/api/geojson/facility",
    responses(
        (status = 200, description = "FeatureCollection of facilities", body = FeatureCollection),
        (status = 403, description = "FrontEnd group required")
    ),
    tag = "geojson",
    security(("bearer_auth" = []))
)]
pub async fn facility_geojson(
    _guard: RequireFrontend,
    State(service): State<Arc<GeoJsonService>>,
) -> Result<Json<FeatureCollection>> {
    Ok(Json(service.facility_layer().await?))
}

/// Map layer of reports triaged `morelikely`
#[utoipa::path(
    get,
    path = "/api/geojson/user-report",
    responses(
        (status = 200, description = "FeatureCollection of reports", body = FeatureCollection),
        (status = 403, description = "FrontEnd group required")
    ),
    tag = "geojson",
    security(("bearer_auth" = []))
)]
pub async fn user_report_geojson(
    _guard: RequireFrontend,
    State(service): State<Arc<GeoJsonService>>,
) -> Result<Json<FeatureCollection>> {
    Ok(Json(service.user_report_layer().await?))
}
