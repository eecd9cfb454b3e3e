use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::geojson::{handlers, services::GeoJsonService};

pub fn routes(service: Arc<GeoJsonService>) -> Router {
    Router::new()
        .route("/api/geojson/facility", get(handlers::facility_geojson))
        .route("/api/geojson/user-report", get(handlers::user_report_geojson))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::lazy_test_pool;
    use crate::features::facilities::FacilityService;
    use crate::features::user_reports::UserReportService;
    use crate::shared::test_helpers::{test_server, with_basic_auth};
    use axum::http::StatusCode;

    fn router() -> Router {
        let pool = lazy_test_pool();
        routes(Arc::new(GeoJsonService::new(
            Arc::new(FacilityService::new(pool.clone())),
            Arc::new(UserReportService::new(pool)),
        )))
    }

    #[tokio::test]
    async fn test_layers_require_frontend() {
        test_server(router())
            .get("/api/geojson/facility")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        test_server(with_basic_auth(router()))
            .get("/api/geojson/user-report")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }
}
