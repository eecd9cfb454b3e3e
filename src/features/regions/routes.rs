use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::regions::handlers;
use crate::features::regions::services::RegionService;

/// Create routes for the regions feature
pub fn routes(service: Arc<RegionService>) -> Router {
    Router::new()
        // Province routes
        .route(
            "/api/provinces",
            get(handlers::list_provinces).post(handlers::create_province),
        )
        .route(
            "/api/provinces/{id}",
            get(handlers::get_province)
                .put(handlers::update_province)
                .delete(handlers::delete_province),
        )
        // District routes
        .route(
            "/api/districts",
            get(handlers::list_districts).post(handlers::create_district),
        )
        .route(
            "/api/districts/{id}",
            get(handlers::get_district)
                .put(handlers::update_district)
                .delete(handlers::delete_district),
        )
        // Municipality routes
        .route(
            "/api/municipalities",
            get(handlers::list_municipalities).post(handlers::create_municipality),
        )
        .route(
            "/api/municipalities/{id}",
            get(handlers::get_municipality)
                .put(handlers::update_municipality)
                .delete(handlers::delete_municipality),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::lazy_test_pool;
    use crate::shared::test_helpers::{test_server, with_basic_auth};
    use axum::http::StatusCode;

    fn router() -> Router {
        routes(Arc::new(RegionService::new(lazy_test_pool())))
    }

    #[tokio::test]
    async fn test_writes_require_token() {
        let server = test_server(router());

        server
            .post("/api/provinces")
            .json(&serde_json::json!({"code": 3, "name": "Bagmati"}))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        server
            .delete("/api/districts/0190a000-0000-7000-8000-000000000001")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_province_validates_code() {
        let server = test_server(with_basic_auth(router()));
        server
            .post("/api/provinces")
            .json(&serde_json::json!({"code": 0, "name": "Nowhere"}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_filter_is_bad_request() {
        let server = test_server(router());
        server
            .get("/api/districts")
            .add_query_param("province_id", "not-a-uuid")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
