use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::exports::ExportJobService;
use crate::features::facilities::handlers::{self, FacilityState};
use crate::features::facilities::services::{CategoryService, FacilityService};

/// Create routes for categories, types and facilities
pub fn routes(
    category_service: Arc<CategoryService>,
    facility_service: Arc<FacilityService>,
    export_service: Arc<ExportJobService>,
) -> Router {
    let catalogue = Router::new()
        .route(
            "/api/health-categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/api/health-categories/{id}",
            get(handlers::get_category)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
        )
        .route(
            "/api/health-types",
            get(handlers::list_types).post(handlers::create_type),
        )
        .route(
            "/api/health-types/{id}",
            get(handlers::get_type)
                .put(handlers::update_type)
                .delete(handlers::delete_type),
        )
        .with_state(category_service);

    let state = FacilityState {
        facility_service,
        export_service,
    };

    let facilities = Router::new()
        .route(
            "/api/health-facilities",
            get(handlers::list_facilities).post(handlers::create_facility),
        )
        .route(
            "/api/health-facilities/{id}",
            get(handlers::get_facility)
                .put(handlers::update_facility)
                .delete(handlers::delete_facility),
        )
        .with_state(state);

    catalogue.merge(facilities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::lazy_test_pool;
    use crate::shared::test_helpers::{test_server, with_basic_auth};
    use axum::http::StatusCode;
    use serde_json::json;

    fn router() -> Router {
        let pool = lazy_test_pool();
        routes(
            Arc::new(CategoryService::new(pool.clone())),
            Arc::new(FacilityService::new(pool.clone())),
            Arc::new(ExportJobService::new(pool)),
        )
    }

    #[tokio::test]
    async fn test_anonymous_cannot_write() {
        let server = test_server(router());

        server
            .post("/api/health-facilities")
            .json(&json!({"name": "Bir Hospital", "type_id": "0190a000-0000-7000-8000-000000000001"}))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        server
            .post("/api/health-categories")
            .json(&json!({"name": "Hospital"}))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        server
            .delete("/api/health-types/0190a000-0000-7000-8000-000000000001")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_export_generation_needs_frontend_group() {
        let anonymous = test_server(router());
        anonymous
            .get("/api/health-facilities")
            .add_query_param("action_type", "generate")
            .await
            .assert_status(StatusCode::FORBIDDEN);

        let plain_user = test_server(with_basic_auth(router()));
        plain_user
            .get("/api/health-facilities")
            .add_query_param("action_type", "generate")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_negative_counter_rejected() {
        let server = test_server(with_basic_auth(router()));
        server
            .post("/api/health-facilities")
            .json(&json!({
                "name": "Bir Hospital",
                "type_id": "0190a000-0000-7000-8000-000000000001",
                "num_of_bed": -4
            }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_page_size_rejected() {
        let server = test_server(router());
        server
            .get("/api/health-facilities")
            .add_query_param("page_size", "many")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
