use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::case_data::handlers;
use crate::features::case_data::services::{CaseService, SnapshotService};

/// Create routes for snapshots, headline stats, cases and age groups
pub fn routes(snapshot_service: Arc<SnapshotService>, case_service: Arc<CaseService>) -> Router {
    let snapshots = Router::new()
        .route("/api/stats", get(handlers::get_stats))
        .route(
            "/api/case-snapshots",
            get(handlers::list_snapshots).post(handlers::create_snapshot),
        )
        .route(
            "/api/case-snapshots/{id}",
            get(handlers::get_snapshot)
                .put(handlers::update_snapshot)
                .delete(handlers::delete_snapshot),
        )
        .with_state(snapshot_service);

    let cases = Router::new()
        .route(
            "/api/cases",
            get(handlers::list_cases).post(handlers::create_case),
        )
        .route(
            "/api/cases/{id}",
            get(handlers::get_case)
                .put(handlers::update_case)
                .delete(handlers::delete_case),
        )
        .route(
            "/api/age-groups",
            get(handlers::list_age_groups).post(handlers::create_age_group),
        )
        .route(
            "/api/age-groups/{id}",
            get(handlers::get_age_group)
                .put(handlers::update_age_group)
                .delete(handlers::delete_age_group),
        )
        .with_state(case_service);

    snapshots.merge(cases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::lazy_test_pool;
    use crate::shared::test_helpers::{test_server, with_basic_auth, with_frontend_auth};
    use axum::http::StatusCode;
    use serde_json::json;

    fn router() -> Router {
        let pool = lazy_test_pool();
        routes(
            Arc::new(SnapshotService::new(pool.clone(), "1115".to_string())),
            Arc::new(CaseService::new(pool)),
        )
    }

    #[tokio::test]
    async fn test_stats_rejects_malformed_region() {
        let server = test_server(router());
        server
            .get("/api/stats")
            .add_query_param("district", "kathmandu")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_snapshot_writes_need_frontend_group() {
        let body = json!({
            "level": "province",
            "region_id": "0190a000-0000-7000-8000-000000000001",
            "total_tested": 120
        });

        test_server(router())
            .post("/api/case-snapshots")
            .json(&body)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        test_server(with_basic_auth(router()))
            .post("/api/case-snapshots")
            .json(&body)
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_negative_snapshot_counter_rejected() {
        let server = test_server(with_frontend_auth(router()));
        server
            .post("/api/case-snapshots")
            .json(&json!({
                "level": "district",
                "region_id": "0190a000-0000-7000-8000-000000000001",
                "total_death": -1
            }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_case_writes_need_login() {
        let server = test_server(router());
        server
            .post("/api/cases")
            .json(&json!({"age": 40, "gender": "Male"}))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        server
            .delete("/api/age-groups/0190a000-0000-7000-8000-000000000001")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_case_age_out_of_range_rejected() {
        let server = test_server(with_basic_auth(router()));
        server
            .post("/api/cases")
            .json(&json!({"age": 200, "gender": "Female"}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
