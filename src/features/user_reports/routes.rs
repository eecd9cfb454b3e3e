use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::exports::ExportJobService;
use crate::features::user_reports::handlers::{self, UserReportState};
use crate::features::user_reports::services::UserReportService;

pub fn routes(
    report_service: Arc<UserReportService>,
    export_service: Arc<ExportJobService>,
) -> Router {
    let state = UserReportState {
        report_service,
        export_service,
    };

    Router::new()
        .route(
            "/api/user-reports",
            get(handlers::list_user_reports).post(handlers::create_user_report),
        )
        .route(
            "/api/user-reports/{id}",
            get(handlers::get_user_report)
                .put(handlers::update_user_report)
                .delete(handlers::delete_user_report),
        )
        .with_state(state)
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
            Arc::new(UserReportService::new(pool.clone())),
            Arc::new(ExportJobService::new(pool)),
        )
    }

    #[tokio::test]
    async fn test_listing_requires_frontend() {
        test_server(router())
            .get("/api/user-reports")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        test_server(router())
            .get("/api/user-reports")
            .add_query_param("action_type", "generate")
            .await
            .assert_status(StatusCode::FORBIDDEN);

        test_server(with_basic_auth(router()))
            .get("/api/user-reports")
            .add_query_param("action_type", "generate")
            .await
            .assert_status(StatusCode::FORBIDDEN);

        test_server(with_basic_auth(router()))
            .delete("/api/user-reports/0190a000-0000-7000-8000-000000000001")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_unknown_data_type_rejected() {
        let server = test_server(with_frontend_auth(router()));
        let response = server
            .get("/api/user-reports")
            .add_query_param("data_type", "certain")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<serde_json::Value>();
        assert_eq!(body["success"], json!(false));
    }

    #[tokio::test]
    async fn test_anonymous_submission_is_validated() {
        let server = test_server(router());
        server
            .post("/api/user-reports")
            .json(&json!({
                "name": "Sita",
                "address": "Lalitpur",
                "contact_no": "9841000000",
                "temperature": 101.0,
                "lat": 95.0,
                "long": 85.3
            }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .post("/api/user-reports")
            .json(&json!({"name": "Sita", "address": "Lalitpur"}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
