use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::proximity::{handlers, services::ProximityService};

pub fn routes(service: Arc<ProximityService>) -> Router {
    Router::new()
        .route("/api/near-facility", get(handlers::near_facility))
        .route("/api/near-report", get(handlers::near_report))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::lazy_test_pool;
    use crate::shared::test_helpers::{test_server, with_basic_auth, with_frontend_auth};
    use axum::http::StatusCode;

    fn operator_server() -> axum_test::TestServer {
        test_server(with_frontend_auth(routes(Arc::new(ProximityService::new(
            lazy_test_pool(),
        )))))
    }

    #[tokio::test]
    async fn test_requires_frontend() {
        let router = routes(Arc::new(ProximityService::new(lazy_test_pool())));
        test_server(with_basic_auth(router))
            .get("/api/near-facility")
            .add_query_param("lat", "27.7")
            .add_query_param("long", "85.3")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_missing_coordinates() {
        operator_server()
            .get("/api/near-facility")
            .add_query_param("lat", "27.7")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_out_of_range_values() {
        let server = operator_server();

        server
            .get("/api/near-facility")
            .add_query_param("lat", "91")
            .add_query_param("long", "85.3")
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .get("/api/near-facility")
            .add_query_param("lat", "27.7")
            .add_query_param("long", "85.3")
            .add_query_param("km", "0")
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .get("/api/near-report")
            .add_query_param("lat", "27.7")
            .add_query_param("long", "85.3")
            .add_query_param("result", "morelikely")
            .add_query_param("km", "25000")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_result_label() {
        operator_server()
            .get("/api/near-report")
            .add_query_param("lat", "27.7")
            .add_query_param("long", "85.3")
            .add_query_param("result", "certain")
            .add_query_param("km", "5")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
