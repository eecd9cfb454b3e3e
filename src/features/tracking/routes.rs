use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::tracking::handlers;
use crate::features::tracking::services::LocationService;

pub fn routes(location_service: Arc<LocationService>) -> Router {
    Router::new()
        .route(
            "/api/track-me",
            get(handlers::list_locations).post(handlers::track_me),
        )
        .route(
            "/api/track-me/{id}",
            get(handlers::get_location)
                .put(handlers::update_location)
                .delete(handlers::delete_location),
        )
        .with_state(location_service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::lazy_test_pool;
    use crate::shared::test_helpers::{test_server, with_basic_auth};
    use axum::http::StatusCode;
    use serde_json::json;

    fn router() -> Router {
        routes(Arc::new(LocationService::new(lazy_test_pool())))
    }

    #[tokio::test]
    async fn test_track_me_requires_login() {
        test_server(router())
            .post("/api/track-me")
            .json(&json!({"lat": 27.7, "long": 85.3}))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_track_me_rejects_bad_coordinates() {
        let server = test_server(with_basic_auth(router()));

        server
            .post("/api/track-me")
            .json(&json!({}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .post("/api/track-me")
            .json(&json!({"lat": 127.7, "long": 85.3}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_listing_requires_frontend() {
        test_server(with_basic_auth(router()))
            .get("/api/track-me")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }
}
