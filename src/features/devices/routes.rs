use axum::{
    routing::{delete, get},
    Router,
};
use std::sync::Arc;

use crate::features::devices::handlers;
use crate::features::devices::services::DeviceService;

pub fn routes(device_service: Arc<DeviceService>) -> Router {
    Router::new()
        .route(
            "/api/devices",
            get(handlers::list_devices).post(handlers::register_device),
        )
        .route("/api/devices/{id}", delete(handlers::delete_device))
        .route(
            "/api/device-messages",
            get(handlers::list_messages).post(handlers::create_message),
        )
        .route(
            "/api/device-messages/{id}",
            get(handlers::get_message)
                .put(handlers::update_message)
                .delete(handlers::delete_message),
        )
        .with_state(device_service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::lazy_test_pool;
    use crate::shared::test_helpers::{test_server, with_basic_auth, with_frontend_auth};
    use axum::http::StatusCode;
    use serde_json::json;

    fn router() -> Router {
        routes(Arc::new(DeviceService::new(lazy_test_pool())))
    }

    #[tokio::test]
    async fn test_register_rejects_empty_device_id() {
        test_server(router())
            .post("/api/devices")
            .json(&json!({"device_id": ""}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_device_listing_requires_frontend() {
        test_server(router())
            .get("/api/devices")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        test_server(with_basic_auth(router()))
            .delete("/api/devices/0190a000-0000-7000-8000-000000000001")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_message_writes_require_frontend() {
        test_server(with_basic_auth(router()))
            .post("/api/device-messages")
            .json(&json!({"type": "message", "message": "Wash your hands"}))
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_url_message_without_url_rejected() {
        test_server(with_frontend_auth(router()))
            .post("/api/device-messages")
            .json(&json!({"type": "url", "title": "Guidelines"}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
