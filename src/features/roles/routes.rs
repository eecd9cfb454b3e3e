use axum::{
    routing::{delete, get},
    Router,
};
use std::sync::Arc;

use crate::features::roles::{handlers, services::RoleService};

pub fn routes(service: Arc<RoleService>) -> Router {
    Router::new()
        .route(
            "/api/user-roles",
            get(handlers::list_user_roles).post(handlers::create_user_role),
        )
        .route("/api/user-roles/{id}", delete(handlers::delete_user_role))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::lazy_test_pool;
    use crate::shared::test_helpers::{test_server, with_basic_auth, with_frontend_auth};
    use axum::http::StatusCode;

    fn router() -> Router {
        routes(Arc::new(RoleService::new(lazy_test_pool())))
    }

    #[tokio::test]
    async fn test_list_requires_token() {
        let server = test_server(router());
        let response = server.get("/api/user-roles").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_requires_frontend_group() {
        let server = test_server(with_basic_auth(router()));
        let response = server
            .post("/api/user-roles")
            .json(&serde_json::json!({
                "user_id": "0190a000-0000-7000-8000-000000000001",
                "group": "FrontEnd"
            }))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_group() {
        let server = test_server(with_frontend_auth(router()));
        let response = server
            .post("/api/user-roles")
            .json(&serde_json::json!({
                "user_id": "0190a000-0000-7000-8000-000000000001",
                "group": ""
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
