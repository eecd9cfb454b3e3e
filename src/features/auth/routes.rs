use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/auth/register", post(handlers::register))
        .route("/api/auth/token", post(handlers::obtain_token))
        .route("/api/auth/me", get(handlers::get_me))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AuthConfig;
    use crate::core::database::lazy_test_pool;
    use crate::core::middleware::auth_middleware;
    use crate::features::auth::TokenService;
    use crate::features::roles::RoleService;
    use crate::shared::test_helpers::test_server;
    use axum::http::StatusCode;
    use std::time::Duration;

    fn auth_service() -> Arc<AuthService> {
        let pool = lazy_test_pool();
        let config = AuthConfig {
            jwt_secret: "router-test-secret-with-at-least-32-bytes".to_string(),
            issuer: "coronamap".to_string(),
            token_ttl: Duration::from_secs(60),
            bootstrap_admin: None,
        };
        Arc::new(AuthService::new(
            pool.clone(),
            TokenService::new(&config),
            Arc::new(RoleService::new(pool)),
        ))
    }

    fn app() -> Router {
        let service = auth_service();
        routes(service.clone()).layer(axum::middleware::from_fn_with_state(
            service,
            auth_middleware,
        ))
    }

    #[tokio::test]
    async fn test_me_without_token_is_unauthorized() {
        let server = test_server(app());
        server
            .get("/api/auth/me")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_token_is_rejected_by_middleware() {
        let server = test_server(app());
        let response = server
            .get("/api/auth/me")
            .authorization_bearer("definitely-not-a-jwt")
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_non_bearer_scheme_is_rejected() {
        let server = test_server(app());
        server
            .post("/api/auth/token")
            .authorization("Basic b3BzOnNlY3JldA==")
            .json(&serde_json::json!({"username": "ops", "password": "secret"}))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_register_validates_before_touching_database() {
        let server = test_server(app());
        server
            .post("/api/auth/register")
            .json(&serde_json::json!({"username": "bad name", "password": "long-enough"}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_token_requires_fields() {
        let server = test_server(app());
        server
            .post("/api/auth/token")
            .json(&serde_json::json!({"username": "", "password": ""}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .post("/api/auth/token")
            .json(&serde_json::json!({"username": "ops"}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
