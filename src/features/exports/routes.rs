use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::exports::{handlers, services::ExportJobService};

pub fn routes(service: Arc<ExportJobService>) -> Router {
    Router::new()
        .route("/api/exports", get(handlers::list_exports))
        .route("/api/exports/{id}", get(handlers::get_export))
        .route("/api/exports/{id}/download", get(handlers::download_export))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::lazy_test_pool;
    use crate::shared::test_helpers::{test_server, with_basic_auth};
    use axum::http::StatusCode;

    fn router() -> Router {
        routes(Arc::new(ExportJobService::new(lazy_test_pool())))
    }

    #[tokio::test]
    async fn test_exports_require_frontend() {
        let anonymous = test_server(router());
        anonymous
            .get("/api/exports")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        let plain_user = test_server(with_basic_auth(router()));
        plain_user
            .get("/api/exports/0190a000-0000-7000-8000-000000000001/download")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }
}
