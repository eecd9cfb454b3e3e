#[cfg(test)]
use crate::features::auth::model::AuthenticatedUser;

#[cfg(test)]
use crate::shared::constants::ROLE_FRONTEND;

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
use uuid::Uuid;

#[cfg(test)]
pub fn create_frontend_user() -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_0001),
        username: "operator".to_string(),
        roles: vec![ROLE_FRONTEND.to_string()],
    }
}

#[cfg(test)]
pub fn create_basic_user() -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_0002),
        username: "reporter".to_string(),
        roles: vec![],
    }
}

#[cfg(test)]
async fn inject_frontend_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_frontend_user());
    next.run(request).await
}

#[cfg(test)]
async fn inject_basic_user_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_basic_user());
    next.run(request).await
}

/// Every request runs as a FrontEnd operator
#[cfg(test)]
pub fn with_frontend_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_frontend_middleware))
}

/// Every request runs as a user without group roles
#[cfg(test)]
pub fn with_basic_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_basic_user_middleware))
}

#[cfg(test)]
pub fn test_server(router: Router) -> axum_test::TestServer {
    axum_test::TestServer::new(router).expect("test server")
}
