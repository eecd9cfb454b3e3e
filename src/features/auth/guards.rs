//! Authorization guards.
//!
//! `auth_middleware` only resolves a token into an `AuthenticatedUser`; these
//! extractors decide what a handler accepts:
//!
//! - `AuthenticatedUser`: any valid token (401 otherwise)
//! - `OptionalUser`: never rejects, carries the caller when there is one
//! - `RequireFrontend`: caller must hold the FrontEnd group (401/403);
//!   `RequireFrontend::check_or_forbid` answers 403 to anonymous callers too

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

/// Guard for operator endpoints.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireFrontend(user): RequireFrontend) { ... }
/// ```
pub struct RequireFrontend(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireFrontend
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        RequireFrontend::check(parts.extensions.get::<AuthenticatedUser>()).map(RequireFrontend)
    }
}

impl RequireFrontend {
    /// Same rule as the extractor, for handlers that only sometimes need it
    pub fn check(user: Option<&AuthenticatedUser>) -> Result<AuthenticatedUser, AppError> {
        let user =
            user.ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

        if !user.is_frontend() {
            return Err(AppError::Forbidden(
                "You do not have permission to perform this action".to_string(),
            ));
        }

        Ok(user.clone())
    }

    /// Like `check`, but anonymous callers get 403 as well (export generation)
    pub fn check_or_forbid(
        user: Option<&AuthenticatedUser>,
    ) -> Result<AuthenticatedUser, AppError> {
        match user {
            Some(user) => RequireFrontend::check(Some(user)),
            None => Err(AppError::Forbidden(
                "You do not have permission to perform this action".to_string(),
            )),
        }
    }
}

/// Caller, if the request carried a valid token
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalUser(
            parts.extensions.get::<AuthenticatedUser>().cloned(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{create_basic_user, create_frontend_user};
    use axum::http::Request;

    fn parts_with(user: Option<AuthenticatedUser>) -> Parts {
        let (mut parts, _) = Request::builder()
            .uri("/")
            .body(())
            .unwrap()
            .into_parts();
        if let Some(user) = user {
            parts.extensions.insert(user);
        }
        parts
    }

    #[tokio::test]
    async fn test_require_frontend_rejects_anonymous() {
        let mut parts = parts_with(None);
        let result = RequireFrontend::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_require_frontend_rejects_plain_user() {
        let mut parts = parts_with(Some(create_basic_user()));
        let result = RequireFrontend::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_require_frontend_accepts_operator() {
        let mut parts = parts_with(Some(create_frontend_user()));
        let RequireFrontend(user) = RequireFrontend::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(user.is_frontend());
    }

    #[test]
    fn test_check_or_forbid_rejects_anonymous_with_forbidden() {
        assert!(matches!(
            RequireFrontend::check_or_forbid(None),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            RequireFrontend::check_or_forbid(Some(&create_basic_user())),
            Err(AppError::Forbidden(_))
        ));
        assert!(RequireFrontend::check_or_forbid(Some(&create_frontend_user())).is_ok());
    }

    #[test]
    fn test_optional_user_never_rejects() {
        let mut parts = parts_with(None);
        let OptionalUser(user) =
            tokio_test::block_on(OptionalUser::from_request_parts(&mut parts, &())).unwrap();
        assert!(user.is_none());

        let mut parts = parts_with(Some(create_basic_user()));
        let OptionalUser(user) =
            tokio_test::block_on(OptionalUser::from_request_parts(&mut parts, &())).unwrap();
        assert_eq!(user.map(|u| u.username), Some("reporter".to_string()));
    }
}
