use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::Claims;

/// Issues and validates HS256 access tokens
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            issuer: config.issuer.clone(),
            ttl_secs: i64::try_from(config.token_ttl.as_secs()).unwrap_or(i64::MAX),
        }
    }

    /// Token lifetime in seconds
    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    pub fn issue(&self, user_id: Uuid, username: &str) -> Result<String> {
        self.issue_at(user_id, username, Utc::now().timestamp())
    }

    fn issue_at(&self, user_id: Uuid, username: &str, now: i64) -> Result<String> {
        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            iss: self.issuer.clone(),
            iat: now,
            exp: now.saturating_add(self.ttl_secs),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to sign token: {}", e);
            AppError::Internal("Failed to issue token".to_string())
        })
    }

    /// Validate signature, issuer and expiry; returns the user id and claims
    pub fn verify(&self, token: &str) -> Result<(Uuid, Claims)> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!("Rejected bearer token: {}", e);
            AppError::Unauthorized("Invalid or expired token".to_string())
        })?;

        let user_id = Uuid::parse_str(&data.claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid token subject".to_string()))?;

        Ok((user_id, data.claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(secret: &str, issuer: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            issuer: issuer.to_string(),
            token_ttl: Duration::from_secs(3600),
            bootstrap_admin: None,
        }
    }

    const SECRET: &str = "test-secret-that-is-at-least-32-bytes-long";

    #[test]
    fn test_issue_then_verify() {
        let service = TokenService::new(&config(SECRET, "coronamap"));
        let user_id = Uuid::new_v4();

        let token = service.issue(user_id, "operator").unwrap();
        let (verified_id, claims) = service.verify(&token).unwrap();

        assert_eq!(verified_id, user_id);
        assert_eq!(claims.username, "operator");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = TokenService::new(&config(SECRET, "coronamap"));
        let long_ago = Utc::now().timestamp() - 10 * 3600;

        let token = service.issue_at(Uuid::new_v4(), "operator", long_ago).unwrap();
        assert!(matches!(
            service.verify(&token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let issuer = TokenService::new(&config("another-secret-that-is-also-32-bytes-long", "coronamap"));
        let verifier = TokenService::new(&config(SECRET, "coronamap"));

        let token = issuer.issue(Uuid::new_v4(), "operator").unwrap();
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_foreign_issuer_rejected() {
        let issuer = TokenService::new(&config(SECRET, "someone-else"));
        let verifier = TokenService::new(&config(SECRET, "coronamap"));

        let token = issuer.issue(Uuid::new_v4(), "operator").unwrap();
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        let service = TokenService::new(&config(SECRET, "coronamap"));
        assert!(service.verify("not.a.jwt").is_err());
        assert!(service.verify("").is_err());
    }
}
