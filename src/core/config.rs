use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub swagger: SwaggerConfig,
    pub exports: ExportConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    /// National hotline number reported by the stats endpoint
    pub hotline: String,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC secret used to sign bearer tokens
    pub jwt_secret: String,
    pub issuer: String,
    pub token_ttl: Duration,
    /// Operator account created on start-up when missing
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("token_ttl", &self.token_ttl)
            .field("bootstrap_admin", &self.bootstrap_admin)
            .finish()
    }
}

#[derive(Clone)]
pub struct BootstrapAdmin {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for BootstrapAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapAdmin")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// Background export worker settings
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub poll_interval: Duration,
    pub max_retries: i32,
    pub batch_size: i64,
    /// How long a job may sit in `processing` before another worker reclaims it
    pub stale_after: Duration,
}

/// Read an environment variable and parse it, falling back to `default` when unset.
fn parse_env_or<T: FromStr>(key: &str, default: T) -> Result<T, String> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| format!("{} must be a valid number", key)),
        Err(_) => Ok(default),
    }
}

/// Split a comma-separated origin list, dropping blanks
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            exports: ExportConfig::from_env()?,
        })
    }
}

impl AppConfig {
    const DEFAULT_HOTLINE: &'static str = "1115";

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        let cors_allowed_origins =
            parse_origins(&env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()));

        let hotline = env::var("HOTLINE").unwrap_or_else(|_| Self::DEFAULT_HOTLINE.to_string());

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            hotline,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        Ok(Self {
            url,
            max_connections: parse_env_or("DB_MAX_CONNECTIONS", Self::DEFAULT_MAX_CONNECTIONS)?,
            min_connections: parse_env_or("DB_MIN_CONNECTIONS", Self::DEFAULT_MIN_CONNECTIONS)?,
            acquire_timeout_secs: parse_env_or(
                "DB_ACQUIRE_TIMEOUT_SECS",
                Self::DEFAULT_ACQUIRE_TIMEOUT_SECS,
            )?,
            idle_timeout_secs: parse_env_or(
                "DB_IDLE_TIMEOUT_SECS",
                Self::DEFAULT_IDLE_TIMEOUT_SECS,
            )?,
            max_lifetime_secs: parse_env_or(
                "DB_MAX_LIFETIME_SECS",
                Self::DEFAULT_MAX_LIFETIME_SECS,
            )?,
        })
    }
}

impl AuthConfig {
    const DEFAULT_TOKEN_TTL_SECS: u64 = 7 * 24 * 3600; // 1 week
    const MIN_SECRET_LEN: usize = 32;

    pub fn from_env() -> Result<Self, String> {
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| "JWT_SECRET environment variable is required".to_string())?;

        if jwt_secret.len() < Self::MIN_SECRET_LEN {
            return Err(format!(
                "JWT_SECRET must be at least {} bytes",
                Self::MIN_SECRET_LEN
            ));
        }

        let issuer = env::var("JWT_ISSUER").unwrap_or_else(|_| "coronamap".to_string());
        let token_ttl_secs = parse_env_or("JWT_EXPIRY_SECS", Self::DEFAULT_TOKEN_TTL_SECS)?;

        let bootstrap_admin = match (
            env::var("BOOTSTRAP_ADMIN_USERNAME").ok().filter(|s| !s.is_empty()),
            env::var("BOOTSTRAP_ADMIN_PASSWORD").ok().filter(|s| !s.is_empty()),
        ) {
            (Some(username), Some(password)) => Some(BootstrapAdmin { username, password }),
            _ => None,
        };

        Ok(Self {
            jwt_secret,
            issuer,
            token_ttl: Duration::from_secs(token_ttl_secs),
            bootstrap_admin,
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Coronamap API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "COVID-19 facility and case data API".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl ExportConfig {
    const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;
    const DEFAULT_MAX_RETRIES: i32 = 3;
    const DEFAULT_BATCH_SIZE: i64 = 5;
    const DEFAULT_STALE_AFTER_SECS: u64 = 600;

    pub fn from_env() -> Result<Self, String> {
        Self::new(
            parse_env_or("EXPORT_POLL_INTERVAL_SECS", Self::DEFAULT_POLL_INTERVAL_SECS)?,
            parse_env_or("EXPORT_MAX_RETRIES", Self::DEFAULT_MAX_RETRIES)?,
            parse_env_or("EXPORT_STALE_AFTER_SECS", Self::DEFAULT_STALE_AFTER_SECS)?,
        )
    }

    pub fn new(
        poll_interval_secs: u64,
        max_retries: i32,
        stale_after_secs: u64,
    ) -> Result<Self, String> {
        if max_retries < 1 {
            return Err("EXPORT_MAX_RETRIES must be at least 1".to_string());
        }
        if stale_after_secs == 0 {
            return Err("EXPORT_STALE_AFTER_SECS must be at least 1".to_string());
        }

        Ok(Self {
            poll_interval: Duration::from_secs(poll_interval_secs.max(1)),
            max_retries,
            batch_size: Self::DEFAULT_BATCH_SIZE,
            stale_after: Duration::from_secs(stale_after_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_trims_and_drops_blanks() {
        let origins = parse_origins(" http://a.test , ,http://b.test,");
        assert_eq!(origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_parse_origins_wildcard() {
        assert_eq!(parse_origins("*"), vec!["*"]);
    }

    #[test]
    fn test_swagger_credentials_require_both_parts() {
        let mut swagger = SwaggerConfig {
            username: Some("ops".to_string()),
            password: None,
            title: "t".to_string(),
            version: "v".to_string(),
            description: "d".to_string(),
        };
        assert!(swagger.credentials().is_none());

        swagger.password = Some("secret".to_string());
        assert_eq!(swagger.credentials().as_deref(), Some("ops:secret"));
    }

    #[test]
    fn test_parse_env_or_uses_default_when_unset() {
        let value: u32 = parse_env_or("CORONAMAP_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_auth_config_debug_redacts_secret() {
        let config = AuthConfig {
            jwt_secret: "super-secret-value-that-is-long-enough".to_string(),
            issuer: "coronamap".to_string(),
            token_ttl: Duration::from_secs(60),
            bootstrap_admin: Some(BootstrapAdmin {
                username: "ops".to_string(),
                password: "hunter22".to_string(),
            }),
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(!rendered.contains("hunter22"));
        assert!(rendered.contains("ops"));
    }

    #[test]
    fn test_export_config_rejects_zero_retries() {
        let err = ExportConfig::new(10, 0, 600).unwrap_err();
        assert!(err.contains("EXPORT_MAX_RETRIES"));
        assert!(ExportConfig::new(10, -2, 600).is_err());
    }

    #[test]
    fn test_export_config_accepts_defaults() {
        let config = ExportConfig::new(0, 3, 600).unwrap();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert_eq!(config.stale_after, Duration::from_secs(600));
        assert!(ExportConfig::new(10, 1, 0).is_err());
    }
}
