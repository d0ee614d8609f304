use std::path::PathBuf;

use crate::auth::JwtConfig;
use crate::core::{Result, ServerError};

/// Server configuration
///
/// # Environment
///
/// | Variable | Default | Notes |
/// |----------|---------|-------|
/// | WORK_DIR | ./data | database and logs live here |
/// | HTTP_PORT | 5000 | |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | CORS_ORIGIN | http://localhost:3000 | allowed browser origin |
/// | REQUEST_BODY_LIMIT | 1048576 | bytes |
/// | LOG_LEVEL | info | used when RUST_LOG is unset |
/// | LOG_JSON | false | JSON log lines |
/// | LOG_DIR | (unset) | daily rolling log files |
/// | JWT_SECRET | (generated in development) | at least 32 chars |
/// | JWT_EXPIRATION_MINUTES | 1440 | |
/// | JWT_ISSUER | dine-server | |
/// | JWT_AUDIENCE | dine-admin | |
///
/// ```ignore
/// WORK_DIR=/srv/dine HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    pub cors_origin: String,
    pub request_body_limit: usize,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    pub jwt: JwtConfig,
}

impl Config {
    /// Load configuration from the environment
    ///
    /// Fails only on values that cannot be defaulted, such as a missing or
    /// short `JWT_SECRET` in production.
    pub fn from_env() -> Result<Self> {
        let environment = env_or("ENVIRONMENT", "development");
        let production = environment == "production";
        let jwt = JwtConfig::from_env(production)?;

        let http_port = env_parse("HTTP_PORT", 5000)?;
        let request_body_limit = env_parse("REQUEST_BODY_LIMIT", 1024 * 1024)?;

        Ok(Self {
            work_dir: env_or("WORK_DIR", "./data"),
            http_port,
            environment,
            cors_origin: env_or("CORS_ORIGIN", "http://localhost:3000"),
            request_body_limit,
            log_level: env_or("LOG_LEVEL", "info"),
            log_json: std::env::var("LOG_JSON")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|v| !v.trim().is_empty()),
            jwt,
        })
    }

    /// Isolated configuration for tests: temp work dir, fixed JWT secret
    pub fn for_tests(work_dir: impl Into<String>) -> Self {
        Self {
            work_dir: work_dir.into(),
            http_port: 0,
            environment: "test".to_string(),
            cors_origin: "http://localhost:3000".to_string(),
            request_body_limit: 1024 * 1024,
            log_level: "debug".to_string(),
            log_json: false,
            log_dir: None,
            jwt: JwtConfig {
                secret: "test-secret-key-that-is-long-enough-for-hs256".to_string(),
                expiration_minutes: 60,
                issuer: "dine-server".to_string(),
                audience: "dine-admin".to_string(),
            },
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// WORK_DIR/database
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// Create the directories the server writes to
    pub fn ensure_work_dir_structure(&self) -> Result<()> {
        std::fs::create_dir_all(self.database_dir()).map_err(ServerError::WorkDir)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ServerError::Config(format!("{} has an invalid value: {}", key, raw))),
        Err(_) => Ok(default),
    }
}
