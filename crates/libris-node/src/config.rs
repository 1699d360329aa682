//! Node configuration, read from the environment.

use std::path::PathBuf;
use std::time::Duration;

/// Secret the node falls back to when `JWT_SECRET` is unset. Fine for
/// local development, unacceptable in production.
pub const DEFAULT_JWT_SECRET: &str = "your-super-secret-jwt-key-change-in-production";

/// Configuration for the Libris node.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen port.
    pub port: u16,
    /// Directory holding the JSON collection files.
    pub data_dir: PathBuf,
    /// HMAC secret for bearer tokens.
    pub jwt_secret: String,
    /// Allowed CORS origins.
    pub cors_origins: Vec<String>,
    /// Rate limit window.
    pub rate_limit_window: Duration,
    /// Maximum requests per client per window.
    pub rate_limit_max: u32,
    /// Development mode: internal error details are echoed to clients.
    pub development: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            data_dir: PathBuf::from("./data"),
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            cors_origins: vec!["http://localhost:3000".to_string()],
            rate_limit_window: Duration::from_millis(900_000),
            rate_limit_max: 100,
            development: false,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Builds a configuration from the environment, with defaults for
    /// anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let jwt_secret =
            std::env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string());
        if jwt_secret == DEFAULT_JWT_SECRET {
            tracing::warn!("JWT_SECRET is not set; using the built-in development secret");
        }

        let cors_origins = std::env::var("CORS_ORIGIN")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.cors_origins);

        Self {
            port: env_parse("PORT", defaults.port),
            data_dir: std::env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            jwt_secret,
            cors_origins,
            rate_limit_window: Duration::from_millis(env_parse(
                "RATE_LIMIT_WINDOW_MS",
                defaults.rate_limit_window.as_millis() as u64,
            )),
            rate_limit_max: env_parse("RATE_LIMIT_MAX_REQUESTS", defaults.rate_limit_max),
            development: std::env::var("LIBRIS_ENV")
                .map(|v| v == "development")
                .unwrap_or(false),
        }
    }
}
