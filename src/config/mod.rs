//! Application configuration loaded from environment.

use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::time::Duration;

/// Application configuration loaded from `.env` and environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g. `0.0.0.0:8080`).
    pub server_addr: SocketAddr,
    /// HMAC secret shared with the messaging backend for token verification.
    pub jwt_secret: String,
    /// Base URL of the Centrifugo HTTP API (e.g. `http://localhost:9000`).
    pub centrifugo_url: String,
    /// Centrifugo API key sent as `Authorization: apikey <key>`.
    pub centrifugo_api_key: String,
    /// CORS settings applied to every response.
    pub cors: CorsConfig,
    /// Optional lifetime for issued tokens. `None` issues tokens without `exp`.
    pub token_ttl: Option<Duration>,
    /// Log level: `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
}

/// The single origin allowed to call the gateway from a browser.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origin: HeaderValue,
}

impl CorsConfig {
    pub fn new(origin: &str) -> Result<Self, ConfigLoadError> {
        let allowed_origin = HeaderValue::from_str(origin)
            .map_err(|_| ConfigLoadError::InvalidCorsOrigin(origin.to_string()))?;
        Ok(Self { allowed_origin })
    }
}

const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_CENTRIFUGO_URL: &str = "http://localhost:9000";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5000";
/// Ten years.
pub const MAX_TOKEN_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

impl Config {
    /// Load configuration from environment. Call `dotenvy::dotenv().ok()` before this.
    pub fn from_env() -> Result<Self, ConfigLoadError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigLoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let server_addr: SocketAddr = var("SERVER_ADDR", DEFAULT_SERVER_ADDR)
            .parse()
            .map_err(|_| ConfigLoadError::InvalidServerAddr)?;

        let jwt_secret = var("CENTRIFUGO_JWT_SECRET", "");
        let centrifugo_url = var("CENTRIFUGO_API_URL", DEFAULT_CENTRIFUGO_URL)
            .trim_end_matches('/')
            .to_string();
        let centrifugo_api_key = var("CENTRIFUGO_API_KEY", "");
        let cors = CorsConfig::new(&var("CORS_ALLOWED_ORIGIN", DEFAULT_CORS_ORIGIN))?;

        let token_ttl = match lookup("TOKEN_TTL_SECS") {
            None => None,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if (1..=MAX_TOKEN_TTL_SECS).contains(&secs) => {
                    Some(Duration::from_secs(secs))
                }
                _ => return Err(ConfigLoadError::InvalidTokenTtl(raw)),
            },
        };

        let log_level = var("LOG_LEVEL", "info");

        Ok(Self {
            server_addr,
            jwt_secret,
            centrifugo_url,
            centrifugo_api_key,
            cors,
            token_ttl,
            log_level,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Invalid SERVER_ADDR")]
    InvalidServerAddr,
    #[error("Invalid CORS_ALLOWED_ORIGIN: {0}")]
    InvalidCorsOrigin(String),
    #[error("Invalid TOKEN_TTL_SECS: {0} (expected 1 to 315360000 seconds)")]
    InvalidTokenTtl(String),
}
