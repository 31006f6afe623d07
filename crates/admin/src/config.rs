//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `BLUEPENGUIN_API_BASE_URL` - Backend API base URL (default: `https://localhost:7022/`)
//! - `BLUEPENGUIN_SESSION_FILE` - Session storage file (default: `.bluepenguin/session.json`)
//! - `BLUEPENGUIN_REQUEST_TIMEOUT_SECS` - Per-request timeout in seconds (default: 30)
//! - `BLUEPENGUIN_ACCEPT_INVALID_CERTS` - Accept self-signed TLS certificates (default: false)
//! - `BLUEPENGUIN_LOG_JSON` - Emit JSON logs instead of text
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (default: 1.0)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "https://localhost:7022/";
const DEFAULT_SESSION_FILE: &str = ".bluepenguin/session.json";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin client configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Backend API base URL, without a trailing slash
    pub api_base_url: String,
    /// File backing the persisted session
    pub session_file: PathBuf,
    /// Timeout applied to every backend request
    pub request_timeout: Duration,
    /// Accept invalid TLS certificates (development backends use self-signed certs)
    pub accept_invalid_certs: bool,
    /// Emit JSON-formatted logs
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let api_base_url = normalize_base_url(&get_or_default(
            "BLUEPENGUIN_API_BASE_URL",
            DEFAULT_API_BASE_URL,
        ))?;
        let session_file = PathBuf::from(get_or_default(
            "BLUEPENGUIN_SESSION_FILE",
            DEFAULT_SESSION_FILE,
        ));
        let timeout_secs = get_or_default(
            "BLUEPENGUIN_REQUEST_TIMEOUT_SECS",
            &DEFAULT_REQUEST_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("BLUEPENGUIN_REQUEST_TIMEOUT_SECS".to_string(), e.to_string())
        })?;
        let accept_invalid_certs = parse_flag(
            "BLUEPENGUIN_ACCEPT_INVALID_CERTS",
            lookup("BLUEPENGUIN_ACCEPT_INVALID_CERTS"),
        )?;
        let log_json = parse_flag("BLUEPENGUIN_LOG_JSON", lookup("BLUEPENGUIN_LOG_JSON"))?;
        let sentry_sample_rate = lookup("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            api_base_url,
            session_file,
            request_timeout: Duration::from_secs(timeout_secs),
            accept_invalid_certs,
            log_json,
            sentry_dsn: lookup("SENTRY_DSN"),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
        })
    }

    /// Configuration pointing at `api_base_url` with defaults for everything else.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the URL is not a valid absolute URL.
    pub fn for_base_url(api_base_url: &str) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| {
            (key == "BLUEPENGUIN_API_BASE_URL").then(|| api_base_url.to_string())
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Validate a base URL and strip its trailing slash.
fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    Url::parse(raw).map_err(|e| {
        ConfigError::InvalidEnvVar("BLUEPENGUIN_API_BASE_URL".to_string(), e.to_string())
    })?;
    Ok(raw.trim_end_matches('/').to_string())
}

/// Parse a boolean flag; unset means false.
fn parse_flag(key: &str, value: Option<String>) -> Result<bool, ConfigError> {
    match value.as_deref().map(str::to_ascii_lowercase).as_deref() {
        None | Some("" | "0" | "false" | "no") => Ok(false),
        Some("1" | "true" | "yes") => Ok(true),
        Some(other) => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}
