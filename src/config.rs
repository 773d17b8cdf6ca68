//! Gateway configuration
//!
//! Holds the knobs the gateway client needs: the backend base URL, the cache
//! freshness window, the rate-limit retry backoff, and the per-request
//! timeout. Loaded from the environment in deployments, constructed directly
//! in tests.

use std::env;
use std::time::Duration;

use thiserror::Error;

/// Environment variable naming the backend base URL
const BASE_URL_VAR: &str = "API_BASE_URL";

/// Environment variable overriding the cache TTL, in seconds
const CACHE_TTL_VAR: &str = "CACHE_TTL_SECS";

/// Default freshness window for cached GET responses
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Default wait before retrying a rate-limited GET
const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_secs(2);

/// Default per-request timeout for backend calls
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when loading configuration from the environment
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The backend base URL is not configured
    #[error("API_BASE_URL is not set")]
    MissingBaseUrl,

    /// The cache TTL override is not a whole number of seconds
    #[error("CACHE_TTL_SECS is not a valid number of seconds: '{0}'")]
    InvalidCacheTtl(String),
}

/// Configuration consumed by the gateway client
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the backend API, without a trailing slash
    pub base_url: String,
    /// How long cached GET responses stay fresh
    pub cache_ttl: Duration,
    /// How long to wait before retrying a rate-limited GET
    pub retry_backoff: Duration,
    /// Timeout applied to each outbound request
    pub request_timeout: Duration,
}

impl GatewayConfig {
    /// Creates a configuration for the given backend base URL with defaults
    /// for everything else
    ///
    /// Trailing slashes are trimmed so request paths can always start
    /// with `/`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            cache_ttl: DEFAULT_CACHE_TTL,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Loads configuration from the environment
    ///
    /// `API_BASE_URL` is required; `CACHE_TTL_SECS` optionally overrides the
    /// five-minute cache window.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var(BASE_URL_VAR).map_err(|_| ConfigError::MissingBaseUrl)?;
        let mut config = Self::new(base_url);
        if let Ok(raw) = env::var(CACHE_TTL_VAR) {
            let secs: u64 = raw
                .parse()
                .map_err(|_| ConfigError::InvalidCacheTtl(raw))?;
            config.cache_ttl = Duration::from_secs(secs);
        }
        Ok(config)
    }

    /// Overrides the cache freshness window
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Overrides the rate-limit retry backoff
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Overrides the per-request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
