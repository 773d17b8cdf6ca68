//! Gateway client for the backend REST API
//!
//! Issues HTTP calls to the configured backend on behalf of incoming
//! requests, injecting a JSON content type and, when the caller's session
//! holds one, a bearer token. GETs are idempotent: they may be served from
//! the shared response cache, and a rate-limited GET is retried once after a
//! fixed backoff. Mutating calls are never cached and never retried, so a
//! failed write cannot be silently duplicated.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::cache::ResponseCache;
use crate::config::GatewayConfig;
use crate::session::Session;

/// Errors surfaced by gateway calls
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The HTTP request itself failed (connect, timeout, ...)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("backend returned {status} for {path}: {message}")]
    Status {
        status: u16,
        path: String,
        message: String,
    },

    /// The backend answered 429, including on the retried attempt
    #[error("rate limited by backend")]
    RateLimited,

    /// The backend rejected the credentials with 401
    #[error("authorization rejected by backend")]
    Unauthorized,

    /// The response body was not valid JSON
    #[error("invalid JSON in response for {path}: {source}")]
    InvalidJson {
        path: String,
        source: serde_json::Error,
    },

    /// The request body could not be encoded as JSON
    #[error("failed to encode request body: {0}")]
    Encode(serde_json::Error),
}

/// Client issuing calls to the backend API on behalf of incoming requests
///
/// Cloning is cheap and shares the HTTP connection pool and the response
/// cache, so one gateway serves all concurrent request handlers.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    /// HTTP client for making requests
    http: Client,
    /// Backend base URL, without a trailing slash
    base_url: String,
    /// Wait before the single retry of a rate-limited GET
    retry_backoff: Duration,
    /// Response cache for GETs; `None` disables caching entirely
    cache: Option<ResponseCache>,
}

impl GatewayClient {
    /// Creates a gateway with its own response cache using the configured TTL
    pub fn new(config: &GatewayConfig) -> Self {
        let cache = ResponseCache::new(config.cache_ttl);
        Self::build(config, Some(cache))
    }

    /// Creates a gateway that always goes to the network (no read cache)
    pub fn without_cache(config: &GatewayConfig) -> Self {
        Self::build(config, None)
    }

    /// Creates a gateway sharing an existing response cache
    pub fn with_cache(config: &GatewayConfig, cache: ResponseCache) -> Self {
        Self::build(config, Some(cache))
    }

    fn build(config: &GatewayConfig, cache: Option<ResponseCache>) -> Self {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .expect("failed to build HTTP client");
        Self {
            http,
            base_url: config.base_url.clone(),
            retry_backoff: config.retry_backoff,
            cache,
        }
    }

    /// Returns the response cache, if this gateway carries one
    pub fn cache(&self) -> Option<&ResponseCache> {
        self.cache.as_ref()
    }

    /// Fetches `path`, serving from the cache when possible
    ///
    /// Degrading read: every failure is logged and collapsed to `None`, so
    /// callers render an empty view instead of an error page. Use
    /// [`GatewayClient::try_get`] when the failure kind matters.
    pub async fn get(&self, path: &str, session: &Session) -> Option<Value> {
        match self.try_get(path, session).await {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("GET {} failed: {}", path, err);
                None
            }
        }
    }

    /// Fetches `path`, serving from the cache when possible
    ///
    /// On a cache miss the GET goes to the backend; a 429 is retried exactly
    /// once after the configured backoff, and a successful payload is stored
    /// in the cache keyed by `path`. A 401 invalidates `session`.
    pub async fn try_get(&self, path: &str, session: &Session) -> Result<Value, GatewayError> {
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(path) {
                debug!("cache hit for {}", path);
                return Ok(hit);
            }
        }

        let value = match self.send(Method::GET, path, None, session).await {
            Err(GatewayError::RateLimited) => {
                warn!(
                    "GET {} rate limited, retrying in {:?}",
                    path, self.retry_backoff
                );
                tokio::time::sleep(self.retry_backoff).await;
                self.send(Method::GET, path, None, session).await?
            }
            other => other?,
        };

        if let Some(cache) = &self.cache {
            cache.set(path, &value);
        }
        Ok(value)
    }

    /// POSTs `body` to `path`; failures propagate to the caller
    pub async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
        session: &Session,
    ) -> Result<Value, GatewayError> {
        let body = serde_json::to_value(body).map_err(GatewayError::Encode)?;
        self.send(Method::POST, path, Some(&body), session).await
    }

    /// PUTs `body` to `path`; failures propagate to the caller
    pub async fn put<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
        session: &Session,
    ) -> Result<Value, GatewayError> {
        let body = serde_json::to_value(body).map_err(GatewayError::Encode)?;
        self.send(Method::PUT, path, Some(&body), session).await
    }

    /// DELETEs `path`; failures propagate to the caller
    pub async fn delete(&self, path: &str, session: &Session) -> Result<Value, GatewayError> {
        self.send(Method::DELETE, path, None, session).await
    }

    /// Issues a single HTTP attempt and maps the response
    ///
    /// Mutating verbs pass through here exactly once: a failed write must
    /// reach the caller rather than be replayed with duplicate side effects.
    /// A write also never touches the cache, so a cached GET can stay stale
    /// for up to one TTL after a mutation.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        session: &Session,
    ) -> Result<Value, GatewayError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .http
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = session.token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            session.invalidate();
            return Err(GatewayError::Unauthorized);
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(GatewayError::RateLimited);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                path: path.to_string(),
                message,
            });
        }

        let text = response.text().await?;
        if text.is_empty() {
            // Some backends answer writes with 204 and no body.
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|source| GatewayError::InvalidJson {
            path: path.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_config() -> GatewayConfig {
        GatewayConfig::new("http://localhost:4000")
    }

    #[test]
    fn test_new_carries_a_cache() {
        let gateway = GatewayClient::new(&test_config());
        assert!(gateway.cache().is_some());
    }

    #[test]
    fn test_without_cache_carries_none() {
        let gateway = GatewayClient::without_cache(&test_config());
        assert!(gateway.cache().is_none());
    }

    #[test]
    fn test_clones_share_the_cache() {
        let gateway = GatewayClient::new(&test_config());
        let clone = gateway.clone();

        let payload = json!({"products": []});
        gateway
            .cache()
            .expect("gateway has a cache")
            .set("/products", &payload);

        assert_eq!(
            clone.cache().expect("clone has a cache").get("/products"),
            Some(payload)
        );
    }

    #[test]
    fn test_with_cache_shares_an_injected_cache() {
        let shared = ResponseCache::new(Duration::from_secs(60));
        let gateway = GatewayClient::with_cache(&test_config(), shared.clone());

        shared.set("/brands", &json!(["acme"]));

        assert_eq!(
            gateway.cache().expect("injected cache").get("/brands"),
            Some(json!(["acme"]))
        );
    }

    #[test]
    fn test_error_messages_name_the_path() {
        let err = GatewayError::Status {
            status: 500,
            path: "/products".to_string(),
            message: "boom".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "backend returned 500 for /products: boom"
        );

        assert_eq!(
            GatewayError::RateLimited.to_string(),
            "rate limited by backend"
        );
        assert_eq!(
            GatewayError::Unauthorized.to_string(),
            "authorization rejected by backend"
        );
    }

    #[tokio::test]
    async fn test_get_degrades_to_none_when_backend_unreachable() {
        // Port 9 (discard) is not listening locally; the connect fails fast.
        let config = GatewayConfig::new("http://127.0.0.1:9")
            .with_request_timeout(Duration::from_secs(1));
        let gateway = GatewayClient::without_cache(&config);
        let session = Session::new();

        assert!(gateway.get("/products", &session).await.is_none());
    }

    #[tokio::test]
    async fn test_write_failure_propagates_when_backend_unreachable() {
        let config = GatewayConfig::new("http://127.0.0.1:9")
            .with_request_timeout(Duration::from_secs(1));
        let gateway = GatewayClient::without_cache(&config);
        let session = Session::new();

        let result = gateway.post("/products", &json!({"name": "x"}), &session).await;
        assert!(matches!(result, Err(GatewayError::Http(_))));
    }
}
