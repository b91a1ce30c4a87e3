//! Spotify Web API client implementation.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::{de::DeserializeOwned, Serialize};
use sha2::{Digest, Sha256};
use tastematch_core::{Error, HttpError, Result};
use tracing::{debug, warn};

pub(crate) const BASE_URL: &str = "https://api.spotify.com/v1";

/// Default timeout for requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum number of retries for failed requests.
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (milliseconds).
const BASE_RETRY_DELAY_MS: u64 = 500;

/// Cache entry with expiration.
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: T,
    expires_at: std::time::Instant,
}

impl<T> CacheEntry<T> {
    fn new(value: T, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: std::time::Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        std::time::Instant::now() >= self.expires_at
    }
}

/// Spotify Web API client bound to one user's access token.
///
/// Read requests are cached in memory so that one comparison does not hit
/// the same endpoint twice. Writes (playlist creation) bypass the cache.
#[derive(Clone)]
pub struct SpotifyClient {
    /// HTTP client with the bearer token installed.
    http: reqwest::Client,
    /// In-memory cache for GET responses.
    cache: Arc<DashMap<String, CacheEntry<Vec<u8>>>>,
    /// Cache TTL for API responses.
    cache_ttl: Duration,
    /// Rate limiter state.
    rate_limit_state: Arc<RwLock<RateLimitState>>,
}

#[derive(Debug, Default)]
struct RateLimitState {
    /// Time when we can make requests again (if rate limited).
    blocked_until: Option<std::time::Instant>,
    /// Number of requests made recently.
    request_count: u32,
    /// Window start for request counting.
    window_start: Option<std::time::Instant>,
}

impl RateLimitState {
    /// Requests allowed per one-minute window.
    const WINDOW_LIMIT: u32 = 100;

    fn is_blocked(&self) -> bool {
        self.blocked_until
            .is_some_and(|until| std::time::Instant::now() < until)
    }

    fn block_for(&mut self, duration: Duration) {
        self.blocked_until = Some(std::time::Instant::now() + duration);
    }

    fn check_and_increment(&mut self) -> bool {
        let now = std::time::Instant::now();

        let window_duration = Duration::from_secs(60);
        if let Some(start) = self.window_start {
            if now.duration_since(start) > window_duration {
                self.window_start = Some(now);
                self.request_count = 0;
            }
        } else {
            self.window_start = Some(now);
            self.request_count = 0;
        }

        if self.request_count >= Self::WINDOW_LIMIT {
            return false;
        }

        self.request_count += 1;
        true
    }
}

impl SpotifyClient {
    /// Create a client for the given user access token.
    ///
    /// # Errors
    /// Returns [`Error::Auth`] when the token contains bytes that cannot be
    /// carried in an HTTP header, and [`Error::Network`] when the HTTP client
    /// cannot be constructed.
    pub fn new(access_token: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut bearer = HeaderValue::from_str(&format!("Bearer {access_token}"))
            .map_err(|_| Error::Auth("access token is not a valid header value".to_string()))?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(DEFAULT_TIMEOUT)
            .pool_max_idle_per_host(10)
            .tcp_keepalive(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            cache: Arc::new(DashMap::new()),
            cache_ttl: Duration::from_secs(300), // 5 minutes default
            rate_limit_state: Arc::new(RwLock::new(RateLimitState::default())),
        })
    }

    /// Set the cache TTL for API responses.
    #[must_use]
    pub const fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Make a cached GET request to a Web API path (including query string).
    pub(crate) async fn get<R>(&self, path: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let url = format!("{BASE_URL}{path}");
        let cache_key = cache_key(path);

        if let Some(cached) = self.get_cached(&cache_key) {
            debug!("Cache hit for {path}");
            return serde_json::from_slice(&cached).map_err(|e| Error::ParseError(e.to_string()));
        }

        self.check_rate_limit()?;

        let mut last_error = None;
        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = Duration::from_millis(BASE_RETRY_DELAY_MS * 2u64.pow(attempt - 1));
                tokio::time::sleep(delay).await;
                debug!("Retry attempt {attempt} for {path} after {delay:?}");
            }

            match self.do_request(self.http.get(&url)).await {
                Ok(response_bytes) => {
                    self.set_cached(cache_key, response_bytes.clone());

                    return serde_json::from_slice(&response_bytes)
                        .map_err(|e| Error::ParseError(format!("Failed to parse response: {e}")));
                }
                Err(e) => {
                    warn!("Request to {path} failed (attempt {attempt}): {e}");

                    if e.is_rate_limited() {
                        let mut state = self.rate_limit_state.write();
                        state.block_for(Duration::from_secs(60));
                    }

                    if !e.is_retryable() {
                        return Err(e);
                    }

                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| Error::Network("Request failed".to_string())))
    }

    /// Make an uncached POST request to a Web API path.
    pub(crate) async fn post<T, R>(&self, path: &str, body: &T) -> Result<R>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let url = format!("{BASE_URL}{path}");
        let body_bytes = serde_json::to_vec(body)?;

        self.check_rate_limit()?;

        let response_bytes = self
            .do_request(self.http.post(&url).body(body_bytes))
            .await?;
        serde_json::from_slice(&response_bytes)
            .map_err(|e| Error::ParseError(format!("Failed to parse response: {e}")))
    }

    fn check_rate_limit(&self) -> Result<()> {
        {
            let state = self.rate_limit_state.read();
            if state.is_blocked() {
                return Err(Error::RateLimited {
                    retry_after_secs: state
                        .blocked_until
                        .map(|until| until.duration_since(std::time::Instant::now()).as_secs()),
                });
            }
        }

        let mut state = self.rate_limit_state.write();
        if !state.check_and_increment() {
            state.block_for(Duration::from_secs(60));
            return Err(Error::RateLimited {
                retry_after_secs: Some(60),
            });
        }
        Ok(())
    }

    async fn do_request(&self, request: reqwest::RequestBuilder) -> Result<Vec<u8>> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Http(HttpError::Timeout)
            } else if e.is_connect() {
                Error::Http(HttpError::ConnectionFailed(e.to_string()))
            } else {
                Error::Network(e.to_string())
            }
        })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok());

            return Err(Error::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Auth(
                "access token expired or invalid".to_string(),
            ));
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Http(HttpError::StatusError {
                status: status.as_u16(),
                message,
            }));
        }

        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| Error::Network(format!("Failed to read response body: {e}")))
    }

    fn get_cached(&self, key: &str) -> Option<Vec<u8>> {
        let entry = self.cache.get(key)?;
        if entry.is_expired() {
            drop(entry);
            self.cache.remove(key);
            return None;
        }
        Some(entry.value.clone())
    }

    fn set_cached(&self, key: String, value: Vec<u8>) {
        let entry = CacheEntry::new(value, self.cache_ttl);
        self.cache.insert(key, entry);

        // Cleanup expired entries occasionally
        if self.cache.len() > 100 {
            self.cleanup_cache();
        }
    }

    fn cleanup_cache(&self) {
        self.cache.retain(|_, entry| !entry.is_expired());
    }

    /// Clear the cache.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Get the number of cached entries.
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

fn cache_key(path: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.as_bytes());
    hex::encode(hasher.finalize())
}
