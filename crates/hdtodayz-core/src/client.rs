//! Page fetching
//!
//! The pipeline only needs "give me the markup behind this URL", expressed
//! by the [`Fetcher`] trait. [`HttpFetcher`] is the default implementation:
//! a rate-limited reqwest client with exponential backoff for transient
//! errors.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use reqwest::StatusCode;
use tokio::sync::Mutex;
use tokio::time::sleep;

use crate::error::{Result, ScrapeError};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const ACCEPT_LANGUAGE_EN: &str = "en-US,en;q=0.9";

/// Source of raw page markup
///
/// Fails on transport errors and non-success statuses. Implementations
/// own their retry policy; the pipeline never retries.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Configuration for the HTTP fetcher
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Maximum requests per second (default: 2.0)
    pub requests_per_second: f64,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Maximum retry attempts for transient errors (default: 2)
    pub max_retries: u32,
    pub user_agent: String,
    /// Sent as `Accept-Language` on every request
    pub accept_language: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 2.0,
            timeout_secs: 30,
            max_retries: 2,
            user_agent: USER_AGENT.to_string(),
            accept_language: ACCEPT_LANGUAGE_EN.to_string(),
        }
    }
}

impl ClientConfig {
    /// Default configuration asking for pages in `lang` first
    ///
    /// # Example
    /// ```
    /// use hdtodayz_core::ClientConfig;
    /// assert_eq!(ClientConfig::for_language("ar").accept_language, "ar,en;q=0.8");
    /// assert_eq!(ClientConfig::for_language("en").accept_language, "en-US,en;q=0.9");
    /// ```
    pub fn for_language(lang: &str) -> Self {
        let lang = lang.trim();
        let accept_language = if lang.is_empty() || lang.eq_ignore_ascii_case("en") {
            ACCEPT_LANGUAGE_EN.to_string()
        } else {
            format!("{},en;q=0.8", lang)
        };

        Self {
            accept_language,
            ..Self::default()
        }
    }
}

/// Rate limiter to control request frequency
///
/// Ensures requests are spaced at least `min_interval` apart.
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Arc<Mutex<Instant>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the specified requests per second
    ///
    /// A non-positive or non-finite rate disables limiting.
    pub fn new(requests_per_second: f64) -> Self {
        let min_interval = if requests_per_second.is_finite() && requests_per_second > 0.0 {
            Duration::from_secs_f64(1.0 / requests_per_second)
        } else {
            Duration::ZERO
        };
        let now = Instant::now();

        Self {
            min_interval,
            last_request: Arc::new(Mutex::new(now.checked_sub(min_interval).unwrap_or(now))),
        }
    }

    /// Waits until the minimum interval since the previous request has passed
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();

        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }

        *last = Instant::now();
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// Default [`Fetcher`]: reqwest with rate limiting and retries
///
/// - Cookies persist across requests (some mirrors set a session cookie
///   on the first page view)
/// - 429, 5xx, timeouts and connection failures are retried with
///   exponential backoff (1s, 2s, 4s, ...)
/// - 404 and other statuses fail immediately
pub struct HttpFetcher {
    client: reqwest::Client,
    rate_limiter: RateLimiter,
    max_retries: u32,
}

impl HttpFetcher {
    /// Create a fetcher with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a fetcher with custom configuration
    ///
    /// # Errors
    /// - `InvalidConfig` if the accept language is not a valid header value
    /// - `HttpError` if the underlying client cannot be built
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let accept_language = HeaderValue::from_str(&config.accept_language).map_err(|e| {
            ScrapeError::InvalidConfig(format!("accept_language {:?}: {}", config.accept_language, e))
        })?;
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, accept_language);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .cookie_store(true)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(config.requests_per_second),
            max_retries: config.max_retries,
        })
    }

    /// Single attempt, mapping error statuses
    async fn fetch_once(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ScrapeError::RateLimited);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ScrapeError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(ScrapeError::HttpStatus(status.as_u16()));
        }

        Ok(response.text().await?)
    }

    fn is_retryable(error: &ScrapeError) -> bool {
        match error {
            ScrapeError::RateLimited => true,
            ScrapeError::HttpStatus(status) => (500..600).contains(status),
            ScrapeError::HttpError(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let mut attempt = 0;

        loop {
            self.rate_limiter.acquire().await;

            match self.fetch_once(url).await {
                Ok(body) => return Ok(body),
                Err(e) if Self::is_retryable(&e) && attempt < self.max_retries => {
                    let backoff = Duration::from_secs(1 << attempt);
                    tracing::debug!(url, attempt, error = %e, ?backoff, "retrying fetch");
                    sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limiter_creation() {
        let limiter = RateLimiter::new(2.0);
        assert_eq!(limiter.min_interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_rate_limiter_disabled_for_zero_rate() {
        assert_eq!(RateLimiter::new(0.0).min_interval(), Duration::ZERO);
        assert_eq!(RateLimiter::new(f64::INFINITY).min_interval(), Duration::ZERO);
    }

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.requests_per_second, 2.0);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.max_retries, 2);
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_config_for_language() {
        assert_eq!(ClientConfig::for_language("ar").accept_language, "ar,en;q=0.8");
        assert_eq!(ClientConfig::for_language(" ").accept_language, ACCEPT_LANGUAGE_EN);
        assert_eq!(ClientConfig::for_language("ar").max_retries, 2);
    }

    #[test]
    fn test_fetcher_creation() {
        assert!(HttpFetcher::new().is_ok());
    }

    #[test]
    fn test_fetcher_rejects_bad_header() {
        let config = ClientConfig {
            accept_language: "en\nX-Injected: 1".to_string(),
            ..ClientConfig::default()
        };
        assert!(matches!(
            HttpFetcher::with_config(config),
            Err(ScrapeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_retryable_errors() {
        assert!(HttpFetcher::is_retryable(&ScrapeError::RateLimited));
        assert!(HttpFetcher::is_retryable(&ScrapeError::HttpStatus(503)));
        assert!(!HttpFetcher::is_retryable(&ScrapeError::HttpStatus(403)));
        assert!(!HttpFetcher::is_retryable(&ScrapeError::NotFound("x".to_string())));
    }

    #[tokio::test]
    async fn test_rate_limiter_acquire() {
        let limiter = RateLimiter::new(10.0);

        let start = Instant::now();
        limiter.acquire().await;
        limiter.acquire().await;

        // Second acquire waits out the 100ms interval
        assert!(start.elapsed() >= Duration::from_millis(90));
    }
}
