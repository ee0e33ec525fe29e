//! Retry logic for upstream GET requests.
//!
//! Retries are reserved for transient conditions:
//! - HTTP 429 (honoring `Retry-After` when the server provides one)
//! - request timeouts
//! - connection errors
//!
//! Everything else fails fast: 401/403 mean bad credentials and no amount
//! of retrying fixes that, and other non-2xx statuses are reported as-is.

use reqwest::{header::RETRY_AFTER, Response, StatusCode};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_BACKOFF_FACTOR: f64 = 2.0;

/// Errors produced by the fetch layer.
///
/// Any of these means "no response obtainable"; callers degrade to an
/// empty or structured-error result instead of aborting their pipeline.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("upstream rejected credentials ({0})")]
    Auth(StatusCode),
    #[error("upstream returned {0}")]
    Status(StatusCode),
    #[error("rate limited, gave up after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },
}

/// Retry configuration
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempt budget, shared by all retryable paths
    pub max_attempts: u32,
    /// Base of the exponential backoff, in seconds per attempt
    pub backoff_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_RETRIES,
            backoff_factor: DEFAULT_BACKOFF_FACTOR,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff_factor: f64) -> Self {
        Self {
            max_attempts,
            backoff_factor,
        }
    }

    /// Delay before the retry following `attempt` (zero-based):
    /// `backoff_factor^attempt` seconds.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        Duration::from_secs_f64(self.backoff_factor.powi(attempt as i32))
    }
}

/// Execute a GET request with retry/backoff applied.
///
/// `op` is invoked once per attempt and must issue a fresh request each
/// time. Returns the first successful 2xx response, or the `FetchError`
/// describing why no response could be obtained.
pub async fn fetch_with_retry<F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<Response, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Response, reqwest::Error>>,
{
    for attempt in 0..policy.max_attempts {
        match op().await {
            Ok(response) => {
                let status = response.status();

                if status == StatusCode::TOO_MANY_REQUESTS {
                    let delay = retry_after_delay(&response)
                        .unwrap_or_else(|| policy.backoff_delay(attempt));
                    warn!(
                        "Rate limited. Waiting {:?} before retry {}/{}",
                        delay,
                        attempt + 1,
                        policy.max_attempts
                    );
                    tokio::time::sleep(delay).await;
                    continue;
                }

                if status == StatusCode::FORBIDDEN || status == StatusCode::UNAUTHORIZED {
                    warn!("Upstream rejected credentials ({})", status);
                    return Err(FetchError::Auth(status));
                }

                if !status.is_success() {
                    debug!("Upstream returned {}", status);
                    return Err(FetchError::Status(status));
                }

                return Ok(response);
            }
            Err(e) if e.is_timeout() || e.is_connect() => {
                if attempt + 1 < policy.max_attempts {
                    let delay = policy.backoff_delay(attempt);
                    warn!(
                        "Transient network error ({}). Retry {}/{} in {:?}",
                        e,
                        attempt + 1,
                        policy.max_attempts,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    continue;
                }
                warn!("Giving up after {} attempts: {}", policy.max_attempts, e);
                return Err(FetchError::Network(e));
            }
            Err(e) => return Err(FetchError::Network(e)),
        }
    }

    Err(FetchError::RetriesExhausted {
        attempts: policy.max_attempts,
    })
}

/// Parse a `Retry-After` header given in whole seconds.
fn retry_after_delay(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn canned(status: u16) -> Response {
        Response::from(
            http::Response::builder()
                .status(status)
                .body("")
                .unwrap(),
        )
    }

    fn canned_with_retry_after(secs: &str) -> Response {
        Response::from(
            http::Response::builder()
                .status(429)
                .header("Retry-After", secs)
                .body("")
                .unwrap(),
        )
    }

    #[test]
    fn test_backoff_delay_is_exponential() {
        let policy = RetryPolicy::new(3, 2.0);
        assert_eq!(policy.backoff_delay(0), Duration::from_secs(1));
        assert_eq!(policy.backoff_delay(1), Duration::from_secs(2));
        assert_eq!(policy.backoff_delay(2), Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limited_twice_then_success() {
        let policy = RetryPolicy::new(3, 2.0);
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = attempts.clone();

        let started = tokio::time::Instant::now();
        let result = fetch_with_retry(&policy, move || {
            let counter = counter.clone();
            async move {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                Ok(if n < 2 { canned(429) } else { canned(200) })
            }
        })
        .await;

        assert!(result.is_ok());
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
        // two backoff sleeps: 2^0 + 2^1 seconds
        assert_eq!(started.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_after_header_wins_over_backoff() {
        let policy = RetryPolicy::new(2, 2.0);
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = attempts.clone();

        let started = tokio::time::Instant::now();
        let result = fetch_with_retry(&policy, move || {
            let counter = counter.clone();
            async move {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                Ok(if n == 0 {
                    canned_with_retry_after("7")
                } else {
                    canned(200)
                })
            }
        })
        .await;

        assert!(result.is_ok());
        assert_eq!(started.elapsed(), Duration::from_secs(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_exhausts_attempt_budget() {
        let policy = RetryPolicy::new(3, 2.0);
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = attempts.clone();

        let result = fetch_with_retry(&policy, move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(canned(429))
            }
        })
        .await;

        assert!(matches!(
            result,
            Err(FetchError::RetriesExhausted { attempts: 3 })
        ));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_forbidden_fails_without_retry() {
        let policy = RetryPolicy::new(3, 2.0);
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = attempts.clone();

        let result = fetch_with_retry(&policy, move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(canned(403))
            }
        })
        .await;

        assert!(matches!(
            result,
            Err(FetchError::Auth(StatusCode::FORBIDDEN))
        ));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unauthorized_fails_without_retry() {
        let policy = RetryPolicy::new(3, 2.0);

        let result = fetch_with_retry(&policy, || async { Ok(canned(401)) }).await;

        assert!(matches!(
            result,
            Err(FetchError::Auth(StatusCode::UNAUTHORIZED))
        ));
    }

    #[tokio::test]
    async fn test_other_client_error_fails_without_retry() {
        let policy = RetryPolicy::new(3, 2.0);
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = attempts.clone();

        let result = fetch_with_retry(&policy, move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(canned(404))
            }
        })
        .await;

        assert!(matches!(
            result,
            Err(FetchError::Status(StatusCode::NOT_FOUND))
        ));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_server_error_fails_without_retry() {
        let policy = RetryPolicy::new(3, 2.0);

        let result = fetch_with_retry(&policy, || async { Ok(canned(503)) }).await;

        assert!(matches!(
            result,
            Err(FetchError::Status(StatusCode::SERVICE_UNAVAILABLE))
        ));
    }
}
