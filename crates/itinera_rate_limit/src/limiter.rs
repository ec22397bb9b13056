//! Request limiter for the annotation capability, using governor.
//!
//! The GCRA (Generic Cell Rate Algorithm) limiter enforces requests per
//! minute and per day. [`RateLimiter::execute`] adds jittered exponential
//! backoff for transient failures.

use crate::Tier;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use itinera_error::RetryableError;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry2::strategy::{jitter, ExponentialBackoff};
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, info, warn};

type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Rate limiter that owns a value implementing [`Tier`].
///
/// The wrapped value (usually a client or its tier config) is reachable
/// through [`RateLimiter::inner`].
///
/// # Example
///
/// ```
/// use itinera_rate_limit::{RateLimiter, TierConfig};
///
/// let tier = TierConfig { name: "Test".into(), rpm: Some(60), rpd: None };
/// let limiter = RateLimiter::new(tier);
/// assert_eq!(limiter.inner().name, "Test");
/// ```
#[derive(Clone)]
pub struct RateLimiter<T: Tier> {
    inner: T,
    rpm_limiter: Option<Arc<DirectRateLimiter>>,
    rpd_limiter: Option<Arc<DirectRateLimiter>>,
    initial_backoff_ms: Option<u64>,
    max_delay: Option<Duration>,
    max_retries: Option<usize>,
}

impl<T: Tier> RateLimiter<T> {
    /// Create a limiter enforcing every non-`None` limit of `tier`.
    pub fn new(tier: T) -> Self {
        let rpm_limiter = tier.rpm().and_then(|rpm| {
            NonZeroU32::new(rpm).map(|n| Arc::new(GovernorRateLimiter::direct(Quota::per_minute(n))))
        });

        // Requests per day, allowing the full daily burst at once
        let rpd_limiter = tier.rpd().and_then(|rpd| {
            let n = NonZeroU32::new(rpd)?;
            let period = Duration::from_secs_f64(SECONDS_PER_DAY / f64::from(rpd));
            Quota::with_period(period)
                .map(|quota| Arc::new(GovernorRateLimiter::direct(quota.allow_burst(n))))
        });

        debug!(
            tier = tier.name(),
            rpm = ?tier.rpm(),
            rpd = ?tier.rpd(),
            "Creating rate limiter"
        );

        Self {
            inner: tier,
            rpm_limiter,
            rpd_limiter,
            initial_backoff_ms: None,
            max_delay: None,
            max_retries: None,
        }
    }

    /// Retry transient failures `max_retries` times, whatever the error suggests.
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Override the first backoff delay and the delay ceiling.
    pub fn with_backoff(mut self, initial_backoff_ms: u64, max_delay: Duration) -> Self {
        self.initial_backoff_ms = Some(initial_backoff_ms.max(1));
        self.max_delay = Some(max_delay);
        self
    }

    /// Get a reference to the inner tier value.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Wait until every limit allows one more request.
    pub async fn acquire(&self) {
        if let Some(limiter) = &self.rpm_limiter {
            limiter.until_ready().await;
        }
        if let Some(limiter) = &self.rpd_limiter {
            limiter.until_ready().await;
        }
    }

    /// Execute an operation with rate limiting and automatic retry.
    ///
    /// Each attempt first acquires a request slot. The first failure picks the
    /// backoff from [`RetryableError::retry_strategy_params`], unless
    /// overridden with [`with_backoff`](Self::with_backoff) or
    /// [`with_max_retries`](Self::with_max_retries). Failures for which
    /// [`RetryableError::is_retryable`] is false are returned immediately.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let response = limiter.execute(|| async {
    ///     client.generate(&request).await
    /// }).await?;
    /// ```
    pub async fn execute<F, Fut, R, E>(&self, operation: F) -> Result<R, E>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<R, E>>,
        E: RetryableError + std::fmt::Display,
    {
        self.acquire().await;
        let first_error = match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };

        if !first_error.is_retryable() {
            warn!(error = %first_error, "Permanent error, failing immediately");
            return Err(first_error);
        }

        let (initial_ms, retries, max_delay_secs) = first_error.retry_strategy_params();
        let initial_ms = self.initial_backoff_ms.unwrap_or(initial_ms);
        let retries = self.max_retries.unwrap_or(retries);
        let max_delay = self
            .max_delay
            .unwrap_or_else(|| Duration::from_secs(max_delay_secs));

        if retries == 0 {
            warn!(error = %first_error, "Transient error, retries disabled");
            return Err(first_error);
        }
        info!(
            error = %first_error,
            initial_backoff_ms = initial_ms,
            max_retries = retries,
            max_delay_secs = max_delay.as_secs(),
            "Transient error, retrying with backoff"
        );

        let retry_strategy = ExponentialBackoff::from_millis(initial_ms)
            .factor(2)
            .max_delay(max_delay)
            .map(jitter)
            .take(retries);

        let operation = &operation;
        Retry::spawn(retry_strategy, move || async move {
            self.acquire().await;

            match operation().await {
                Ok(value) => Ok(value),
                Err(e) => {
                    if e.is_retryable() {
                        warn!(error = %e, "Transient error, will retry");
                        Err(RetryError::Transient {
                            err: e,
                            retry_after: None,
                        })
                    } else {
                        warn!(error = %e, "Permanent error, failing immediately");
                        Err(RetryError::Permanent(e))
                    }
                }
            }
        })
        .await
    }
}
