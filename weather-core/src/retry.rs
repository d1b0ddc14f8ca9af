//! Bounded retry with exponential backoff.

use std::{future::Future, time::Duration};
use tracing::{debug, warn};

use crate::{config::HttpSettings, error::FetchError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl From<&HttpSettings> for RetryPolicy {
    fn from(http: &HttpSettings) -> Self {
        Self {
            max_retries: http.max_retries,
            initial_delay: Duration::from_millis(http.initial_delay_ms),
            max_delay: Duration::from_millis(http.max_delay_ms),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (0-indexed): `initial * 2^attempt`, capped.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.initial_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Run `operation` until it succeeds, fails permanently, or retries run out.
    pub async fn run<F, Fut, T>(&self, mut operation: F) -> Result<T, FetchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let mut attempt = 0u32;

        loop {
            match operation().await {
                Ok(value) => {
                    if attempt > 0 {
                        debug!(attempts = attempt + 1, "Request succeeded after retries");
                    }
                    return Ok(value);
                }
                Err(err) if !err.is_transient() => {
                    debug!(error = %err, "Request failed with non-retryable error");
                    return Err(err);
                }
                Err(err) if attempt >= self.max_retries => {
                    warn!(attempts = attempt + 1, error = %err, "Giving up after retries");
                    return Err(err);
                }
                Err(err) => {
                    let delay = self.delay_for_attempt(attempt);
                    warn!(
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
