/// Backoff for mail transport sends
use crate::constants::{
    DEFAULT_TRANSPORT_MAX_RETRIES, RETRY_BASE_DELAY_MS, RETRY_JITTER_FACTOR, RETRY_MAX_DELAY_MS,
};
use crate::error::MaskmailError;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// How often a failed transport send is repeated
///
/// `max_retries` counts sends after the first, so the default of zero
/// reports the first transport failure straight back to the caller.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    pub jitter_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_TRANSPORT_MAX_RETRIES,
            base_delay_ms: RETRY_BASE_DELAY_MS,
            max_delay_ms: RETRY_MAX_DELAY_MS,
            jitter_factor: RETRY_JITTER_FACTOR,
        }
    }
}

impl RetryConfig {
    pub fn new(max_retries: u32, base_delay_ms: u64, max_delay_ms: u64) -> Self {
        Self {
            max_retries,
            base_delay_ms,
            max_delay_ms,
            ..Self::default()
        }
    }

    /// Total number of sends this config allows
    pub fn attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Pause before the `retry`-th resend (zero-based), doubled per retry
    /// and capped, with symmetric jitter
    pub fn backoff(&self, retry: u32) -> Duration {
        let doubled = self
            .base_delay_ms
            .saturating_mul(2u64.saturating_pow(retry))
            .min(self.max_delay_ms);

        let jitter = (rand::random::<f64>() - 0.5) * 2.0 * self.jitter_factor;
        Duration::from_millis((doubled as f64 * (1.0 + jitter)).max(0.0) as u64)
    }
}

/// Run `send` until it succeeds, fails with a non-transport error, or the
/// configured attempts are used up
///
/// `send` receives the zero-based attempt number. The error of the last
/// attempt is returned as-is.
pub async fn retry_send<F, Fut, T>(
    config: &RetryConfig,
    alias: &str,
    mut send: F,
) -> Result<T, MaskmailError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, MaskmailError>>,
{
    let attempts = config.attempts();
    let mut attempt = 0;

    loop {
        let err = match send(attempt).await {
            Ok(value) => {
                if attempt > 0 {
                    debug!(alias = %alias, attempt, "Transport send succeeded on retry");
                }
                return Ok(value);
            }
            Err(e) => e,
        };

        attempt += 1;
        if !err.is_retriable() || attempt >= attempts {
            return Err(err);
        }

        let delay = config.backoff(attempt - 1);
        warn!(
            alias = %alias,
            attempt,
            remaining = attempts - attempt,
            delay_ms = delay.as_millis(),
            error = %err,
            "Transport send failed, retrying"
        );
        tokio::time::sleep(delay).await;
    }
}
