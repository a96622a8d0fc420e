//! Retry policy with bounded backoff
//!
//! Every failed attempt is retried until `max_attempts` is used up. The wait
//! after attempt `n` is `multiplier * 2^(n-1)` for exponential backoff,
//! clamped to `[min_delay, max_delay]`.

use crate::config::RetryConfig;
use crate::error::{Error, Result};
use crate::types::BackoffType;
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, Span};

/// Retry policy for page fetches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Shape of the backoff curve
    pub backoff: BackoffType,
    /// Scale applied to the backoff curve
    pub multiplier: Duration,
    /// Lower bound on any wait
    pub min_delay: Duration,
    /// Upper bound on any wait
    pub max_delay: Duration,
    /// Randomize each wait within `[min_delay, delay]`
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            backoff: config.backoff,
            multiplier: Duration::from_millis(config.multiplier_ms),
            min_delay: Duration::from_millis(config.min_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
            jitter: config.jitter,
        }
    }
}

impl RetryPolicy {
    /// A policy that never waits; useful for tests and one-shot calls
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            backoff: BackoffType::Constant,
            multiplier: Duration::ZERO,
            min_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            jitter: false,
        }
    }

    /// Delay before the attempt following failed attempt `attempt` (1-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let attempt = attempt.max(1);
        let raw = match self.backoff {
            BackoffType::Constant => Some(self.multiplier),
            BackoffType::Linear => self.multiplier.checked_mul(attempt),
            BackoffType::Exponential => self
                .multiplier
                .checked_mul(2u32.saturating_pow(attempt - 1)),
        };

        raw.unwrap_or(self.max_delay)
            .min(self.max_delay)
            .max(self.min_delay)
    }

    fn jittered(&self, delay: Duration) -> Duration {
        if !self.jitter || delay <= self.min_delay {
            return delay;
        }
        rand::thread_rng().gen_range(self.min_delay..=delay)
    }

    /// Run `op` until it succeeds or the attempt budget is spent.
    ///
    /// `op` receives the 1-based attempt number. A debug event is logged on
    /// `span` before each wait.
    pub async fn run<T, F, Fut>(&self, span: &Span, mut op: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) if attempt >= max_attempts => {
                    return Err(Error::MaxRetriesExceeded {
                        attempts: attempt,
                        last_error: Box::new(err),
                    });
                }
                Err(err) => {
                    let delay = self.jittered(self.delay_for(attempt));
                    debug!(
                        parent: span,
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
