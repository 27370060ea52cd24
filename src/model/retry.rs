/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Opt-in bounded retry with exponential backoff
//!
//! Nothing in the crate retries unless a [`RetryPolicy`] is installed on the
//! [`AuthClient`](crate::application::auth::AuthClient). Only transient kinds
//! (`ApiUnavailable`, `RateLimitExceeded`) are retried.

use crate::constants::{
    DEFAULT_RETRY_BASE_DELAY_MS, DEFAULT_RETRY_JITTER_MS, ENV_MAX_RETRIES, ENV_RETRY_BASE_DELAY_MS,
};
use crate::error::AppError;
use crate::utils::config::get_env_or_none;
use rand::Rng;
use std::time::Duration;
use tracing::warn;

/// Configuration for retrying transient failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one (minimum 1)
    pub max_attempts: u32,
    /// Delay before the second attempt; doubled for every further attempt
    pub base_delay: Duration,
    /// Upper bound of the random jitter added to every delay
    pub max_jitter: Duration,
}

impl RetryPolicy {
    /// Creates a policy with `max_attempts` and the default delays
    #[must_use]
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay: Duration::from_millis(DEFAULT_RETRY_BASE_DELAY_MS),
            max_jitter: Duration::from_millis(DEFAULT_RETRY_JITTER_MS),
        }
    }

    /// Replaces the base delay
    #[must_use]
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Replaces the jitter bound
    #[must_use]
    pub fn with_max_jitter(mut self, max_jitter: Duration) -> Self {
        self.max_jitter = max_jitter;
        self
    }

    /// Reads the policy from `THREEC_MAX_RETRIES` / `THREEC_RETRY_BASE_DELAY_MS`.
    /// Returns `None` when retries are not configured.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let attempts: u32 = get_env_or_none(ENV_MAX_RETRIES)?;
        let mut policy = Self::new(attempts);
        if let Some(delay_ms) = get_env_or_none::<u64>(ENV_RETRY_BASE_DELAY_MS) {
            policy.base_delay = Duration::from_millis(delay_ms);
        }
        Some(policy)
    }

    /// Backoff before attempt `attempt + 1`, without jitter (`attempt` starts at 1)
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.base_delay.saturating_mul(1u32 << exponent)
    }

    /// Backoff with a random jitter in `[0, max_jitter]`
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let jitter_ms = self.max_jitter.as_millis() as u64;
        let jitter = if jitter_ms == 0 {
            0
        } else {
            rand::rng().random_range(0..=jitter_ms)
        };
        self.backoff(attempt) + Duration::from_millis(jitter)
    }

    /// Runs `call` until it succeeds, fails with a non-transient error, or the
    /// attempts are exhausted. The last error is returned unchanged.
    pub async fn run<T, F, Fut>(&self, mut call: F) -> Result<T, AppError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        let mut attempt = 1;
        loop {
            match call().await {
                Err(err) if err.is_transient() && attempt < self.max_attempts => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        "Transient failure (attempt {}/{}): {}. Retrying in {:?}",
                        attempt, self.max_attempts, err, delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}
