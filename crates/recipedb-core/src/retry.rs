//! Bounded retry with exponential backoff for rate-limited external calls.
//!
//! Wraps any synchronous external call classified as transient-failure-prone
//! (vision extraction, embedding generation). This is the sole retry
//! boundary: an error surfacing from [`RetryPolicy::run`] is the final,
//! user-visible failure for that call. Backoff waits block the calling
//! thread for their full duration; a wait cannot be interrupted.

use std::time::Duration;

use tracing::warn;

use crate::error::{classify, ErrorKind};

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Backoff for attempt index `i` is `base_delay * 2^i` (2s, 4s, ...).
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 3, base_delay: Duration::from_secs(2) }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self { max_attempts, base_delay }
    }

    /// Wait before the retry following failed attempt `attempt_index`
    /// (0-based).
    pub fn backoff_delay(&self, attempt_index: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt_index)
    }

    /// Run `op` up to `max_attempts` times. Each failure is classified once
    /// from its description: transient errors back off and retry, permanent
    /// errors propagate immediately, and the last error propagates unchanged
    /// once attempts are exhausted.
    pub fn run<T>(&self, mut op: impl FnMut() -> anyhow::Result<T>) -> anyhow::Result<T> {
        let mut attempt = 0u32;
        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(err) => {
                    let last = attempt + 1 >= self.max_attempts;
                    if last || classify(&err) == ErrorKind::Permanent {
                        return Err(err);
                    }
                    let delay = self.backoff_delay(attempt);
                    warn!(attempt, delay_ms = delay.as_millis() as u64, error = %err, "transient failure, backing off");
                    std::thread::sleep(delay);
                    attempt += 1;
                }
            }
        }
    }
}
