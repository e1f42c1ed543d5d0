use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Exponential backoff shared by transient-error retries and wait polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackoffPolicy {
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    /// Attempts per remote call, including the first one.
    pub max_attempts: u32,
}

impl BackoffPolicy {
    pub fn new(base: Duration, cap: Duration, max_attempts: u32) -> Self {
        Self {
            base_delay_ms: base.as_millis() as u64,
            max_delay_ms: cap.as_millis() as u64,
            max_attempts,
        }
    }

    /// Delay before retry number `attempt` (0 = first retry): base * 2^attempt,
    /// capped.
    pub fn delay(&self, attempt: u32) -> Duration {
        let ms = self
            .base_delay_ms
            .saturating_mul(2u64.saturating_pow(attempt))
            .min(self.max_delay_ms);
        Duration::from_millis(ms)
    }

    pub fn should_retry(&self, attempts_made: u32) -> bool {
        attempts_made < self.max_attempts
    }
}

impl Default for BackoffPolicy {
    /// 1s base, 30s cap, 5 attempts.
    fn default() -> Self {
        Self {
            base_delay_ms: 1_000,
            max_delay_ms: 30_000,
            max_attempts: 5,
        }
    }
}
