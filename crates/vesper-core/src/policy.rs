use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_initial_ms: u64,
    pub backoff_max_ms: u64,
    pub retry_time_floor_ms: u64,
    pub give_up_after_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            backoff_initial_ms: 1000,
            backoff_max_ms: 60_000,
            retry_time_floor_ms: 0,
            give_up_after_ms: 24 * 60 * 60 * 1000,
        }
    }
}

impl RetryPolicy {
    pub fn retry_worthwhile(&self, time_remaining_ms: u64) -> bool {
        time_remaining_ms > self.retry_time_floor_ms
    }

    pub fn is_final_attempt(&self, attempt: u32) -> bool {
        attempt >= self.max_attempts
    }

    pub fn next_retry_delay_ms(&self, tries: u32) -> u64 {
        let factor = 1u64 << (tries.saturating_sub(1).min(16));
        let base = self.backoff_initial_ms.saturating_mul(factor);
        let capped = base.min(self.backoff_max_ms);
        let jitter = rand::thread_rng().gen_range(0..=capped / 2 + 1);
        capped.saturating_add(jitter)
    }
}
