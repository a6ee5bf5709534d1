use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RunnerConfig {
    pub tick_interval_ms: u64,
    pub attempt_budget_ms: u64,
    pub batch_size: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 250,
            attempt_budget_ms: 30_000,
            batch_size: 8,
        }
    }
}
