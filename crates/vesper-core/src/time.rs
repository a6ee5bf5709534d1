use std::time::{SystemTime, UNIX_EPOCH};

pub fn now_ms() -> u64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_millis() as u64,
        Err(_) => 0,
    }
}

#[derive(Clone, Debug)]
pub struct AttemptBudget {
    started_ms: u64,
    budget_ms: u64,
}

impl AttemptBudget {
    pub fn start(budget_ms: u64) -> Self {
        Self {
            started_ms: now_ms(),
            budget_ms,
        }
    }

    pub fn remaining_ms(&self) -> u64 {
        let elapsed = now_ms().saturating_sub(self.started_ms);
        self.budget_ms.saturating_sub(elapsed)
    }

    pub fn exhausted(&self) -> bool {
        self.remaining_ms() == 0
    }
}
