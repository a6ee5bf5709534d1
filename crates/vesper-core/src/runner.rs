use crate::config::RunnerConfig;
use crate::error::DispatchError;
use crate::ids::JobId;
use crate::job::{JobContext, JobFailure, JobOutcome, SendJob};
use crate::policy::RetryPolicy;
use crate::time::{now_ms, AttemptBudget};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;
use vesper_api::types::ConversationId;

#[derive(Clone, Debug)]
pub struct QueuedJob {
    pub id: JobId,
    pub conversation_id: ConversationId,
    pub created_at_ms: u64,
    pub next_attempt_ms: u64,
    pub tries: u32,
}

#[derive(Clone)]
pub struct JobRunner {
    job: Arc<SendJob>,
    config: RunnerConfig,
    policy: RetryPolicy,
    queue: Arc<Mutex<Vec<QueuedJob>>>,
    failures: Arc<Mutex<Vec<(JobId, DispatchError)>>>,
}

impl JobRunner {
    pub fn new(job: Arc<SendJob>, config: RunnerConfig, policy: RetryPolicy) -> Self {
        Self {
            job,
            config,
            policy,
            queue: Arc::new(Mutex::new(Vec::new())),
            failures: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn enqueue(&self, conversation_id: ConversationId) -> JobId {
        let id = Uuid::new_v4();
        let now = now_ms();
        let mut guard = self.queue.lock().await;
        guard.push(QueuedJob {
            id,
            conversation_id,
            created_at_ms: now,
            next_attempt_ms: now,
            tries: 0,
        });
        id
    }

    pub async fn pending(&self) -> Vec<QueuedJob> {
        self.queue.lock().await.clone()
    }

    pub async fn terminal_failures(&self) -> Vec<(JobId, DispatchError)> {
        self.failures.lock().await.clone()
    }

    pub async fn run_due(&self, now: u64) -> usize {
        let due: Vec<QueuedJob> = {
            let guard = self.queue.lock().await;
            guard
                .iter()
                .filter(|entry| entry.next_attempt_ms <= now)
                .take(self.config.batch_size)
                .cloned()
                .collect()
        };
        let mut processed = 0;
        for entry in due {
            let attempt = entry.tries.saturating_add(1);
            let should_continue =
                now.saturating_sub(entry.created_at_ms) <= self.policy.give_up_after_ms;
            let budget = AttemptBudget::start(self.config.attempt_budget_ms);
            let ctx = JobContext {
                attempt,
                is_final_attempt: self.policy.is_final_attempt(attempt),
                should_continue,
                timestamp: now_ms(),
                time_remaining_ms: budget.remaining_ms(),
            };
            let outcome = self.job.run(&entry.conversation_id, &ctx).await;
            processed += 1;
            match outcome {
                JobOutcome::Succeeded | JobOutcome::Skipped(_) => {
                    self.remove(&entry.id).await;
                }
                JobOutcome::Failed(JobFailure {
                    retryable: true, ..
                }) => {
                    let delay = self.policy.next_retry_delay_ms(attempt);
                    debug!(job = %entry.id, attempt, delay_ms = delay, "requeueing job");
                    self.bump(&entry.id, attempt, now.saturating_add(delay)).await;
                }
                JobOutcome::Failed(JobFailure {
                    retryable: false,
                    error,
                }) => {
                    warn!(job = %entry.id, attempt, %error, "job failed permanently");
                    self.remove(&entry.id).await;
                    self.failures.lock().await.push((entry.id, error));
                }
            }
        }
        processed
    }

    pub fn start(&self) {
        let cloned = self.clone();
        let interval_ms = self.config.tick_interval_ms;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_millis(interval_ms));
            loop {
                ticker.tick().await;
                let _ = cloned.run_due(now_ms()).await;
            }
        });
    }

    async fn remove(&self, id: &JobId) {
        let mut guard = self.queue.lock().await;
        guard.retain(|entry| &entry.id != id);
    }

    async fn bump(&self, id: &JobId, tries: u32, next_attempt_ms: u64) {
        let mut guard = self.queue.lock().await;
        for entry in guard.iter_mut() {
            if &entry.id == id {
                entry.tries = tries;
                entry.next_attempt_ms = next_attempt_ms;
            }
        }
    }
}
