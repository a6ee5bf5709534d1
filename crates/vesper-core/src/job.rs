use crate::classify::{classify, Decision};
use crate::conversation::ConversationStore;
use crate::dispatch::{build_dispatch, serialize_payload};
use crate::error::{DispatchError, SkipReason};
use crate::gate::{check_eligibility, Gated};
use crate::notify::Notifier;
use crate::policy::RetryPolicy;
use crate::profile_key::ProfileKeyProvider;
use crate::transport::Transport;
use crate::trust::{direct_skip_reason, validate_trust, TrustVerdict};
use std::sync::Arc;
use tracing::{debug, warn};
use vesper_api::types::{ConversationId, ValidationLimits};
use vesper_api::validation::validate_conversation;

#[derive(Clone, Debug)]
pub struct JobContext {
    pub attempt: u32,
    pub is_final_attempt: bool,
    pub should_continue: bool,
    pub timestamp: u64,
    pub time_remaining_ms: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobFailure {
    pub retryable: bool,
    pub error: DispatchError,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JobOutcome {
    Succeeded,
    Skipped(SkipReason),
    Failed(JobFailure),
}

#[derive(Clone)]
pub struct SendJob {
    conversations: Arc<dyn ConversationStore>,
    keys: Arc<dyn ProfileKeyProvider>,
    transport: Arc<dyn Transport>,
    notifier: Arc<dyn Notifier>,
    policy: RetryPolicy,
    limits: ValidationLimits,
}

impl SendJob {
    pub fn new(
        conversations: Arc<dyn ConversationStore>,
        keys: Arc<dyn ProfileKeyProvider>,
        transport: Arc<dyn Transport>,
        notifier: Arc<dyn Notifier>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            conversations,
            keys,
            transport,
            notifier,
            policy,
            limits: ValidationLimits::default(),
        }
    }

    pub async fn run(&self, conversation_id: &ConversationId, ctx: &JobContext) -> JobOutcome {
        let Some(conversation) = self.conversations.conversation(conversation_id).await else {
            debug!(conversation = %conversation_id.value, "conversation missing, dropping job");
            return JobOutcome::Skipped(SkipReason::ConversationMissing);
        };
        if let Err(error) = validate_conversation(&conversation, &self.limits) {
            return JobOutcome::Failed(JobFailure {
                retryable: false,
                error: DispatchError::Validation(error.to_string()),
            });
        }
        let key = match check_eligibility(ctx, &conversation, self.keys.as_ref()) {
            Gated::Skip(reason) => return JobOutcome::Skipped(reason),
            Gated::Proceed(key) => key,
        };
        if let TrustVerdict::Untrusted(untrusted) = validate_trust(&conversation.recipients) {
            warn!(
                conversation = %conversation.id.value,
                untrusted = untrusted.len(),
                "dispatch blocked by untrusted recipients"
            );
            self.notifier
                .blocked_by_untrusted_recipients(&conversation.id, &untrusted);
            return JobOutcome::Failed(JobFailure {
                retryable: false,
                error: DispatchError::UntrustedRecipients(untrusted),
            });
        }
        if let Some(reason) = direct_skip_reason(&conversation) {
            debug!(conversation = %conversation.id.value, ?reason, "recipient not eligible");
            return JobOutcome::Skipped(reason);
        }
        let dispatch = match build_dispatch(&conversation, &key, ctx.timestamp) {
            Ok(dispatch) => dispatch,
            Err(error) => {
                return JobOutcome::Failed(JobFailure {
                    retryable: false,
                    error,
                })
            }
        };
        let bytes = match serialize_payload(&dispatch.payload) {
            Ok(bytes) => bytes,
            Err(error) => {
                return JobOutcome::Failed(JobFailure {
                    retryable: false,
                    error,
                })
            }
        };
        match self.transport.send(&dispatch.target, &bytes).await {
            Ok(report) => {
                debug!(
                    conversation = %conversation.id.value,
                    delivered = report.delivered,
                    "key update dispatched"
                );
                JobOutcome::Succeeded
            }
            Err(failure) => match classify(failure, &dispatch.target, ctx, &self.policy) {
                Decision::Ignore => {
                    debug!(
                        conversation = %conversation.id.value,
                        "all failures were unregistered group members, ignoring"
                    );
                    JobOutcome::Succeeded
                }
                Decision::Retry(error) => JobOutcome::Failed(JobFailure {
                    retryable: true,
                    error,
                }),
                Decision::Fail(error) => JobOutcome::Failed(JobFailure {
                    retryable: false,
                    error,
                }),
            },
        }
    }
}
