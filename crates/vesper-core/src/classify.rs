use crate::error::DispatchError;
use crate::job::JobContext;
use crate::policy::RetryPolicy;
use crate::transport::{SendTarget, TransportFailure};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Ignore,
    Retry(DispatchError),
    Fail(DispatchError),
}

pub fn classify(
    failure: TransportFailure,
    target: &SendTarget,
    ctx: &JobContext,
    policy: &RetryPolicy,
) -> Decision {
    let all_unregistered = match &failure {
        TransportFailure::Fatal(error) => error.is_unregistered(),
        TransportFailure::PerRecipient(errors) => {
            !errors.is_empty() && errors.iter().all(|e| e.error.is_unregistered())
        }
    };
    if all_unregistered && target.is_group() {
        return Decision::Ignore;
    }
    let cause = match failure {
        TransportFailure::Fatal(error) => DispatchError::Send(error),
        TransportFailure::PerRecipient(errors) => DispatchError::MultiSend(errors),
    };
    if !ctx.is_final_attempt && policy.retry_worthwhile(ctx.time_remaining_ms) {
        Decision::Retry(cause)
    } else {
        Decision::Fail(cause)
    }
}
