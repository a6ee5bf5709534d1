use crate::error::SkipReason;
use crate::job::JobContext;
use crate::profile_key::{ProfileKey, ProfileKeyProvider};
use tracing::debug;
use vesper_api::types::ConversationRef;

#[derive(Clone, Debug)]
pub enum Gated {
    Proceed(ProfileKey),
    Skip(SkipReason),
}

pub fn check_eligibility(
    ctx: &JobContext,
    conversation: &ConversationRef,
    keys: &dyn ProfileKeyProvider,
) -> Gated {
    if !ctx.should_continue {
        debug!(conversation = %conversation.id.value, "runner abandoned job");
        return Gated::Skip(SkipReason::RunnerAbandoned);
    }
    if !conversation.sharing_enabled {
        debug!(conversation = %conversation.id.value, "sharing disabled since enqueue");
        return Gated::Skip(SkipReason::SharingDisabled);
    }
    match keys.profile_key() {
        Some(key) => Gated::Proceed(key),
        None => {
            debug!(conversation = %conversation.id.value, "no profile key available");
            Gated::Skip(SkipReason::NoProfileKey)
        }
    }
}
