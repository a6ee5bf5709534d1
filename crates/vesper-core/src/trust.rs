use crate::error::SkipReason;
use vesper_api::types::{ConversationRef, RecipientId, RecipientRef};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrustVerdict {
    TrustedAll,
    Untrusted(Vec<RecipientId>),
}

pub fn validate_trust(recipients: &[RecipientRef]) -> TrustVerdict {
    let untrusted: Vec<RecipientId> = recipients
        .iter()
        .filter(|r| !r.trusted)
        .map(|r| r.id.clone())
        .collect();
    if untrusted.is_empty() {
        TrustVerdict::TrustedAll
    } else {
        TrustVerdict::Untrusted(untrusted)
    }
}

pub fn direct_skip_reason(conversation: &ConversationRef) -> Option<SkipReason> {
    if conversation.kind.is_group() {
        return None;
    }
    if !conversation.accepted {
        return Some(SkipReason::NotAccepted);
    }
    if conversation.recipients.iter().any(|r| !r.registered) {
        return Some(SkipReason::RecipientUnregistered);
    }
    if conversation.blocked {
        return Some(SkipReason::ConversationBlocked);
    }
    None
}
