use crate::types::*;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("empty field {0}")]
    Empty(&'static str),
    #[error("too many {0}")]
    TooMany(&'static str),
    #[error("invalid count {0}")]
    InvalidCount(&'static str),
    #[error("revision outside group v2")]
    RevisionOutsideGroupV2,
}

pub fn validate_recipient_id(id: &RecipientId) -> Result<(), ValidationError> {
    if id.value.trim().is_empty() {
        return Err(ValidationError::Empty("recipient_id"));
    }
    Ok(())
}

pub fn validate_conversation(
    conversation: &ConversationRef,
    limits: &ValidationLimits,
) -> Result<(), ValidationError> {
    if conversation.id.value.trim().is_empty() {
        return Err(ValidationError::Empty("conversation_id"));
    }
    for recipient in conversation.recipients.iter() {
        validate_recipient_id(&recipient.id)?;
    }
    match conversation.kind {
        ConversationKind::Direct => {
            if conversation.recipients.len() != 1 {
                return Err(ValidationError::InvalidCount("recipients"));
            }
            if conversation.revision.is_some() {
                return Err(ValidationError::RevisionOutsideGroupV2);
            }
        }
        ConversationKind::GroupV1 => {
            if conversation.recipients.is_empty() {
                return Err(ValidationError::Empty("recipients"));
            }
            if conversation.recipients.len() > limits.max_group_members {
                return Err(ValidationError::TooMany("recipients"));
            }
            if conversation.revision.is_some() {
                return Err(ValidationError::RevisionOutsideGroupV2);
            }
        }
        ConversationKind::GroupV2 => {
            if conversation.recipients.is_empty() {
                return Err(ValidationError::Empty("recipients"));
            }
            if conversation.recipients.len() > limits.max_group_members {
                return Err(ValidationError::TooMany("recipients"));
            }
        }
    }
    Ok(())
}
