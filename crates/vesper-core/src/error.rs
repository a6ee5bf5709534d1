use thiserror::Error;
use vesper_api::types::RecipientId;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SendError {
    #[error("unregistered recipient")]
    Unregistered,
    #[error("network {0}")]
    Network(String),
    #[error("server {0}")]
    Server(u16),
    #[error("rate limited")]
    RateLimited,
}

impl SendError {
    pub fn is_unregistered(&self) -> bool {
        matches!(self, SendError::Unregistered)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecipientSendError {
    pub recipient: RecipientId,
    pub error: SendError,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("validation {0}")]
    Validation(String),
    #[error("untrusted recipients")]
    UntrustedRecipients(Vec<RecipientId>),
    #[error(transparent)]
    Send(#[from] SendError),
    #[error("send failed for {} recipients", .0.len())]
    MultiSend(Vec<RecipientSendError>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    RunnerAbandoned,
    SharingDisabled,
    NoProfileKey,
    ConversationMissing,
    NotAccepted,
    RecipientUnregistered,
    ConversationBlocked,
}
