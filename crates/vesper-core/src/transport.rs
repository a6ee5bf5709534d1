use crate::error::{RecipientSendError, SendError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;
use vesper_api::types::{ConversationId, RecipientId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum GroupAddress {
    V1 {
        group_id: ConversationId,
    },
    V2 {
        group_id: ConversationId,
        revision: Option<u32>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum SendTarget {
    Individual {
        conversation_id: ConversationId,
        recipient: RecipientId,
    },
    GroupFanout {
        members: Vec<RecipientId>,
        group: GroupAddress,
    },
}

impl SendTarget {
    pub fn is_group(&self) -> bool {
        matches!(self, SendTarget::GroupFanout { .. })
    }

    pub fn recipient_count(&self) -> usize {
        match self {
            SendTarget::Individual { .. } => 1,
            SendTarget::GroupFanout { members, .. } => members.len(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SendReport {
    pub delivered: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportFailure {
    Fatal(SendError),
    PerRecipient(Vec<RecipientSendError>),
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        target: &SendTarget,
        payload: &[u8],
    ) -> Result<SendReport, TransportFailure>;
}

#[derive(Clone, Default)]
pub struct MockTransport {
    outcomes: Arc<Mutex<VecDeque<Result<SendReport, TransportFailure>>>>,
    sent: Arc<Mutex<Vec<(SendTarget, Vec<u8>)>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn script(&self, outcome: Result<SendReport, TransportFailure>) {
        let mut guard = self.outcomes.lock().await;
        guard.push_back(outcome);
    }

    pub async fn sent(&self) -> Vec<(SendTarget, Vec<u8>)> {
        self.sent.lock().await.clone()
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(
        &self,
        target: &SendTarget,
        payload: &[u8],
    ) -> Result<SendReport, TransportFailure> {
        let mut guard = self.sent.lock().await;
        guard.push((target.clone(), payload.to_vec()));
        drop(guard);
        let mut outcomes = self.outcomes.lock().await;
        match outcomes.pop_front() {
            Some(outcome) => outcome,
            None => Ok(SendReport {
                delivered: target.recipient_count() as u64,
            }),
        }
    }
}
