use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use vesper_api::types::{ConversationId, ConversationRef, RecipientId};

#[async_trait]
pub trait ConversationStore: Send + Sync {
    async fn conversation(&self, id: &ConversationId) -> Option<ConversationRef>;
}

#[derive(Clone, Default)]
pub struct InMemoryConversationStore {
    inner: Arc<Mutex<HashMap<String, ConversationRef>>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn upsert(&self, conversation: ConversationRef) {
        let mut guard = self.inner.lock().await;
        guard.insert(conversation.id.value.clone(), conversation);
    }

    pub async fn set_sharing_enabled(&self, id: &ConversationId, enabled: bool) {
        let mut guard = self.inner.lock().await;
        if let Some(conversation) = guard.get_mut(&id.value) {
            conversation.sharing_enabled = enabled;
        }
    }

    pub async fn set_blocked(&self, id: &ConversationId, blocked: bool) {
        let mut guard = self.inner.lock().await;
        if let Some(conversation) = guard.get_mut(&id.value) {
            conversation.blocked = blocked;
        }
    }

    pub async fn set_accepted(&self, id: &ConversationId, accepted: bool) {
        let mut guard = self.inner.lock().await;
        if let Some(conversation) = guard.get_mut(&id.value) {
            conversation.accepted = accepted;
        }
    }

    pub async fn set_revision(&self, id: &ConversationId, revision: Option<u32>) {
        let mut guard = self.inner.lock().await;
        if let Some(conversation) = guard.get_mut(&id.value) {
            conversation.revision = revision;
        }
    }

    pub async fn set_trusted(&self, id: &ConversationId, recipient: &RecipientId, trusted: bool) {
        let mut guard = self.inner.lock().await;
        if let Some(conversation) = guard.get_mut(&id.value) {
            for entry in conversation.recipients.iter_mut() {
                if &entry.id == recipient {
                    entry.trusted = trusted;
                }
            }
        }
    }

    pub async fn set_registered(
        &self,
        id: &ConversationId,
        recipient: &RecipientId,
        registered: bool,
    ) {
        let mut guard = self.inner.lock().await;
        if let Some(conversation) = guard.get_mut(&id.value) {
            for entry in conversation.recipients.iter_mut() {
                if &entry.id == recipient {
                    entry.registered = registered;
                }
            }
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn conversation(&self, id: &ConversationId) -> Option<ConversationRef> {
        let guard = self.inner.lock().await;
        guard.get(&id.value).cloned()
    }
}
