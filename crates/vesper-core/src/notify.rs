use tokio::sync::broadcast;
use vesper_api::types::{ConversationId, RecipientId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockedNotice {
    pub conversation_id: ConversationId,
    pub untrusted: Vec<RecipientId>,
}

pub type NoticeReceiver = broadcast::Receiver<BlockedNotice>;

pub trait Notifier: Send + Sync {
    fn blocked_by_untrusted_recipients(
        &self,
        conversation_id: &ConversationId,
        untrusted: &[RecipientId],
    );
}

#[derive(Clone)]
pub struct NoticeBus {
    tx: broadcast::Sender<BlockedNotice>,
}

impl NoticeBus {
    pub fn new(size: usize) -> Self {
        let (tx, _) = broadcast::channel(size);
        Self { tx }
    }

    pub fn subscribe(&self) -> NoticeReceiver {
        self.tx.subscribe()
    }
}

impl Notifier for NoticeBus {
    fn blocked_by_untrusted_recipients(
        &self,
        conversation_id: &ConversationId,
        untrusted: &[RecipientId],
    ) {
        let _ = self.tx.send(BlockedNotice {
            conversation_id: conversation_id.clone(),
            untrusted: untrusted.to_vec(),
        });
    }
}

pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn blocked_by_untrusted_recipients(
        &self,
        _conversation_id: &ConversationId,
        _untrusted: &[RecipientId],
    ) {
    }
}
