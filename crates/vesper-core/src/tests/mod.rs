pub mod dispatch_tests;

use crate::conversation::InMemoryConversationStore;
use crate::ids::{conversation_id_for_dm, UserId};
use crate::job::{JobContext, SendJob};
use crate::notify::{BlockedNotice, Notifier};
use crate::policy::RetryPolicy;
use crate::profile_key::StaticKeyProvider;
use crate::transport::MockTransport;
use std::sync::{Arc, Mutex as StdMutex};
use vesper_api::types::{
    ConversationId, ConversationKind, ConversationRef, RecipientId, RecipientRef,
};

pub const LOCAL_SEED: u8 = 1;
pub const KEY_BYTES: [u8; 32] = [7u8; 32];

pub fn user_hex(seed: u8) -> String {
    hex::encode([seed; 32])
}

pub fn recipient(seed: u8) -> RecipientRef {
    RecipientRef {
        id: RecipientId::new(user_hex(seed)),
        registered: true,
        trusted: true,
    }
}

pub fn direct_conversation(seed: u8) -> ConversationRef {
    let local = UserId::from_bytes([LOCAL_SEED; 32]);
    let other = UserId::from_bytes([seed; 32]);
    ConversationRef {
        id: conversation_id_for_dm(&local, &other),
        kind: ConversationKind::Direct,
        sharing_enabled: true,
        blocked: false,
        accepted: true,
        recipients: vec![recipient(seed)],
        revision: None,
    }
}

pub fn group_conversation(
    label: &str,
    kind: ConversationKind,
    seeds: &[u8],
    revision: Option<u32>,
) -> ConversationRef {
    ConversationRef {
        id: ConversationId::new(label),
        kind,
        sharing_enabled: true,
        blocked: false,
        accepted: true,
        recipients: seeds.iter().map(|seed| recipient(*seed)).collect(),
        revision,
    }
}

pub fn context() -> JobContext {
    JobContext {
        attempt: 1,
        is_final_attempt: false,
        should_continue: true,
        timestamp: 1_700_000_000_000,
        time_remaining_ms: 30_000,
    }
}

#[derive(Clone, Default)]
pub struct CountingNotifier {
    notices: Arc<StdMutex<Vec<BlockedNotice>>>,
}

impl CountingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<BlockedNotice> {
        self.notices.lock().expect("notices lock").clone()
    }
}

impl Notifier for CountingNotifier {
    fn blocked_by_untrusted_recipients(
        &self,
        conversation_id: &ConversationId,
        untrusted: &[RecipientId],
    ) {
        let mut guard = self.notices.lock().expect("notices lock");
        guard.push(BlockedNotice {
            conversation_id: conversation_id.clone(),
            untrusted: untrusted.to_vec(),
        });
    }
}

pub struct Harness {
    pub store: InMemoryConversationStore,
    pub transport: MockTransport,
    pub notifier: CountingNotifier,
    pub job: SendJob,
}

pub fn harness() -> Harness {
    harness_with(StaticKeyProvider::with_key(KEY_BYTES), RetryPolicy::default())
}

pub fn harness_with(keys: StaticKeyProvider, policy: RetryPolicy) -> Harness {
    let store = InMemoryConversationStore::new();
    let transport = MockTransport::new();
    let notifier = CountingNotifier::new();
    let job = SendJob::new(
        Arc::new(store.clone()),
        Arc::new(keys),
        Arc::new(transport.clone()),
        Arc::new(notifier.clone()),
        policy,
    );
    Harness {
        store,
        transport,
        notifier,
        job,
    }
}
