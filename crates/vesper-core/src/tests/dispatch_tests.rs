use super::{direct_conversation, group_conversation, user_hex, KEY_BYTES};
use crate::dispatch::{build_dispatch, deserialize_payload, serialize_payload, WirePayload};
use crate::error::DispatchError;
use crate::profile_key::ProfileKey;
use crate::transport::{GroupAddress, SendTarget};
use vesper_api::types::{ConversationKind, RecipientId};

const TIMESTAMP: u64 = 1_700_000_000_000;

fn key() -> ProfileKey {
    ProfileKey::from_bytes(KEY_BYTES)
}

#[test]
fn direct_target_is_individual() {
    let conversation = direct_conversation(2);

    let dispatch = build_dispatch(&conversation, &key(), TIMESTAMP).expect("dispatch");

    assert_eq!(
        dispatch.target,
        SendTarget::Individual {
            conversation_id: conversation.id.clone(),
            recipient: RecipientId::new(user_hex(2)),
        }
    );
    let WirePayload::ProfileKeyUpdate(update) = &dispatch.payload;
    assert_eq!(update.profile_key, KEY_BYTES.to_vec());
    assert_eq!(update.timestamp, TIMESTAMP);
}

#[test]
fn group_v2_carries_revision() {
    let conversation =
        group_conversation("group-r5", ConversationKind::GroupV2, &[2, 3, 4], Some(5));

    let dispatch = build_dispatch(&conversation, &key(), TIMESTAMP).expect("dispatch");

    match dispatch.target {
        SendTarget::GroupFanout { members, group } => {
            assert_eq!(members.len(), 3);
            assert_eq!(
                group,
                GroupAddress::V2 {
                    group_id: conversation.id.clone(),
                    revision: Some(5),
                }
            );
        }
        other => panic!("expected group fanout, got {:?}", other),
    }
}

#[test]
fn group_v2_without_revision_still_dispatches() {
    let conversation =
        group_conversation("group-anon", ConversationKind::GroupV2, &[2, 3], None);

    let dispatch = build_dispatch(&conversation, &key(), TIMESTAMP).expect("dispatch");

    match dispatch.target {
        SendTarget::GroupFanout { group, .. } => {
            assert_eq!(
                group,
                GroupAddress::V2 {
                    group_id: conversation.id.clone(),
                    revision: None,
                }
            );
        }
        other => panic!("expected group fanout, got {:?}", other),
    }
}

#[test]
fn group_v1_address_has_no_revision_slot() {
    let conversation = group_conversation("group-v1", ConversationKind::GroupV1, &[2, 3], None);

    let dispatch = build_dispatch(&conversation, &key(), TIMESTAMP).expect("dispatch");

    match dispatch.target {
        SendTarget::GroupFanout { members, group } => {
            assert_eq!(members.len(), 2);
            assert_eq!(
                group,
                GroupAddress::V1 {
                    group_id: conversation.id.clone(),
                }
            );
        }
        other => panic!("expected group fanout, got {:?}", other),
    }
}

#[test]
fn rejects_malformed_recipient_address() {
    let mut conversation = direct_conversation(2);
    conversation.recipients[0].id = RecipientId::new("not-a-hex-user-id");

    let err = build_dispatch(&conversation, &key(), TIMESTAMP);

    assert_eq!(
        err,
        Err(DispatchError::Validation("recipient_id".to_string()))
    );
}

#[test]
fn payload_roundtrip() {
    let conversation = direct_conversation(2);
    let dispatch = build_dispatch(&conversation, &key(), TIMESTAMP).expect("dispatch");

    let bytes = serialize_payload(&dispatch.payload).expect("serialize");
    let decoded = deserialize_payload(&bytes).expect("deserialize");

    assert_eq!(decoded, dispatch.payload);
}
