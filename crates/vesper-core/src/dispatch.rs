use crate::error::DispatchError;
use crate::ids::UserId;
use crate::profile_key::ProfileKey;
use crate::transport::{GroupAddress, SendTarget};
use serde::{Deserialize, Serialize};
use tracing::warn;
use vesper_api::types::{ConversationKind, ConversationRef, RecipientId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyUpdate {
    pub profile_key: Vec<u8>,
    pub timestamp: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum WirePayload {
    ProfileKeyUpdate(KeyUpdate),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dispatch {
    pub target: SendTarget,
    pub payload: WirePayload,
}

pub fn build_dispatch(
    conversation: &ConversationRef,
    key: &ProfileKey,
    timestamp: u64,
) -> Result<Dispatch, DispatchError> {
    let payload = WirePayload::ProfileKeyUpdate(KeyUpdate {
        profile_key: key.as_bytes().to_vec(),
        timestamp,
    });
    let target = match conversation.kind {
        ConversationKind::Direct => {
            let recipient = conversation
                .recipients
                .first()
                .ok_or_else(|| DispatchError::Validation("recipient".to_string()))?;
            SendTarget::Individual {
                conversation_id: conversation.id.clone(),
                recipient: checked_address(&recipient.id)?,
            }
        }
        ConversationKind::GroupV1 => SendTarget::GroupFanout {
            members: member_addresses(conversation)?,
            group: GroupAddress::V1 {
                group_id: conversation.id.clone(),
            },
        },
        ConversationKind::GroupV2 => {
            if conversation.revision.is_none() {
                warn!(
                    conversation = %conversation.id.value,
                    "group v2 dispatch without revision"
                );
            }
            SendTarget::GroupFanout {
                members: member_addresses(conversation)?,
                group: GroupAddress::V2 {
                    group_id: conversation.id.clone(),
                    revision: conversation.revision,
                },
            }
        }
    };
    Ok(Dispatch { target, payload })
}

pub fn serialize_payload(payload: &WirePayload) -> Result<Vec<u8>, DispatchError> {
    serde_json::to_vec(payload).map_err(|e| DispatchError::Validation(e.to_string()))
}

pub fn deserialize_payload(bytes: &[u8]) -> Result<WirePayload, DispatchError> {
    serde_json::from_slice(bytes).map_err(|e| DispatchError::Validation(e.to_string()))
}

fn checked_address(id: &RecipientId) -> Result<RecipientId, DispatchError> {
    let user = UserId::from_hex(&id.value)
        .ok_or_else(|| DispatchError::Validation("recipient_id".to_string()))?;
    Ok(user.to_recipient_id())
}

fn member_addresses(conversation: &ConversationRef) -> Result<Vec<RecipientId>, DispatchError> {
    let mut members = Vec::with_capacity(conversation.recipients.len());
    for recipient in conversation.recipients.iter() {
        members.push(checked_address(&recipient.id)?);
    }
    Ok(members)
}
