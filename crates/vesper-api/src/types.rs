use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConversationId {
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecipientId {
    pub value: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum ConversationKind {
    Direct,
    GroupV1,
    GroupV2,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecipientRef {
    pub id: RecipientId,
    pub registered: bool,
    pub trusted: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConversationRef {
    pub id: ConversationId,
    pub kind: ConversationKind,
    pub sharing_enabled: bool,
    pub blocked: bool,
    pub accepted: bool,
    pub recipients: Vec<RecipientRef>,
    pub revision: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationLimits {
    pub max_group_members: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_group_members: 1000,
        }
    }
}

impl ConversationId {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl RecipientId {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl ConversationKind {
    pub fn is_group(&self) -> bool {
        matches!(self, ConversationKind::GroupV1 | ConversationKind::GroupV2)
    }
}

