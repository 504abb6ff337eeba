//! Per-connection prompt types

use serde::{Deserialize, Serialize};

use super::Id;

/// System prompt owned by one connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: Id,
    /// Owner; the per-connection list endpoint leaves it out
    #[serde(default)]
    pub connection_id: Option<Id>,
    pub name: String,
    pub content: String,
    #[serde(default)]
    pub is_active: bool,
}

impl Prompt {
    pub fn to_draft(&self) -> PromptDraft {
        PromptDraft {
            name: self.name.clone(),
            content: self.content.clone(),
        }
    }
}

/// Prompt form values
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PromptDraft {
    pub name: String,
    pub content: String,
}

/// Prompt request body
///
/// `is_active` is only sent on create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptPayload {
    pub name: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl PromptDraft {
    pub fn to_create_payload(&self) -> PromptPayload {
        PromptPayload {
            name: self.name.clone(),
            content: self.content.clone(),
            is_active: Some(false),
        }
    }

    pub fn to_update_payload(&self) -> PromptPayload {
        PromptPayload {
            name: self.name.clone(),
            content: self.content.clone(),
            is_active: None,
        }
    }
}
