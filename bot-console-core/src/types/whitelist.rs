//! Chat whitelist types

use serde::{Deserialize, Serialize};

use super::{Id, Platform};

/// Whitelisted chat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistEntry {
    pub id: Id,
    pub chat_id: String,
    #[serde(default)]
    pub platform: Option<Platform>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Whitelist form values for one platform tab
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WhitelistDraft {
    pub chat_id: String,
    pub title: String,
}

/// Whitelist create body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWhitelistEntry {
    pub chat_id: String,
    pub platform: Platform,
    pub title: String,
}

impl NewWhitelistEntry {
    /// Build the create body from trimmed form values
    ///
    /// Returns `None` when the chat id is blank.
    pub fn from_draft(platform: Platform, draft: &WhitelistDraft) -> Option<Self> {
        let chat_id = draft.chat_id.trim();
        if chat_id.is_empty() {
            return None;
        }
        let title = draft.title.trim();
        Some(Self {
            chat_id: chat_id.to_string(),
            platform,
            title: if title.is_empty() {
                platform.default_title(chat_id)
            } else {
                title.to_string()
            },
        })
    }
}

/// Whitelist toggle body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleRequest {
    pub is_active: bool,
}
