//! Chat history statistics

use serde::{Deserialize, Serialize};

use super::Platform;

/// Message counters shown on the history panel
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryStats {
    pub chats_count: u64,
    pub total_messages: u64,
    pub telegram_messages: u64,
    pub discord_messages: u64,
    pub messages_24h: u64,
    pub active_chats_24h: u64,
    pub assistant_messages: u64,
    pub user_messages: u64,
}

/// One chat with stored history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSummary {
    pub chat_id: i64,
    pub platform: Platform,
    #[serde(default)]
    pub chat_type: Option<String>,
    #[serde(default)]
    pub message_count: u64,
    #[serde(default)]
    pub last_message_at: Option<String>,
}
