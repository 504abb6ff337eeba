//! Chat history panel

use std::sync::Arc;

use crate::error::ConsoleResult;
use crate::render::templates::{chat_row, CHATS_PLACEHOLDER};
use crate::render::ListRenderer;
use crate::services::{routes, ConsoleContext};
use crate::traits::{ListView, TextSlot};
use crate::types::{ChatSummary, HistoryStats, HttpMethod, Platform};

const CLEAR_ALL_QUESTION: &str = "Вы уверены, что хотите удалить ВСЮ историю?";
const CLEAR_CHAT_QUESTION: &str = "Удалить этот чат?";

/// Views of the history panel
pub struct HistoryViews {
    pub list: Arc<dyn ListView>,
    pub stats: Arc<dyn TextSlot>,
}

/// One-line summary of the counters
pub fn stats_line(stats: &HistoryStats) -> String {
    format!(
        "Чатов: {} · Сообщений: {} (Telegram {}, Discord {}) · За 24ч: {} в {} чатах",
        stats.chats_count,
        stats.total_messages,
        stats.telegram_messages,
        stats.discord_messages,
        stats.messages_24h,
        stats.active_chats_24h,
    )
}

/// History panel workflow
pub struct HistoryPanel {
    ctx: Arc<ConsoleContext>,
    renderer: ListRenderer<ChatSummary>,
    stats: Arc<dyn TextSlot>,
}

impl HistoryPanel {
    #[must_use]
    pub fn new(ctx: Arc<ConsoleContext>, views: HistoryViews) -> Self {
        Self {
            ctx,
            renderer: ListRenderer::new(views.list, chat_row, CHATS_PLACEHOLDER),
            stats: views.stats,
        }
    }

    /// Load the counters and the chat list
    pub async fn refresh(&self) -> ConsoleResult<(HistoryStats, Vec<ChatSummary>)> {
        let stats: HistoryStats = self.ctx.api.fetch(routes::STATS).await?;
        self.stats.set_text(&stats_line(&stats));
        let chats: Vec<ChatSummary> = self.ctx.api.fetch(routes::CHATS).await?;
        self.renderer.render(&chats);
        Ok((stats, chats))
    }

    /// Wipe all history, then reload the page; `Ok(false)` if declined
    pub async fn clear_all(&self) -> ConsoleResult<bool> {
        if !self.ctx.confirm(CLEAR_ALL_QUESTION).await {
            return Ok(false);
        }
        self.ctx.api.call(routes::CLEAR_ALL, HttpMethod::Post).await?;
        self.ctx.navigator.reload();
        Ok(true)
    }

    /// Wipe one chat, then reload the page; `Ok(false)` if declined
    pub async fn clear_chat(&self, chat_id: i64, platform: Platform) -> ConsoleResult<bool> {
        if !self.ctx.confirm(CLEAR_CHAT_QUESTION).await {
            return Ok(false);
        }
        self.ctx
            .api
            .call(&routes::clear_chat(chat_id, platform), HttpMethod::Post)
            .await?;
        self.ctx.navigator.reload();
        Ok(true)
    }
}
