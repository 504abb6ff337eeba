//! Settings modal
//!
//! Global bot settings plus the per-platform whitelist tabs.

use std::sync::Arc;

use crate::error::ConsoleResult;
use crate::services::{ClickTarget, ConsoleContext, ModalController, SettingsAggregator};
use crate::traits::{ModalView, SettingsForm, TabView};
use crate::types::{GlobalSettings, Platform};

use super::WhitelistPanel;

const SAVED: &str = "Настройки сохранены";

/// Views of the settings modal
pub struct SettingsViews {
    pub modal: Arc<dyn ModalView>,
    pub tabs: Arc<dyn TabView>,
    pub form: Arc<dyn SettingsForm>,
}

/// Settings modal workflow
pub struct SettingsModal {
    ctx: Arc<ConsoleContext>,
    modal: ModalController,
    tabs: Arc<dyn TabView>,
    aggregator: SettingsAggregator,
    whitelist: Arc<WhitelistPanel>,
}

impl SettingsModal {
    #[must_use]
    pub fn new(ctx: Arc<ConsoleContext>, views: SettingsViews, whitelist: Arc<WhitelistPanel>) -> Self {
        Self {
            modal: ModalController::new("settings", views.modal, ctx.page.clone(), ctx.modal_timing),
            aggregator: SettingsAggregator::new(ctx.api.clone(), views.form),
            tabs: views.tabs,
            whitelist,
            ctx,
        }
    }

    pub fn modal(&self) -> &ModalController {
        &self.modal
    }

    /// Open on the last used tab and load the settings
    ///
    /// Both loads are attempted; the first failure is returned.
    pub async fn open(&self) -> ConsoleResult<GlobalSettings> {
        self.modal.show().await;
        let whitelist = self.switch_tab(self.ctx.session.settings_tab()).await;
        let settings = self.aggregator.load().await;
        whitelist?;
        settings
    }

    /// Activate a platform tab and load its whitelist
    pub async fn switch_tab(&self, platform: Platform) -> ConsoleResult<()> {
        self.ctx.session.set_settings_tab(platform);
        self.tabs.activate_tab(platform);
        self.whitelist.refresh(platform).await.map(|_| ())
    }

    pub async fn load(&self) -> ConsoleResult<GlobalSettings> {
        self.aggregator.load().await
    }

    /// Save the whole settings object and close the modal
    pub async fn save(&self) -> ConsoleResult<GlobalSettings> {
        let settings = self.aggregator.save().await?;
        self.ctx.notices.success(SAVED);
        self.modal.hide().await;
        Ok(settings)
    }

    pub async fn close(&self, target: ClickTarget) {
        self.modal.dismiss(target).await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::{ModalPhase, NUMERIC_FALLBACK};
    use crate::test_utils::{sample_settings, Harness};
    use crate::types::{FieldValue, SettingsField};

    #[tokio::test]
    async fn open_loads_last_tab_and_settings() {
        let h = Harness::new();
        h.server.seed_whitelist(Platform::Discord, "42", None, true);
        h.ctx.session.set_settings_tab(Platform::Discord);

        let settings = h.console.settings.open().await.unwrap();

        assert_eq!(settings, sample_settings());
        assert_eq!(h.views.tabs.active(), vec![Platform::Discord]);
        assert_eq!(h.views.discord_list.texts().len(), 1);
        assert_eq!(
            h.views.settings_form.value(SettingsField::TelegramMemoryLimit),
            Some(FieldValue::Number(sample_settings().telegram.memory_limit))
        );
        assert_eq!(h.console.settings.modal().phase(), ModalPhase::Open);
    }

    #[tokio::test]
    async fn switch_tab_is_remembered() {
        let h = Harness::new();
        h.console.settings.switch_tab(Platform::Discord).await.unwrap();
        assert_eq!(h.ctx.session.settings_tab(), Platform::Discord);
    }

    #[tokio::test]
    async fn save_without_edits_submits_loaded_object_and_closes() {
        let h = Harness::new();
        let loaded = h.console.settings.open().await.unwrap();

        let saved = h.console.settings.save().await.unwrap();

        assert_eq!(saved, loaded);
        assert_eq!(h.server.settings(), loaded);
        assert_eq!(h.notifier.successes(), vec![SAVED.to_string()]);
        assert_eq!(h.console.settings.modal().phase(), ModalPhase::Closed);
        assert!(!h.views.page.locked());
    }

    #[tokio::test]
    async fn edited_fields_are_sent() {
        let h = Harness::new();
        h.console.settings.open().await.unwrap();
        h.views
            .settings_form
            .write_flag(SettingsField::DiscordMusicEnabled, false);
        h.views.settings_form.set_text(SettingsField::DiscordSeekTime, "abc");

        let saved = h.console.settings.save().await.unwrap();

        assert!(!saved.discord.music_enabled);
        assert_eq!(saved.discord.seek_time, NUMERIC_FALLBACK);
    }

    #[tokio::test]
    async fn failed_save_keeps_modal_open() {
        let h = Harness::new();
        h.console.settings.open().await.unwrap();
        h.server.fail_next(400, "bad settings");

        assert!(h.console.settings.save().await.is_err());
        assert_eq!(h.console.settings.modal().phase(), ModalPhase::Open);
        assert_eq!(h.server.settings(), sample_settings());
    }
}
