//! Whitelist panel
//!
//! One list and one add form per platform tab of the settings modal.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{ConsoleError, ConsoleResult};
use crate::render::templates::{whitelist_row, WHITELIST_PLACEHOLDER};
use crate::render::ListRenderer;
use crate::services::{
    routes, ApiClient, ConsoleContext, OptimisticToggle, ToggleOutcome, ToggleTarget,
};
use crate::traits::{FormView, ListView};
use crate::types::{
    HttpMethod, Id, NewWhitelistEntry, Platform, ToggleRequest, WhitelistDraft, WhitelistEntry,
};

const CHAT_ID_REQUIRED: &str = "Введите ID";
const ADDED: &str = "Добавлено в белый список";
const DELETE_QUESTION: &str = "Удалить из белого списка?";

/// List and add form of one platform tab
pub struct PlatformViews {
    pub list: Arc<dyn ListView>,
    pub form: Arc<dyn FormView<WhitelistDraft>>,
}

/// Views of both platform tabs
pub struct WhitelistViews {
    pub telegram: PlatformViews,
    pub discord: PlatformViews,
}

struct PlatformTab {
    renderer: ListRenderer<WhitelistEntry>,
    form: Arc<dyn FormView<WhitelistDraft>>,
}

/// Per-platform whitelist lists
pub struct WhitelistLists {
    api: Arc<ApiClient>,
    telegram: PlatformTab,
    discord: PlatformTab,
}

impl WhitelistLists {
    fn tab(&self, platform: Platform) -> &PlatformTab {
        match platform {
            Platform::Telegram => &self.telegram,
            Platform::Discord => &self.discord,
        }
    }

    pub async fn load(&self, platform: Platform) -> ConsoleResult<Vec<WhitelistEntry>> {
        let entries: Vec<WhitelistEntry> =
            self.api.fetch(&routes::whitelist_for(platform)).await?;
        self.tab(platform).renderer.render(&entries);
        Ok(entries)
    }
}

#[async_trait]
impl ToggleTarget for WhitelistLists {
    type Key = (Id, Platform);

    fn apply_local(&self, key: &(Id, Platform), on: bool) {
        let (id, platform) = *key;
        self.tab(platform).renderer.view().set_switch(id, on);
    }

    async fn commit(&self, key: &(Id, Platform), on: bool) -> ConsoleResult<()> {
        self.api
            .call_with(
                &routes::toggle_whitelist_entry(key.0),
                HttpMethod::Post,
                &ToggleRequest { is_active: on },
            )
            .await
            .map(|_| ())
    }

    async fn rollback(&self, key: &(Id, Platform)) {
        if let Err(e) = self.load(key.1).await {
            log::debug!("Whitelist rollback redraw failed: {e}");
        }
    }

    fn notice(&self, on: bool) -> &'static str {
        if on {
            "Включено"
        } else {
            "Отключено"
        }
    }
}

/// Whitelist workflow
pub struct WhitelistPanel {
    ctx: Arc<ConsoleContext>,
    toggle: OptimisticToggle<WhitelistLists>,
}

impl WhitelistPanel {
    #[must_use]
    pub fn new(ctx: Arc<ConsoleContext>, views: WhitelistViews) -> Self {
        let tab = |views: PlatformViews, platform: Platform| PlatformTab {
            renderer: ListRenderer::new(
                views.list,
                move |entry: &WhitelistEntry| whitelist_row(entry, platform),
                WHITELIST_PLACEHOLDER,
            ),
            form: views.form,
        };
        let lists = WhitelistLists {
            api: ctx.api.clone(),
            telegram: tab(views.telegram, Platform::Telegram),
            discord: tab(views.discord, Platform::Discord),
        };
        let toggle = OptimisticToggle::new(lists, ctx.notices.clone());
        Self { ctx, toggle }
    }

    fn lists(&self) -> &WhitelistLists {
        self.toggle.target()
    }

    pub async fn refresh(&self, platform: Platform) -> ConsoleResult<Vec<WhitelistEntry>> {
        self.lists().load(platform).await
    }

    /// Add the chat typed into the platform's form
    pub async fn add(&self, platform: Platform) -> ConsoleResult<()> {
        let form = &self.lists().tab(platform).form;
        let Some(entry) = NewWhitelistEntry::from_draft(platform, &form.read()) else {
            self.ctx.notices.error(CHAT_ID_REQUIRED);
            return Err(ConsoleError::Validation(CHAT_ID_REQUIRED.to_string()));
        };

        self.ctx
            .api
            .call_with(routes::WHITELIST, HttpMethod::Post, &entry)
            .await?;
        form.write(&WhitelistDraft::default());
        if let Err(e) = self.refresh(platform).await {
            log::debug!("Whitelist refresh after add failed: {e}");
        }
        self.ctx.notices.success(ADDED);
        Ok(())
    }

    /// Delete after confirmation; `Ok(false)` if declined
    pub async fn delete(&self, id: Id, platform: Platform) -> ConsoleResult<bool> {
        if !self.ctx.confirm(DELETE_QUESTION).await {
            return Ok(false);
        }
        self.ctx
            .api
            .call(&routes::whitelist_entry(id), HttpMethod::Delete)
            .await?;
        if let Err(e) = self.refresh(platform).await {
            log::debug!("Whitelist refresh after delete failed: {e}");
        }
        Ok(true)
    }

    /// Optimistically switch an entry on or off
    pub async fn toggle(&self, id: Id, active: bool, platform: Platform) -> ToggleOutcome {
        self.toggle.toggle((id, platform), active).await
    }
}
