//! Page workflows
//!
//! Each workflow owns its controllers and views and is reached through
//! [`Console`], which also routes the typed control events emitted by the
//! rendered lists.

mod connections;
mod history;
mod prompts;
mod settings;
mod whitelist;

pub use connections::{ConnectionStore, ConnectionViews, ConnectionsPage};
pub use history::{stats_line, HistoryPanel, HistoryViews};
pub use prompts::{PromptStore, PromptViews, PromptsPanel};
pub use settings::{SettingsModal, SettingsViews};
pub use whitelist::{PlatformViews, WhitelistLists, WhitelistPanel, WhitelistViews};

use std::sync::Arc;

use crate::error::ConsoleResult;
use crate::render::Action;
use crate::services::ConsoleContext;

/// Views of the whole console
pub struct ConsoleViews {
    pub connections: ConnectionViews,
    pub prompts: PromptViews,
    pub whitelist: WhitelistViews,
    pub settings: SettingsViews,
    pub history: HistoryViews,
}

/// Event raised by a rendered control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Button press
    Click(Action),
    /// Switch changed to `checked`
    Change { action: Action, checked: bool },
}

/// Admin console: every workflow over one shared context
pub struct Console {
    pub connections: ConnectionsPage,
    pub prompts: PromptsPanel,
    pub whitelist: Arc<WhitelistPanel>,
    pub settings: SettingsModal,
    pub history: HistoryPanel,
    ctx: Arc<ConsoleContext>,
}

impl Console {
    #[must_use]
    pub fn new(ctx: Arc<ConsoleContext>, views: ConsoleViews) -> Self {
        let whitelist = Arc::new(WhitelistPanel::new(ctx.clone(), views.whitelist));
        Self {
            connections: ConnectionsPage::new(ctx.clone(), views.connections),
            prompts: PromptsPanel::new(ctx.clone(), views.prompts),
            settings: SettingsModal::new(ctx.clone(), views.settings, whitelist.clone()),
            history: HistoryPanel::new(ctx.clone(), views.history),
            whitelist,
            ctx,
        }
    }

    pub fn context(&self) -> &Arc<ConsoleContext> {
        &self.ctx
    }

    /// Route a control event to its workflow
    ///
    /// Failures have already been shown to the operator when this returns.
    pub async fn dispatch(&self, event: UiEvent) -> ConsoleResult<()> {
        let (action, checked) = match event {
            UiEvent::Click(action) => (action, None),
            UiEvent::Change { action, checked } => (action, Some(checked)),
        };
        log::debug!("[ui] {} #{}", action.name(), action.target());

        match action {
            Action::ActivateConnection(id) => self.connections.activate(id).await,
            Action::CheckConnection(id) => self.connections.check(id).await.map(|_| ()),
            Action::EditConnection(id) => self.connections.edit(id).await.map(|_| ()),
            Action::DeleteConnection(id) => self.connections.delete(id).await.map(|_| ()),
            Action::ShowPrompts(id) => {
                let name = self
                    .connections
                    .store()
                    .find(id)
                    .map(|c| c.name)
                    .unwrap_or_default();
                self.prompts.show(id, &name).await.map(|_| ())
            }
            Action::EditPrompt(id) => {
                if self.prompts.edit_loaded(id).is_none() {
                    log::warn!("Prompt {id} is not in the rendered list");
                }
                Ok(())
            }
            Action::DeletePrompt(id) => self.prompts.delete(id).await.map(|_| ()),
            Action::ActivatePrompt(id) => self.prompts.activate(id).await,
            Action::DeactivatePrompt(id) => self.prompts.deactivate(id).await,
            Action::ToggleWhitelist { id, platform } => {
                match checked {
                    Some(active) => {
                        self.whitelist.toggle(id, active, platform).await;
                    }
                    None => log::debug!("Whitelist switch {id} clicked without a change"),
                }
                Ok(())
            }
            Action::DeleteWhitelist { id, platform } => {
                self.whitelist.delete(id, platform).await.map(|_| ())
            }
            Action::ClearChat { chat_id, platform } => {
                self.history.clear_chat(chat_id, platform).await.map(|_| ())
            }
        }
    }
}
