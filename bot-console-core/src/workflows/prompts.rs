//! Prompts panel
//!
//! Modal listing the prompts of the selected connection, with an inline
//! create/edit form.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{ConsoleError, ConsoleResult};
use crate::render::templates::{prompt_card, PROMPTS_PLACEHOLDER};
use crate::render::ListRenderer;
use crate::services::{
    routes, ApiClient, ClickTarget, ConsoleContext, DraftResource, EditStateController,
    ModalController, SessionContext, SubmitOutcome,
};
use crate::traits::{FormView, ListView, ModalView, TextSlot};
use crate::types::{HttpMethod, Id, Prompt, PromptDraft};
use crate::utils::lock;

const REQUIRED_FIELDS: &str = "Заполните все поля";
const NO_CONNECTION: &str = "Подключение не выбрано";
const DELETE_QUESTION: &str = "Удалить этот промпт?";
const DELETED: &str = "Промпт удален";

/// Views of the prompts panel
pub struct PromptViews {
    pub list: Arc<dyn ListView>,
    pub form: Arc<dyn FormView<PromptDraft>>,
    pub modal: Arc<dyn ModalView>,
    /// Name of the selected connection
    pub header: Arc<dyn TextSlot>,
}

/// Prompts of the selected connection
pub struct PromptStore {
    api: Arc<ApiClient>,
    session: Arc<SessionContext>,
    renderer: ListRenderer<Prompt>,
    loaded: Mutex<Vec<Prompt>>,
}

impl PromptStore {
    fn selected(&self) -> ConsoleResult<Id> {
        self.session
            .selected_connection()
            .map(|c| c.id)
            .ok_or_else(|| ConsoleError::Validation(NO_CONNECTION.to_string()))
    }

    /// Fetch and render the prompts of the selected connection
    pub async fn load(&self) -> ConsoleResult<Vec<Prompt>> {
        let connection_id = self.selected()?;
        let prompts: Vec<Prompt> = self
            .api
            .fetch(&routes::connection_prompts(connection_id))
            .await?;
        self.renderer.render(&prompts);
        *lock(&self.loaded) = prompts.clone();
        Ok(prompts)
    }

    pub fn find(&self, id: Id) -> Option<Prompt> {
        lock(&self.loaded).iter().find(|p| p.id == id).cloned()
    }
}

#[async_trait]
impl DraftResource for PromptStore {
    type Draft = PromptDraft;

    fn validate(&self, draft: &PromptDraft) -> Result<(), &'static str> {
        if draft.name.is_empty() || draft.content.is_empty() {
            Err(REQUIRED_FIELDS)
        } else {
            Ok(())
        }
    }

    async fn create(&self, draft: &PromptDraft) -> ConsoleResult<()> {
        let connection_id = self.selected()?;
        self.api
            .call_with(
                &routes::connection_prompts(connection_id),
                HttpMethod::Post,
                &draft.to_create_payload(),
            )
            .await
            .map(|_| ())
    }

    async fn update(&self, id: Id, draft: &PromptDraft) -> ConsoleResult<()> {
        self.api
            .call_with(&routes::prompt(id), HttpMethod::Put, &draft.to_update_payload())
            .await
            .map(|_| ())
    }

    async fn reload(&self) -> ConsoleResult<()> {
        self.load().await.map(|_| ())
    }

    fn created_notice(&self) -> &'static str {
        "Промпт создан"
    }

    fn updated_notice(&self) -> &'static str {
        "Промпт обновлен"
    }
}

/// Prompts panel workflow
pub struct PromptsPanel {
    ctx: Arc<ConsoleContext>,
    editor: Arc<EditStateController<PromptStore>>,
    modal: ModalController,
    header: Arc<dyn TextSlot>,
}

impl PromptsPanel {
    #[must_use]
    pub fn new(ctx: Arc<ConsoleContext>, views: PromptViews) -> Self {
        let store = PromptStore {
            api: ctx.api.clone(),
            session: ctx.session.clone(),
            renderer: ListRenderer::new(views.list, prompt_card, PROMPTS_PLACEHOLDER),
            loaded: Mutex::new(Vec::new()),
        };
        let editor = Arc::new(EditStateController::new(
            store,
            views.form,
            ctx.notices.clone(),
        ));
        let reset = editor.clone();
        let modal = ModalController::new("prompts", views.modal, ctx.page.clone(), ctx.modal_timing)
            .with_reset(move || reset.cancel());
        Self {
            ctx,
            editor,
            modal,
            header: views.header,
        }
    }

    pub fn modal(&self) -> &ModalController {
        &self.modal
    }

    pub fn editing_id(&self) -> Option<Id> {
        self.editor.editing_id()
    }

    pub fn store(&self) -> &PromptStore {
        self.editor.resource()
    }

    /// Select a connection and open its prompts
    pub async fn show(&self, connection_id: Id, name: &str) -> ConsoleResult<Vec<Prompt>> {
        self.ctx.session.select_connection(connection_id, name);
        self.header.set_text(name);
        self.modal.show().await;
        self.refresh().await
    }

    pub async fn refresh(&self) -> ConsoleResult<Vec<Prompt>> {
        let result = self.store().load().await;
        if let Err(ConsoleError::Validation(message)) = &result {
            self.ctx.notices.error(message.clone());
        }
        result
    }

    /// The change is already stored; a failed reload was reported by the API client
    async fn refresh_after(&self, change: &str) {
        if let Err(e) = self.refresh().await {
            log::debug!("Prompt list refresh after {change} failed: {e}");
        }
    }

    /// Load a prompt into the form for editing
    pub fn edit(&self, id: Id, name: &str, content: &str) {
        self.editor.begin(
            id,
            &PromptDraft {
                name: name.to_string(),
                content: content.to_string(),
            },
        );
    }

    /// Edit a prompt of the currently rendered list
    pub fn edit_loaded(&self, id: Id) -> Option<Prompt> {
        let prompt = self.store().find(id)?;
        self.edit(prompt.id, &prompt.name, &prompt.content);
        Some(prompt)
    }

    pub fn cancel_edit(&self) {
        self.editor.cancel();
    }

    pub async fn submit(&self) -> ConsoleResult<SubmitOutcome> {
        let result = self.editor.submit().await;
        if let Err(ConsoleError::Validation(message)) = &result {
            // missing selection is raised below the form validation
            if message == NO_CONNECTION {
                self.ctx.notices.error(message.clone());
            }
        }
        result
    }

    pub async fn activate(&self, id: Id) -> ConsoleResult<()> {
        self.ctx
            .api
            .call(&routes::activate_prompt(id), HttpMethod::Post)
            .await?;
        self.refresh_after("activate").await;
        Ok(())
    }

    pub async fn deactivate(&self, id: Id) -> ConsoleResult<()> {
        self.ctx
            .api
            .call(&routes::deactivate_prompt(id), HttpMethod::Post)
            .await?;
        self.refresh_after("deactivate").await;
        Ok(())
    }

    /// Delete after confirmation; `Ok(false)` if declined
    pub async fn delete(&self, id: Id) -> ConsoleResult<bool> {
        if !self.ctx.confirm(DELETE_QUESTION).await {
            return Ok(false);
        }
        self.ctx
            .api
            .call(&routes::prompt(id), HttpMethod::Delete)
            .await?;
        self.refresh_after("delete").await;
        self.ctx.notices.success(DELETED);
        Ok(true)
    }

    /// Close the panel; the form is reset once the modal is hidden
    pub async fn close(&self, target: ClickTarget) {
        self.modal.dismiss(target).await;
    }
}
