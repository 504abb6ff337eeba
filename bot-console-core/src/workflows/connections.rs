//! Connections page
//!
//! List of LLM provider connections plus the create/edit modal.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{ConsoleError, ConsoleResult};
use crate::render::templates::{connection_card, CONNECTIONS_PLACEHOLDER};
use crate::render::ListRenderer;
use crate::services::{
    routes, ApiClient, ClickTarget, ConsoleContext, DraftResource, EditStateController,
    ModalController, SubmitOutcome,
};
use crate::traits::{FormView, ListView, ModalView};
use crate::types::{CheckResult, Connection, ConnectionDraft, HttpMethod, Id, ProviderTemplate};
use crate::utils::lock;

const REQUIRED_FIELDS: &str = "Заполните обязательные поля";
const CHECK_REQUIRED_FIELDS: &str = "Заполните провайдера и API Key для проверки";
const CHECK_OK: &str = "Подключение успешно!";
const CHECK_FAILED: &str = "Ошибка: Проверьте ключ API и провайдера";
const CHECK_DRAFT_FAILED_PREFIX: &str = "Ошибка проверки: ";
const CHECK_DRAFT_FAILED_FALLBACK: &str = "Проверьте данные";
const DELETE_QUESTION: &str = "Удалить это подключение? Все связанные промпты будут удалены.";

/// Views of the connections page
pub struct ConnectionViews {
    pub list: Arc<dyn ListView>,
    pub form: Arc<dyn FormView<ConnectionDraft>>,
    pub modal: Arc<dyn ModalView>,
}

/// Connection collection as the page sees it
pub struct ConnectionStore {
    api: Arc<ApiClient>,
    renderer: ListRenderer<Connection>,
    loaded: Mutex<Vec<Connection>>,
}

impl ConnectionStore {
    /// Fetch and render the list
    pub async fn load(&self) -> ConsoleResult<Vec<Connection>> {
        let connections: Vec<Connection> = self.api.fetch(routes::CONNECTIONS).await?;
        self.renderer.render(&connections);
        *lock(&self.loaded) = connections.clone();
        Ok(connections)
    }

    /// Connection from the last rendered list
    pub fn find(&self, id: Id) -> Option<Connection> {
        lock(&self.loaded).iter().find(|c| c.id == id).cloned()
    }
}

#[async_trait]
impl DraftResource for ConnectionStore {
    type Draft = ConnectionDraft;

    fn validate(&self, draft: &ConnectionDraft) -> Result<(), &'static str> {
        let missing = draft.name.is_empty()
            || draft.provider.is_empty()
            || draft.model_name.is_empty()
            || draft.api_key.is_empty();
        if missing {
            Err(REQUIRED_FIELDS)
        } else {
            Ok(())
        }
    }

    async fn create(&self, draft: &ConnectionDraft) -> ConsoleResult<()> {
        self.api
            .call_with(routes::CONNECTIONS, HttpMethod::Post, &draft.to_payload())
            .await
            .map(|_| ())
    }

    async fn update(&self, id: Id, draft: &ConnectionDraft) -> ConsoleResult<()> {
        self.api
            .call_with(&routes::connection(id), HttpMethod::Put, &draft.to_payload())
            .await
            .map(|_| ())
    }

    async fn reload(&self) -> ConsoleResult<()> {
        self.load().await.map(|_| ())
    }

    fn created_notice(&self) -> &'static str {
        "Подключение создано"
    }

    fn updated_notice(&self) -> &'static str {
        "Подключение обновлено"
    }
}

/// Connections page workflow
pub struct ConnectionsPage {
    ctx: Arc<ConsoleContext>,
    editor: Arc<EditStateController<ConnectionStore>>,
    modal: ModalController,
}

impl ConnectionsPage {
    #[must_use]
    pub fn new(ctx: Arc<ConsoleContext>, views: ConnectionViews) -> Self {
        let store = ConnectionStore {
            api: ctx.api.clone(),
            renderer: ListRenderer::new(views.list, connection_card, CONNECTIONS_PLACEHOLDER),
            loaded: Mutex::new(Vec::new()),
        };
        let editor = Arc::new(EditStateController::new(
            store,
            views.form,
            ctx.notices.clone(),
        ));
        let reset = editor.clone();
        let modal = ModalController::new("connection", views.modal, ctx.page.clone(), ctx.modal_timing)
            .with_reset(move || reset.cancel());
        Self { ctx, editor, modal }
    }

    pub fn modal(&self) -> &ModalController {
        &self.modal
    }

    pub fn editing_id(&self) -> Option<Id> {
        self.editor.editing_id()
    }

    pub fn store(&self) -> &ConnectionStore {
        self.editor.resource()
    }

    pub async fn refresh(&self) -> ConsoleResult<Vec<Connection>> {
        self.store().load().await
    }

    async fn refresh_after(&self, change: &str) {
        if let Err(e) = self.refresh().await {
            log::debug!("Connection list refresh after {change} failed: {e}");
        }
    }

    /// Open the modal for a new connection
    pub async fn open_create(&self) {
        self.editor.reset_unless_editing();
        self.modal.show().await;
    }

    /// Fetch the full connection (with secrets) and open it for editing
    pub async fn edit(&self, id: Id) -> ConsoleResult<Connection> {
        let conn: Connection = self.ctx.api.fetch(&routes::connection(id)).await?;
        self.editor.begin(id, &conn.to_draft());
        self.modal.show().await;
        Ok(conn)
    }

    /// Create or update from the form, then close the modal
    pub async fn submit(&self) -> ConsoleResult<SubmitOutcome> {
        let outcome = self.editor.submit().await?;
        self.modal.hide().await;
        Ok(outcome)
    }

    pub async fn close(&self, target: ClickTarget) {
        self.modal.dismiss(target).await;
    }

    /// Make `id` the single active connection
    pub async fn activate(&self, id: Id) -> ConsoleResult<()> {
        self.ctx
            .api
            .call(&routes::activate_connection(id), HttpMethod::Post)
            .await?;
        self.refresh_after("activate").await;
        Ok(())
    }

    /// Check a saved connection
    pub async fn check(&self, id: Id) -> ConsoleResult<bool> {
        let res: CheckResult = self
            .ctx
            .api
            .send(&routes::check_connection(id), HttpMethod::Post)
            .await?;
        if res.ok {
            self.ctx.notices.success(CHECK_OK);
        } else {
            self.ctx.notices.error(CHECK_FAILED);
        }
        Ok(res.ok)
    }

    /// Check the unsaved form values
    pub async fn check_draft(&self) -> ConsoleResult<bool> {
        let form = self.editor.form();
        let draft = form.read();
        if draft.provider.is_empty() || draft.api_key.is_empty() {
            self.ctx.notices.error(CHECK_REQUIRED_FIELDS);
            return Err(ConsoleError::Validation(CHECK_REQUIRED_FIELDS.to_string()));
        }

        form.set_busy(true);
        let result: ConsoleResult<CheckResult> = self
            .ctx
            .api
            .send_with(routes::CHECK_TEMPORARY, HttpMethod::Post, &draft.to_payload())
            .await;
        form.set_busy(false);

        let res = result?;
        if res.ok {
            self.ctx.notices.success(CHECK_OK);
        } else {
            let detail = res
                .detail
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| CHECK_DRAFT_FAILED_FALLBACK.to_string());
            self.ctx
                .notices
                .error(format!("{CHECK_DRAFT_FAILED_PREFIX}{detail}"));
        }
        Ok(res.ok)
    }

    /// Delete after confirmation; `Ok(false)` if declined
    pub async fn delete(&self, id: Id) -> ConsoleResult<bool> {
        if !self.ctx.confirm(DELETE_QUESTION).await {
            return Ok(false);
        }
        self.ctx
            .api
            .call(&routes::connection(id), HttpMethod::Delete)
            .await?;
        if self.ctx.session.selected_connection().is_some_and(|c| c.id == id) {
            self.ctx.session.clear_connection();
        }
        self.refresh_after("delete").await;
        Ok(true)
    }

    /// Provider picked in the form: fill the base URL from its template
    ///
    /// Unknown providers leave the base URL alone; `custom` clears it.
    pub fn apply_provider_template(&self, provider: &str) {
        let form = self.editor.form();
        let mut draft = form.read();
        draft.provider = provider.to_string();
        if let Some(template) = ProviderTemplate::from_key(provider) {
            draft.base_url = template.base_url().to_string();
        }
        form.write(&draft);
    }
}
