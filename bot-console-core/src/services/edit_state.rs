//! Edit-state controller
//!
//! One form serves both creation and editing of a resource. The controller
//! remembers which entity (if any) the form currently edits, so that a
//! submit turns into an update of that entity or a create.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{ConsoleError, ConsoleResult};
use crate::traits::{FormMode, FormView};
use crate::types::Id;
use crate::utils::lock;

use super::NotificationChannel;

/// Resource managed through a create/edit form
#[async_trait]
pub trait DraftResource: Send + Sync {
    type Draft: Default + Send + Sync;

    /// Required-field check; the error text is shown as is
    fn validate(&self, draft: &Self::Draft) -> Result<(), &'static str>;

    async fn create(&self, draft: &Self::Draft) -> ConsoleResult<()>;

    async fn update(&self, id: Id, draft: &Self::Draft) -> ConsoleResult<()>;

    /// Refresh whatever shows the resource after a successful submit
    async fn reload(&self) -> ConsoleResult<()>;

    fn created_notice(&self) -> &'static str;

    fn updated_notice(&self) -> &'static str;
}

/// Result of a successful submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created,
    Updated(Id),
}

/// Create-vs-edit state of one form
pub struct EditStateController<R: DraftResource> {
    resource: R,
    form: Arc<dyn FormView<R::Draft>>,
    notices: NotificationChannel,
    editing_id: Mutex<Option<Id>>,
}

impl<R: DraftResource> EditStateController<R> {
    #[must_use]
    pub fn new(resource: R, form: Arc<dyn FormView<R::Draft>>, notices: NotificationChannel) -> Self {
        Self {
            resource,
            form,
            notices,
            editing_id: Mutex::new(None),
        }
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    pub fn form(&self) -> &Arc<dyn FormView<R::Draft>> {
        &self.form
    }

    /// Entity being edited, `None` in create mode
    pub fn editing_id(&self) -> Option<Id> {
        *lock(&self.editing_id)
    }

    /// Enter edit mode for `id`, pre-filling the form
    pub fn begin(&self, id: Id, seed: &R::Draft) {
        *lock(&self.editing_id) = Some(id);
        self.form.write(seed);
        self.form.set_mode(FormMode::Edit);
    }

    /// Back to create mode with an empty form
    pub fn cancel(&self) {
        *lock(&self.editing_id) = None;
        self.form.write(&R::Draft::default());
        self.form.set_mode(FormMode::Create);
    }

    /// Prepare the form before its modal opens
    ///
    /// Outside edit mode the form starts empty; an edit in progress is kept.
    pub fn reset_unless_editing(&self) {
        if self.editing_id().is_none() {
            self.cancel();
        }
    }

    /// Validate the form and create or update
    ///
    /// A validation failure is shown and nothing is sent. A failed request
    /// (already reported by the API client) keeps the form and mode as they
    /// are, so the operator can retry.
    pub async fn submit(&self) -> ConsoleResult<SubmitOutcome> {
        let draft = self.form.read();
        if let Err(message) = self.resource.validate(&draft) {
            self.notices.error(message);
            return Err(ConsoleError::Validation(message.to_string()));
        }

        let outcome = match self.editing_id() {
            Some(id) => {
                self.resource.update(id, &draft).await?;
                self.notices.success(self.resource.updated_notice());
                SubmitOutcome::Updated(id)
            }
            None => {
                self.resource.create(&draft).await?;
                self.notices.success(self.resource.created_notice());
                SubmitOutcome::Created
            }
        };

        if let Err(e) = self.resource.reload().await {
            log::debug!("Reload after submit failed: {e}");
        }
        self.cancel();
        Ok(outcome)
    }
}
