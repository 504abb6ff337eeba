//! Confirmation gate
//!
//! Turns a modal yes/no dialog into an awaitable answer. At most one
//! question is outstanding; the dialog is hidden as soon as it is answered.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::traits::{ConfirmPresenter, Confirmer};
use crate::utils::lock;

/// Dialog title used when the caller gives none
pub const DEFAULT_CONFIRM_TITLE: &str = "Подтвердите действие";

/// How the operator answered the dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmResolution {
    /// Confirm control
    Accepted,
    /// Cancel control
    Cancelled,
    /// Dialog closed any other way
    Closed,
}

/// Confirmation dialog backed by a [`ConfirmPresenter`]
pub struct ConfirmationGate {
    presenter: Arc<dyn ConfirmPresenter>,
    pending: Mutex<Option<oneshot::Sender<bool>>>,
}

impl ConfirmationGate {
    #[must_use]
    pub fn new(presenter: Arc<dyn ConfirmPresenter>) -> Self {
        Self {
            presenter,
            pending: Mutex::new(None),
        }
    }

    /// Whether a question is waiting for an answer
    pub fn is_pending(&self) -> bool {
        lock(&self.pending).as_ref().is_some_and(|tx| !tx.is_closed())
    }

    /// Answer the outstanding question
    ///
    /// Returns `false` if nothing was pending.
    pub fn resolve(&self, resolution: ConfirmResolution) -> bool {
        let Some(tx) = lock(&self.pending).take() else {
            return false;
        };
        self.presenter.dismiss();
        // the waiter may have been dropped in the meantime
        let _ = tx.send(resolution == ConfirmResolution::Accepted);
        true
    }
}

#[async_trait]
impl Confirmer for ConfirmationGate {
    async fn confirm(&self, message: &str, title: &str) -> bool {
        let rx = {
            let mut pending = lock(&self.pending);
            if pending.as_ref().is_some_and(|tx| !tx.is_closed()) {
                log::warn!("Confirmation already in progress, declining: {message}");
                return false;
            }
            let (tx, rx) = oneshot::channel();
            *pending = Some(tx);
            rx
        };

        self.presenter.present(title, message);
        rx.await.unwrap_or(false)
    }
}

/// Answers every question with a fixed value (non-interactive frontends)
pub struct AutoConfirm(pub bool);

#[async_trait]
impl Confirmer for AutoConfirm {
    async fn confirm(&self, message: &str, _title: &str) -> bool {
        log::debug!("Auto-answering {}: {message}", self.0);
        self.0
    }
}
