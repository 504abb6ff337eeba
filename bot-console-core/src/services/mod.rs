//! Controllers shared by every workflow

mod api_client;
mod confirm;
mod edit_state;
mod modal;
mod notification;
pub mod routes;
mod session;
mod settings_aggregator;
mod toggle;

pub use api_client::{ApiClient, ApiClientConfig};
pub use confirm::{AutoConfirm, ConfirmResolution, ConfirmationGate, DEFAULT_CONFIRM_TITLE};
pub use edit_state::{DraftResource, EditStateController, SubmitOutcome};
pub use modal::{ClickTarget, ModalController, ModalPhase, ModalTicket, ModalTiming};
pub use notification::{NotificationChannel, ToastSlot, ToastTicket, TOAST_DURATION};
pub use session::{SelectedConnection, SessionContext};
pub use settings_aggregator::{parse_numeric, SettingsAggregator, NUMERIC_FALLBACK};
pub use toggle::{OptimisticToggle, ToggleOutcome, ToggleTarget};

use std::sync::Arc;

use crate::traits::{Confirmer, Navigator, PageView};

/// Console context - holds every shared dependency
///
/// The platform layer builds this once and injects its own transport,
/// notifier, navigator and confirmation dialog.
pub struct ConsoleContext {
    /// API client (reports its own failures)
    pub api: Arc<ApiClient>,
    /// Success and error notices
    pub notices: NotificationChannel,
    /// Confirmation gate in front of destructive actions
    pub confirmer: Arc<dyn Confirmer>,
    /// Page reloads after history clearing
    pub navigator: Arc<dyn Navigator>,
    /// Scroll lock shared by all modals
    pub page: Arc<dyn PageView>,
    /// Page-session state
    pub session: Arc<SessionContext>,
    /// Modal transition delays
    pub modal_timing: ModalTiming,
}

impl ConsoleContext {
    /// Create a console context
    #[must_use]
    pub fn new(
        api: Arc<ApiClient>,
        confirmer: Arc<dyn Confirmer>,
        page: Arc<dyn PageView>,
    ) -> Self {
        Self {
            notices: api.notices().clone(),
            navigator: api.navigator().clone(),
            api,
            confirmer,
            page,
            session: Arc::new(SessionContext::default()),
            modal_timing: ModalTiming::default(),
        }
    }

    #[must_use]
    pub fn with_modal_timing(mut self, timing: ModalTiming) -> Self {
        self.modal_timing = timing;
        self
    }

    /// Ask for confirmation with the default dialog title
    pub async fn confirm(&self, message: &str) -> bool {
        let accepted = self.confirmer.confirm(message, DEFAULT_CONFIRM_TITLE).await;
        if !accepted {
            log::debug!("Declined: {message}");
        }
        accepted
    }
}
