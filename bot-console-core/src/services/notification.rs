//! Notification channel
//!
//! Every user-visible success or error message goes through
//! [`NotificationChannel`]; the rendering of the message is up to the
//! [`Notifier`] sink.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::ConsoleError;
use crate::traits::{Notice, NoticeLevel, Notifier};
use crate::utils::lock;

/// How long a toast stays visible
pub const TOAST_DURATION: Duration = Duration::from_millis(3000);

/// Cloneable handle to the notifier sink
#[derive(Clone)]
pub struct NotificationChannel {
    sink: Arc<dyn Notifier>,
}

impl NotificationChannel {
    #[must_use]
    pub fn new(sink: Arc<dyn Notifier>) -> Self {
        Self { sink }
    }

    pub fn success(&self, message: impl Into<String>) {
        let notice = Notice::new(message, NoticeLevel::Success);
        log::info!("{}", notice.message);
        self.sink.notify(notice);
    }

    pub fn error(&self, message: impl Into<String>) {
        let notice = Notice::new(message, NoticeLevel::Error);
        log::warn!("{}", notice.message);
        self.sink.notify(notice);
    }

    /// Show `err` unless it is a silent outcome (401 redirect)
    pub fn report(&self, err: &ConsoleError) {
        if err.is_user_visible() {
            self.error(err.to_string());
        }
    }
}

/// Handle returned by [`ToastSlot::show`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastTicket(u64);

/// Single toast area
///
/// A new notice replaces the visible one. Expiring a ticket only hides the
/// notice it was issued for, so an older timer cannot hide a newer toast.
#[derive(Default)]
pub struct ToastSlot {
    current: Mutex<Option<(ToastTicket, Notice)>>,
    next: AtomicU64,
}

impl ToastSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&self, notice: Notice) -> ToastTicket {
        let ticket = ToastTicket(self.next.fetch_add(1, Ordering::Relaxed));
        *lock(&self.current) = Some((ticket, notice));
        ticket
    }

    /// Hide the toast if `ticket` is still the visible one
    pub fn expire(&self, ticket: ToastTicket) -> bool {
        let mut current = lock(&self.current);
        if current.as_ref().is_some_and(|(t, _)| *t == ticket) {
            *current = None;
            true
        } else {
            false
        }
    }

    pub fn visible(&self) -> Option<Notice> {
        lock(&self.current).as_ref().map(|(_, n)| n.clone())
    }

    /// Show `notice` and hide it after [`TOAST_DURATION`]
    pub async fn flash(&self, notice: Notice) {
        let ticket = self.show(notice);
        tokio::time::sleep(TOAST_DURATION).await;
        self.expire(ticket);
    }
}

impl Notifier for ToastSlot {
    fn notify(&self, notice: Notice) {
        self.show(notice);
    }
}
