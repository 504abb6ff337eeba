//! Optimistic toggle
//!
//! A boolean list control is flipped locally first and committed to the
//! server afterwards. If the commit fails, the list is re-fetched so the
//! control shows the server's state again.
//!
//! Two quick toggles of the same control are not serialized; the last
//! response to arrive decides what the list shows.

use async_trait::async_trait;

use crate::error::ConsoleResult;

use super::NotificationChannel;

/// Control that can be flipped optimistically
#[async_trait]
pub trait ToggleTarget: Send + Sync {
    type Key: Send + Sync;

    /// Show the new state without re-rendering
    fn apply_local(&self, key: &Self::Key, on: bool);

    /// Persist the new state
    async fn commit(&self, key: &Self::Key, on: bool) -> ConsoleResult<()>;

    /// Re-render from the server after a failed commit
    async fn rollback(&self, key: &Self::Key);

    fn notice(&self, on: bool) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Committed,
    RolledBack,
}

/// Runs the flip, commit, rollback sequence for a [`ToggleTarget`]
pub struct OptimisticToggle<T: ToggleTarget> {
    target: T,
    notices: NotificationChannel,
}

impl<T: ToggleTarget> OptimisticToggle<T> {
    #[must_use]
    pub fn new(target: T, notices: NotificationChannel) -> Self {
        Self { target, notices }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub async fn toggle(&self, key: T::Key, on: bool) -> ToggleOutcome {
        self.target.apply_local(&key, on);
        match self.target.commit(&key, on).await {
            Ok(()) => {
                self.notices.success(self.target.notice(on));
                ToggleOutcome::Committed
            }
            Err(e) => {
                log::debug!("Toggle rejected, restoring server state: {e}");
                self.target.rollback(&key).await;
                ToggleOutcome::RolledBack
            }
        }
    }
}
