//! Confirmation Traits

use async_trait::async_trait;

/// Yes/no gate in front of destructive actions
#[async_trait]
pub trait Confirmer: Send + Sync {
    /// Suspend until the operator answers; `true` means proceed
    async fn confirm(&self, message: &str, title: &str) -> bool;
}

/// Shows and hides the confirmation dialog
pub trait ConfirmPresenter: Send + Sync {
    fn present(&self, title: &str, message: &str);
    fn dismiss(&self);
}
