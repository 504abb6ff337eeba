//! Bot Console Core Library
//!
//! Client-side resource synchronization layer of the chat bot admin console:
//! - API client with uniform error reporting
//! - Modal, edit-state and confirmation controllers
//! - Declarative list rendering with typed control bindings
//! - Workflows for connections, prompts, whitelist, settings and history
//!
//! Rendering targets are abstracted through the view traits in [`traits`],
//! so the same workflows drive a browser page, a terminal or a test double.

pub mod error;
pub mod render;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;
pub mod workflows;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{ConsoleError, ConsoleResult};
pub use services::{ApiClient, ApiClientConfig, ConsoleContext, NotificationChannel};
pub use traits::{ConfirmPresenter, Confirmer, Navigator, Notifier, Transport};
pub use workflows::{Console, ConsoleViews, UiEvent};
