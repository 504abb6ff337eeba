//! Type definition module

mod common;
mod connection;
mod history;
mod prompt;
mod provider_template;
mod settings;
mod whitelist;

pub use common::{HttpMethod, Id, Platform, StatusResponse};
pub use connection::{CheckResult, Connection, ConnectionDraft, ConnectionPayload};
pub use history::{ChatSummary, HistoryStats};
pub use prompt::{Prompt, PromptDraft, PromptPayload};
pub use provider_template::ProviderTemplate;
pub use settings::{
    DiscordSettings, FieldKind, FieldValue, GlobalSettings, SettingsField, TelegramSettings,
};
pub use whitelist::{NewWhitelistEntry, ToggleRequest, WhitelistDraft, WhitelistEntry};
