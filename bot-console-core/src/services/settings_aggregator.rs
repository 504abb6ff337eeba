//! Settings aggregator
//!
//! Maps the flat settings form onto the nested [`GlobalSettings`] object.
//! Loading writes only the controls that exist; saving always sends the
//! complete object, with defaults for anything missing or unreadable.

use std::sync::Arc;

use crate::error::ConsoleResult;
use crate::traits::SettingsForm;
use crate::types::{
    DiscordSettings, GlobalSettings, HttpMethod, SettingsField, TelegramSettings,
};

use super::{routes, ApiClient};

/// Value sent for a numeric control that is missing, unparseable or zero
pub const NUMERIC_FALLBACK: i64 = 10;

/// Parse the leading integer of a numeric control
///
/// Leading whitespace and one sign are accepted, parsing stops at the first
/// non-digit. No digits and zero yield [`NUMERIC_FALLBACK`]. Digits that
/// overflow `i64` also yield the fallback instead of a saturated value, since
/// the settings fields carry `i64` on the wire.
pub fn parse_numeric(text: Option<&str>) -> i64 {
    let Some(text) = text else {
        return NUMERIC_FALLBACK;
    };
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    let parsed = rest[..digits_len]
        .parse::<i64>()
        .ok()
        .map(|n| if negative { -n } else { n });
    match parsed {
        Some(n) if n != 0 => n,
        _ => NUMERIC_FALLBACK,
    }
}

/// Loads and saves the global settings through a [`SettingsForm`]
pub struct SettingsAggregator {
    api: Arc<ApiClient>,
    form: Arc<dyn SettingsForm>,
}

impl SettingsAggregator {
    #[must_use]
    pub fn new(api: Arc<ApiClient>, form: Arc<dyn SettingsForm>) -> Self {
        Self { api, form }
    }

    /// Fetch the settings and fill every control that exists
    pub async fn load(&self) -> ConsoleResult<GlobalSettings> {
        let settings: GlobalSettings = self.api.fetch(routes::GLOBAL_SETTINGS).await?;
        for &field in SettingsField::all() {
            if self.form.has(field) {
                self.form.write(field, settings.get(field));
            } else {
                log::debug!("Settings control {} not present, skipped", field.key());
            }
        }
        Ok(settings)
    }

    /// Build the full settings object from the form
    pub fn collect(&self) -> GlobalSettings {
        let flag = |field: SettingsField| self.form.read_flag(field).unwrap_or(false);
        let number = |field: SettingsField| parse_numeric(self.form.read_text(field).as_deref());

        GlobalSettings {
            telegram: TelegramSettings {
                enabled: flag(SettingsField::TelegramEnabled),
                allow_private: flag(SettingsField::TelegramAllowPrivate),
                allow_new_chats: flag(SettingsField::TelegramAllowNewChats),
                memory_limit: number(SettingsField::TelegramMemoryLimit),
            },
            discord: DiscordSettings {
                enabled: flag(SettingsField::DiscordEnabled),
                allow_dms: flag(SettingsField::DiscordAllowDms),
                allow_new_chats: flag(SettingsField::DiscordAllowNewChats),
                music_enabled: flag(SettingsField::DiscordMusicEnabled),
                memory_limit: number(SettingsField::DiscordMemoryLimit),
                seek_time: number(SettingsField::DiscordSeekTime),
            },
        }
    }

    /// Send the collected settings as one replacement
    pub async fn save(&self) -> ConsoleResult<GlobalSettings> {
        let settings = self.collect();
        self.api
            .call_with(routes::GLOBAL_SETTINGS, HttpMethod::Post, &settings)
            .await?;
        Ok(settings)
    }
}
