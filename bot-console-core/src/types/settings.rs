//! Global bot settings

use serde::{Deserialize, Serialize};

use super::Platform;

/// Telegram section of the global settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramSettings {
    pub enabled: bool,
    pub allow_private: bool,
    pub allow_new_chats: bool,
    pub memory_limit: i64,
}

/// Discord section of the global settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscordSettings {
    pub enabled: bool,
    pub allow_dms: bool,
    pub allow_new_chats: bool,
    pub music_enabled: bool,
    pub memory_limit: i64,
    pub seek_time: i64,
}

/// Singleton settings object, always fetched and replaced whole
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSettings {
    pub telegram: TelegramSettings,
    pub discord: DiscordSettings,
}

/// Value kind of a settings control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Flag,
    Number,
}

/// One control of the settings form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsField {
    TelegramEnabled,
    TelegramAllowPrivate,
    TelegramAllowNewChats,
    TelegramMemoryLimit,
    DiscordEnabled,
    DiscordAllowDms,
    DiscordAllowNewChats,
    DiscordMusicEnabled,
    DiscordMemoryLimit,
    DiscordSeekTime,
}

impl SettingsField {
    /// Get all settings fields in form order
    pub fn all() -> &'static [SettingsField] {
        &[
            Self::TelegramEnabled,
            Self::TelegramAllowPrivate,
            Self::TelegramAllowNewChats,
            Self::TelegramMemoryLimit,
            Self::DiscordEnabled,
            Self::DiscordAllowDms,
            Self::DiscordAllowNewChats,
            Self::DiscordMusicEnabled,
            Self::DiscordMemoryLimit,
            Self::DiscordSeekTime,
        ]
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Self::TelegramMemoryLimit | Self::DiscordMemoryLimit | Self::DiscordSeekTime => {
                FieldKind::Number
            }
            _ => FieldKind::Flag,
        }
    }

    pub fn platform(self) -> Platform {
        match self {
            Self::TelegramEnabled
            | Self::TelegramAllowPrivate
            | Self::TelegramAllowNewChats
            | Self::TelegramMemoryLimit => Platform::Telegram,
            _ => Platform::Discord,
        }
    }

    /// Stable key, `<section>.<field>`, as used by the CLI
    pub fn key(self) -> &'static str {
        match self {
            Self::TelegramEnabled => "telegram.enabled",
            Self::TelegramAllowPrivate => "telegram.allow_private",
            Self::TelegramAllowNewChats => "telegram.allow_new_chats",
            Self::TelegramMemoryLimit => "telegram.memory_limit",
            Self::DiscordEnabled => "discord.enabled",
            Self::DiscordAllowDms => "discord.allow_dms",
            Self::DiscordAllowNewChats => "discord.allow_new_chats",
            Self::DiscordMusicEnabled => "discord.music_enabled",
            Self::DiscordMemoryLimit => "discord.memory_limit",
            Self::DiscordSeekTime => "discord.seek_time",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|f| f.key() == key)
    }
}

/// Typed value of a single settings control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue {
    Flag(bool),
    Number(i64),
}

impl GlobalSettings {
    /// Read one field
    pub fn get(&self, field: SettingsField) -> FieldValue {
        let tg = &self.telegram;
        let dc = &self.discord;
        match field {
            SettingsField::TelegramEnabled => FieldValue::Flag(tg.enabled),
            SettingsField::TelegramAllowPrivate => FieldValue::Flag(tg.allow_private),
            SettingsField::TelegramAllowNewChats => FieldValue::Flag(tg.allow_new_chats),
            SettingsField::TelegramMemoryLimit => FieldValue::Number(tg.memory_limit),
            SettingsField::DiscordEnabled => FieldValue::Flag(dc.enabled),
            SettingsField::DiscordAllowDms => FieldValue::Flag(dc.allow_dms),
            SettingsField::DiscordAllowNewChats => FieldValue::Flag(dc.allow_new_chats),
            SettingsField::DiscordMusicEnabled => FieldValue::Flag(dc.music_enabled),
            SettingsField::DiscordMemoryLimit => FieldValue::Number(dc.memory_limit),
            SettingsField::DiscordSeekTime => FieldValue::Number(dc.seek_time),
        }
    }
}
