//! Shared primitive types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned entity identifier
pub type Id = i64;

/// Chat platform served by the bot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Telegram,
    Discord,
}

impl Platform {
    /// Get all platforms in tab order
    pub fn all() -> &'static [Platform] {
        &[Platform::Telegram, Platform::Discord]
    }

    /// Wire name used in query strings and payloads
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Telegram => "telegram",
            Self::Discord => "discord",
        }
    }

    /// Title given to a whitelist entry added without one
    pub fn default_title(self, chat_id: &str) -> String {
        match self {
            Self::Telegram => format!("Group {chat_id}"),
            Self::Discord => format!("Server {chat_id}"),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "telegram" | "tg" => Ok(Self::Telegram),
            "discord" | "dc" => Ok(Self::Discord),
            other => Err(format!("unknown platform: {other}")),
        }
    }
}

/// HTTP method of an API call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `{ok: bool}` acknowledgement returned by mutating endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub ok: bool,
}
