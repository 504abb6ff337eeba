//! LLM provider connection types

use serde::{Deserialize, Serialize};

use super::Id;

/// LLM provider connection as returned by the server
///
/// The list endpoint omits the secret fields, so they are optional here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub model_name: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

impl Connection {
    /// Form values for editing this connection
    pub fn to_draft(&self) -> ConnectionDraft {
        ConnectionDraft {
            name: self.name.clone(),
            provider: if self.provider.is_empty() {
                "custom".to_string()
            } else {
                self.provider.clone()
            },
            model_name: self.model_name.clone(),
            api_key: self.api_key.clone().unwrap_or_default(),
            base_url: self.base_url.clone().unwrap_or_default(),
        }
    }
}

/// Connection form values
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConnectionDraft {
    pub name: String,
    pub provider: String,
    pub model_name: String,
    pub api_key: String,
    pub base_url: String,
}

impl ConnectionDraft {
    /// Request body for create, update and temporary check
    ///
    /// An empty base URL is sent as `null`. New and edited connections are
    /// never activated implicitly.
    pub fn to_payload(&self) -> ConnectionPayload {
        ConnectionPayload {
            name: self.name.clone(),
            provider: self.provider.clone(),
            model_name: self.model_name.clone(),
            api_key: self.api_key.clone(),
            base_url: if self.base_url.is_empty() {
                None
            } else {
                Some(self.base_url.clone())
            },
            is_active: false,
        }
    }
}

/// Connection request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionPayload {
    pub name: String,
    pub provider: String,
    pub model_name: String,
    pub api_key: String,
    pub base_url: Option<String>,
    pub is_active: bool,
}

/// Result of a connection check
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CheckResult {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub detail: Option<String>,
}
