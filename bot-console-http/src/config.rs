//! Client configuration

use std::time::Duration;

use bot_console_core::ApiClientConfig;
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the admin server lives and how to talk to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Scheme and authority of the admin server
    pub base_url: String,
    /// Prefix of every API route
    pub api_root: String,
    /// Route the console is sent to after a 401
    pub login_route: String,
    pub timeout_secs: u64,
    /// Raw `Cookie` header value of an authenticated admin session
    pub session_cookie: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let api = ApiClientConfig::default();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_root: api.api_root,
            login_route: api.login_route,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            session_cookie: None,
        }
    }
}

impl ClientConfig {
    /// Routing part handed to the API client
    pub fn api_config(&self) -> ApiClientConfig {
        ApiClientConfig {
            api_root: self.api_root.clone(),
            login_route: self.login_route.clone(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Absolute URL of a root-relative path
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }
}
