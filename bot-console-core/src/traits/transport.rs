//! Network transport abstract Trait

use async_trait::async_trait;

use crate::error::ConsoleResult;
use crate::types::HttpMethod;

/// One request to the admin API, with the API root already applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Root-relative URL, e.g. `/admin/api/whitelist?platform=telegram`
    pub url: String,
    /// Serialized JSON body
    pub body: Option<String>,
}

/// Raw response as seen by the API client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    /// Reason phrase of the status line (may be empty)
    pub status_text: String,
    pub content_type: Option<String>,
    pub body: String,
}

impl ApiResponse {
    /// JSON response helper
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            status_text: String::new(),
            content_type: Some("application/json".to_string()),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("application/json"))
    }
}

/// Sends requests to the resource server
///
/// Implementations:
/// - `bot-console-http`: `HttpTransport` (reqwest)
/// - tests: in-memory fake admin server
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one request.
    ///
    /// Only failures that produced no response at all are errors
    /// (`ConsoleError::Network`); every HTTP status is returned as a response.
    async fn send(&self, request: ApiRequest) -> ConsoleResult<ApiResponse>;
}
