//! Admin API client
//!
//! Every request goes through [`ApiClient`], which prefixes the API root,
//! sends JSON, interprets the response and reports failures. A failed call
//! is shown to the operator exactly once, here; callers only decide what to
//! do next.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ConsoleError, ConsoleResult, GENERIC_SERVER_ERROR};
use crate::traits::{ApiRequest, ApiResponse, Navigator, Transport};
use crate::types::HttpMethod;

use super::NotificationChannel;

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClientConfig {
    /// Prefix of every API path
    pub api_root: String,
    /// Where a 401 sends the operator
    pub login_route: String,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            api_root: "/admin/api".to_string(),
            login_route: "/admin/login".to_string(),
        }
    }
}

/// Admin API client
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    notices: NotificationChannel,
    navigator: Arc<dyn Navigator>,
    config: ApiClientConfig,
}

impl ApiClient {
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        notices: NotificationChannel,
        navigator: Arc<dyn Navigator>,
        config: ApiClientConfig,
    ) -> Self {
        Self {
            transport,
            notices,
            navigator,
            config,
        }
    }

    pub fn notices(&self) -> &NotificationChannel {
        &self.notices
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    /// Request without body
    ///
    /// Returns the decoded JSON body, or `None` for a successful non-JSON
    /// response.
    pub async fn call(&self, path: &str, method: HttpMethod) -> ConsoleResult<Option<Value>> {
        let result = self.exchange(path, method, None).await;
        self.reported(result)
    }

    /// Request with a JSON body
    pub async fn call_with<B>(
        &self,
        path: &str,
        method: HttpMethod,
        body: &B,
    ) -> ConsoleResult<Option<Value>>
    where
        B: Serialize + ?Sized + Sync,
    {
        let result = match encode(body) {
            Ok(body) => self.exchange(path, method, Some(body)).await,
            Err(e) => Err(e),
        };
        self.reported(result)
    }

    /// GET `path` and decode the body as `T`
    pub async fn fetch<T: DeserializeOwned>(&self, path: &str) -> ConsoleResult<T> {
        self.send(path, HttpMethod::Get).await
    }

    /// Request without body, decoding the response as `T`
    pub async fn send<T: DeserializeOwned>(
        &self,
        path: &str,
        method: HttpMethod,
    ) -> ConsoleResult<T> {
        let result = self.exchange(path, method, None).await.and_then(decode);
        self.reported(result)
    }

    /// Request with a JSON body, decoding the response as `T`
    pub async fn send_with<T, B>(&self, path: &str, method: HttpMethod, body: &B) -> ConsoleResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        let result = match encode(body) {
            Ok(body) => self.exchange(path, method, Some(body)).await.and_then(decode),
            Err(e) => Err(e),
        };
        self.reported(result)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.api_root.trim_end_matches('/'))
    }

    /// Perform the request and interpret the response, without reporting
    async fn exchange(
        &self,
        path: &str,
        method: HttpMethod,
        body: Option<String>,
    ) -> ConsoleResult<Option<Value>> {
        let url = self.url(path);
        log::debug!("[api] {method} {url}");

        let response = self
            .transport
            .send(ApiRequest {
                method,
                url: url.clone(),
                body,
            })
            .await?;

        log::debug!("[api] {method} {url} -> {}", response.status);

        if response.status == 401 {
            log::warn!("[api] {url} requires authentication, redirecting");
            self.navigator.redirect(&self.config.login_route);
            return Err(ConsoleError::AuthRequired);
        }

        interpret(response)
    }

    fn reported<T>(&self, result: ConsoleResult<T>) -> ConsoleResult<T> {
        if let Err(e) = &result {
            match e {
                ConsoleError::MalformedResponse { detail } => {
                    log::error!("[api] malformed response: {detail}");
                }
                e if !e.is_expected() => log::error!("[api] {e}"),
                _ => {}
            }
            self.notices.report(e);
        }
        result
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> ConsoleResult<String> {
    serde_json::to_string(body).map_err(|e| ConsoleError::Serialization(e.to_string()))
}

fn decode<T: DeserializeOwned>(value: Option<Value>) -> ConsoleResult<T> {
    serde_json::from_value(value.unwrap_or(Value::Null)).map_err(|e| {
        ConsoleError::MalformedResponse {
            detail: format!("unexpected response shape: {e}"),
        }
    })
}

/// Map a non-401 response to the call result
fn interpret(response: ApiResponse) -> ConsoleResult<Option<Value>> {
    let data = if response.is_json() {
        let value: Value = serde_json::from_str(&response.body)
            .map_err(|e| ConsoleError::MalformedResponse {
                detail: e.to_string(),
            })?;
        Some(value)
    } else {
        None
    };

    if response.is_success() {
        return Ok(data);
    }

    let message = data
        .as_ref()
        .and_then(|d| d.get("detail"))
        .and_then(detail_message)
        .or_else(|| Some(response.status_text.clone()).filter(|s| !s.is_empty()))
        .unwrap_or_else(|| GENERIC_SERVER_ERROR.to_string());
    Err(ConsoleError::Request(message))
}

/// Text of a `detail` field; structured details are shown as compact JSON
fn detail_message(detail: &Value) -> Option<String> {
    match detail {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
