//! reqwest-backed transport
//!
//! One shared `reqwest::Client` per console; the session cookie and the
//! timeout are fixed when the client is built.

use async_trait::async_trait;
use bot_console_core::traits::{ApiRequest, ApiResponse, Transport};
use bot_console_core::types::HttpMethod;
use bot_console_core::{ConsoleError, ConsoleResult};
use reqwest::header::{CONTENT_TYPE, COOKIE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder};

use crate::config::ClientConfig;
use crate::utils::log_sanitizer::truncate_for_log;

const JSON: &str = "application/json";

/// Transport over HTTP(S)
pub struct HttpTransport {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpTransport {
    /// Build the client from the configuration
    pub fn new(config: ClientConfig) -> ConsoleResult<Self> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = config.session_cookie.as_deref().filter(|c| !c.is_empty()) {
            let value = HeaderValue::from_str(cookie)
                .map_err(|e| ConsoleError::Network(format!("Invalid session cookie: {e}")))?;
            headers.insert(COOKIE, value);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| ConsoleError::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self::with_client(client, config))
    }

    /// Use a preconfigured client
    pub fn with_client(client: reqwest::Client, config: ClientConfig) -> Self {
        log::debug!("[http] transport for {}", config.base_url);
        Self { client, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> ConsoleResult<ApiResponse> {
        let url = self.config.endpoint(&request.url);
        let mut builder = self
            .client
            .request(method(request.method), &url)
            .header(CONTENT_TYPE, JSON);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        execute_request(builder, request.method, &url).await
    }
}

fn method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

/// Send the request and read the whole response
///
/// Every status is returned; only a missing response is an error.
async fn execute_request(
    builder: RequestBuilder,
    method: HttpMethod,
    url: &str,
) -> ConsoleResult<ApiResponse> {
    log::debug!("[http] {method} {url}");

    let response = builder.send().await.map_err(|e| {
        if e.is_timeout() {
            log::warn!("[http] {method} {url} timed out");
            ConsoleError::Network(format!("Request timed out: {e}"))
        } else {
            log::warn!("[http] {method} {url} failed: {e}");
            ConsoleError::Network(e.to_string())
        }
    })?;

    let status = response.status();
    log::debug!("[http] Response Status: {}", status.as_u16());

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let body = response
        .text()
        .await
        .map_err(|e| ConsoleError::Network(format!("Failed to read response body: {e}")))?;

    log::debug!("[http] Response Body: {}", truncate_for_log(&body));

    Ok(ApiResponse {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_string(),
        content_type,
        body,
    })
}
