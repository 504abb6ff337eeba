//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

/// Fixed notice shown when the server answered with a JSON content type but
/// the body could not be parsed.
pub const MALFORMED_RESPONSE_MESSAGE: &str = "Сервер вернул некорректный ответ (500 Error)";

/// Fallback message for a failed request that carries neither a `detail`
/// field nor a status line.
pub const GENERIC_SERVER_ERROR: &str = "Ошибка сервера";

/// Console layer error type
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum ConsoleError {
    /// Non-2xx response; message comes from the body `detail` or the status line
    #[error("{0}")]
    Request(String),

    /// The body was announced as JSON but could not be parsed or decoded
    #[error("{}", MALFORMED_RESPONSE_MESSAGE)]
    MalformedResponse {
        /// Parser diagnostics (logged, never shown)
        detail: String,
    },

    /// A required form field was empty; raised before any network call
    #[error("{0}")]
    Validation(String),

    /// HTTP 401: the page was sent to the login route
    #[error("Authentication required")]
    AuthRequired,

    /// The request never produced a response (connection refused, timeout, ...)
    #[error("{0}")]
    Network(String),

    /// Failed to serialize a request body
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ConsoleError {
    /// Whether it is expected behavior (user input, server-side rejection),
    /// used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error`
    /// when returning `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::Request(_) | Self::Validation(_) | Self::AuthRequired
        )
    }

    /// Whether the error must be surfaced to the operator as a notice.
    ///
    /// A 401 is a silent redirect, everything else is shown.
    #[must_use]
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, Self::AuthRequired)
    }
}

/// Console layer Result type alias
pub type ConsoleResult<T> = std::result::Result<T, ConsoleError>;
