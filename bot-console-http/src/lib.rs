//! HTTP transport for the bot console
//!
//! Implements [`bot_console_core::Transport`] on top of `reqwest`. Every HTTP
//! status is handed back to the API client as a response; only requests that
//! never got one become [`bot_console_core::ConsoleError::Network`].

mod config;
mod http_client;
mod utils;

pub use config::ClientConfig;
pub use http_client::HttpTransport;
