//! Configuration file handling

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bot_console_http::ClientConfig;

use crate::cli::Cli;

const CONFIG_FILE: &str = "config.toml";

/// Default configuration path
fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bot-console")
        .join(CONFIG_FILE)
}

/// Parse a configuration document; missing keys keep their defaults
pub fn parse(text: &str) -> Result<ClientConfig> {
    toml::from_str(text).context("Invalid configuration")
}

fn read(path: &Path, explicit: bool) -> Result<ClientConfig> {
    if !path.exists() {
        if explicit {
            anyhow::bail!("Configuration file {} does not exist", path.display());
        }
        log::debug!("No configuration at {}, using defaults", path.display());
        return Ok(ClientConfig::default());
    }

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse(&text).with_context(|| format!("in {}", path.display()))
}

/// Command-line and environment values win over the file
fn apply_overrides(mut config: ClientConfig, cli: &Cli) -> ClientConfig {
    if let Some(url) = cli.url.as_deref().filter(|u| !u.is_empty()) {
        config.base_url = url.to_string();
    }
    if let Some(session) = cli.session.as_deref().filter(|s| !s.is_empty()) {
        config.session_cookie = Some(session.to_string());
    }
    config
}

/// Effective client configuration
pub fn load(cli: &Cli) -> Result<ClientConfig> {
    let config = match &cli.config {
        Some(path) => read(path, true)?,
        None => read(&default_config_path(), false)?,
    };
    Ok(apply_overrides(config, cli))
}
