//! Command-line definition

use std::path::PathBuf;

use bot_console_core::types::{Id, Platform};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "bot-console")]
#[command(about = "Admin console of the chat bot: connections, prompts, whitelist, settings, history")]
#[command(version)]
pub struct Cli {
    /// Configuration file (default: <config dir>/bot-console/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Admin server URL, overrides the configuration file
    #[arg(long, global = true, env = "BOT_CONSOLE_URL")]
    pub url: Option<String>,

    /// Session cookie of a signed-in admin, e.g. `session=...`
    #[arg(long, global = true, env = "BOT_CONSOLE_SESSION", hide_env_values = true)]
    pub session: Option<String>,

    /// Answer every confirmation with yes
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// LLM provider connections
    Connections {
        #[command(subcommand)]
        command: ConnectionCommands,
    },

    /// System prompts of one connection
    Prompts {
        /// Connection the prompts belong to
        #[arg(short, long)]
        connection: Id,

        #[command(subcommand)]
        command: PromptCommands,
    },

    /// Chat whitelist per platform
    Whitelist {
        #[command(subcommand)]
        command: WhitelistCommands,
    },

    /// Global bot settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },

    /// Chat history
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
}

/// Connection fields; absent values keep the current ones on edit
#[derive(clap::Args, Debug, Default, Clone)]
pub struct ConnectionFields {
    #[arg(long)]
    pub name: Option<String>,

    /// Provider key (openrouter, openai, anthropic, google, deepseek, groq, custom)
    #[arg(long)]
    pub provider: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub api_key: Option<String>,

    /// Defaults to the provider's endpoint
    #[arg(long)]
    pub base_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ConnectionCommands {
    /// List all connections
    List,

    /// Show one connection with its secrets
    Show { id: Id },

    /// Create a connection
    Add {
        #[command(flatten)]
        fields: ConnectionFields,
    },

    /// Update a connection
    Edit {
        id: Id,

        #[command(flatten)]
        fields: ConnectionFields,
    },

    /// Make a connection the active one
    Activate { id: Id },

    /// Test a saved connection against its provider
    Check { id: Id },

    /// Test connection values without saving them
    CheckDraft {
        #[command(flatten)]
        fields: ConnectionFields,
    },

    /// Delete a connection and its prompts
    Delete { id: Id },
}

#[derive(Subcommand, Debug)]
pub enum PromptCommands {
    List,

    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        content: String,
    },

    Edit {
        id: Id,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        content: Option<String>,
    },

    Activate { id: Id },

    Deactivate { id: Id },

    Delete { id: Id },
}

/// Position of a whitelist switch
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchState {
    On,
    Off,
}

impl SwitchState {
    pub fn is_on(self) -> bool {
        self == Self::On
    }
}

#[derive(Subcommand, Debug)]
pub enum WhitelistCommands {
    /// List entries of one platform, or of both
    List { platform: Option<Platform> },

    Add {
        platform: Platform,

        chat_id: String,

        /// Defaults to "Group <id>" / "Server <id>"
        #[arg(long)]
        title: Option<String>,
    },

    /// Enable or disable an entry
    Toggle {
        platform: Platform,
        id: Id,
        state: SwitchState,
    },

    Delete { platform: Platform, id: Id },
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Print every setting
    Show,

    /// Change settings, e.g. `telegram.enabled=false discord.memory_limit=20`
    Set {
        #[arg(required = true)]
        values: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// Counters and the chat list
    Stats,

    /// Delete the whole history
    ClearAll,

    /// Delete the history of one chat
    Clear { platform: Platform, chat_id: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_whitelist_toggle() {
        let cli = Cli::try_parse_from(["bot-console", "whitelist", "toggle", "discord", "4", "off"])
            .unwrap_or_else(|e| panic!("{e}"));
        match cli.command {
            Commands::Whitelist {
                command:
                    WhitelistCommands::Toggle {
                        platform,
                        id,
                        state,
                    },
            } => {
                assert_eq!(platform, Platform::Discord);
                assert_eq!(id, 4);
                assert!(!state.is_on());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn prompts_require_a_connection() {
        assert!(Cli::try_parse_from(["bot-console", "prompts", "list"]).is_err());
        assert!(Cli::try_parse_from(["bot-console", "prompts", "-c", "2", "list"]).is_ok());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["bot-console", "history", "clear-all", "--yes"])
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(cli.yes);
    }
}
