//! Terminal frontend of the bot admin console
//!
//! Runs one console command against the admin API and prints the resulting
//! lists. Notices go to stdout (success) and stderr (errors); logs go to
//! stderr, filtered by `RUST_LOG`.

mod cli;
mod commands;
mod config;
mod terminal;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use bot_console_core::services::{AutoConfirm, ModalTiming};
use bot_console_core::{ApiClient, Confirmer, Console, ConsoleContext, NotificationChannel};
use bot_console_http::HttpTransport;
use clap::Parser;
use cli::Cli;
use terminal::{HeadlessPage, TerminalConfirmer, TerminalNavigator, TerminalNotifier, TerminalViews};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(verbose: bool) {
    // console errors are already printed as notices
    let default_level = if verbose { "debug" } else { "error" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = config::load(&cli)?;
    tracing::info!("Admin server: {}", config.base_url);

    let api_config = config.api_config();
    let navigator = Arc::new(TerminalNavigator::new(&config.base_url));
    let transport = HttpTransport::new(config).context("Failed to set up the HTTP client")?;
    let api = Arc::new(ApiClient::new(
        Arc::new(transport),
        NotificationChannel::new(Arc::new(TerminalNotifier)),
        navigator,
        api_config,
    ));

    let confirmer: Arc<dyn Confirmer> = if cli.yes {
        Arc::new(AutoConfirm(true))
    } else {
        Arc::new(TerminalConfirmer::default())
    };

    let ctx = Arc::new(
        ConsoleContext::new(api, confirmer, Arc::new(HeadlessPage))
            .with_modal_timing(ModalTiming::instant()),
    );
    let views = TerminalViews::default();
    let console = Console::new(ctx, views.console_views());

    match commands::run(&console, &views, cli.command).await {
        Ok(completed) => Ok(completed),
        Err(e) => {
            tracing::debug!("Command failed: {e}");
            Ok(false)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
