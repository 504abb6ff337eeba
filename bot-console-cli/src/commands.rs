//! Command execution
//!
//! Every command drives the same workflows a browser page would. Failures
//! have already been shown by the console when they reach this layer, so
//! commands only report whether they completed.

use bot_console_core::render::Action;
use bot_console_core::services::{routes, ClickTarget, ToggleOutcome};
use bot_console_core::traits::FormView;
use bot_console_core::types::{
    Connection, ConnectionDraft, Id, Platform, PromptDraft, WhitelistDraft,
};
use bot_console_core::workflows::{Console, ConnectionsPage};
use bot_console_core::{ConsoleError, ConsoleResult, UiEvent};

use crate::cli::{
    Commands, ConnectionCommands, ConnectionFields, HistoryCommands, PromptCommands,
    SettingsCommands, WhitelistCommands,
};
use crate::terminal::{MemoryForm, TerminalViews};

/// Run one command; `Ok(false)` when it was declined or the check failed
pub async fn run(console: &Console, views: &TerminalViews, command: Commands) -> ConsoleResult<bool> {
    match command {
        Commands::Connections { command } => connections(console, views, command).await,
        Commands::Prompts {
            connection,
            command,
        } => prompts(console, views, connection, command).await,
        Commands::Whitelist { command } => whitelist(console, views, command).await,
        Commands::Settings { command } => settings(console, views, command).await,
        Commands::History { command } => history(console, views, command).await,
    }
}

/// Raise a validation failure the operator has not seen yet
fn invalid(console: &Console, message: String) -> ConsoleError {
    console.context().notices.error(message.clone());
    ConsoleError::Validation(message)
}

fn fill_connection(
    page: &ConnectionsPage,
    form: &MemoryForm<ConnectionDraft>,
    fields: ConnectionFields,
) {
    if let Some(provider) = &fields.provider {
        page.apply_provider_template(provider);
    }
    let mut draft = form.read();
    if let Some(name) = fields.name {
        draft.name = name;
    }
    if let Some(model) = fields.model {
        draft.model_name = model;
    }
    if let Some(api_key) = fields.api_key {
        draft.api_key = api_key;
    }
    if let Some(base_url) = fields.base_url {
        draft.base_url = base_url;
    }
    form.write(&draft);
}

fn print_connection(conn: &Connection) {
    println!("#{} {}{}", conn.id, conn.name, if conn.is_active { " (активно)" } else { "" });
    println!("  provider: {}", conn.provider);
    println!("  model:    {}", conn.model_name);
    println!("  base_url: {}", conn.base_url.as_deref().unwrap_or("-"));
    println!("  api_key:  {}", conn.api_key.as_deref().unwrap_or("-"));
}

async fn connections(
    console: &Console,
    views: &TerminalViews,
    command: ConnectionCommands,
) -> ConsoleResult<bool> {
    let page = &console.connections;
    match command {
        ConnectionCommands::List => {
            page.refresh().await?;
        }
        ConnectionCommands::Show { id } => {
            let conn: Connection = console.context().api.fetch(&routes::connection(id)).await?;
            print_connection(&conn);
            return Ok(true);
        }
        ConnectionCommands::Add { fields } => {
            page.open_create().await;
            fill_connection(page, &views.connection_form, fields);
            page.submit().await?;
        }
        ConnectionCommands::Edit { id, fields } => {
            page.edit(id).await?;
            fill_connection(page, &views.connection_form, fields);
            if let Err(e) = page.submit().await {
                page.close(ClickTarget::CloseControl).await;
                return Err(e);
            }
        }
        ConnectionCommands::Activate { id } => {
            console
                .dispatch(UiEvent::Click(Action::ActivateConnection(id)))
                .await?;
        }
        ConnectionCommands::Check { id } => return page.check(id).await,
        ConnectionCommands::CheckDraft { fields } => {
            page.open_create().await;
            fill_connection(page, &views.connection_form, fields);
            let ok = page.check_draft().await;
            page.close(ClickTarget::CloseControl).await;
            return ok;
        }
        ConnectionCommands::Delete { id } => {
            if !page.delete(id).await? {
                return Ok(false);
            }
        }
    }
    views.connections.print();
    Ok(true)
}

async fn prompts(
    console: &Console,
    views: &TerminalViews,
    connection: Id,
    command: PromptCommands,
) -> ConsoleResult<bool> {
    let panel = &console.prompts;
    let name = console
        .connections
        .refresh()
        .await?
        .into_iter()
        .find(|c| c.id == connection)
        .map(|c| c.name)
        .ok_or_else(|| invalid(console, format!("Подключение #{connection} не найдено")))?;
    panel.show(connection, &name).await?;

    match command {
        PromptCommands::List => {}
        PromptCommands::Add { name, content } => {
            views.prompt_form.write(&PromptDraft { name, content });
            panel.submit().await?;
        }
        PromptCommands::Edit { id, name, content } => {
            if panel.edit_loaded(id).is_none() {
                return Err(invalid(console, format!("Промпт #{id} не найден")));
            }
            let mut draft = views.prompt_form.read();
            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(content) = content {
                draft.content = content;
            }
            views.prompt_form.write(&draft);
            panel.submit().await?;
        }
        PromptCommands::Activate { id } => {
            console
                .dispatch(UiEvent::Click(Action::ActivatePrompt(id)))
                .await?;
        }
        PromptCommands::Deactivate { id } => {
            console
                .dispatch(UiEvent::Click(Action::DeactivatePrompt(id)))
                .await?;
        }
        PromptCommands::Delete { id } => {
            if !panel.delete(id).await? {
                return Ok(false);
            }
        }
    }

    println!("{}", views.prompts_header.text());
    views.prompts.print();
    Ok(true)
}

async fn whitelist(
    console: &Console,
    views: &TerminalViews,
    command: WhitelistCommands,
) -> ConsoleResult<bool> {
    let panel = &console.whitelist;
    let platform = match command {
        WhitelistCommands::List { platform } => {
            let platforms = platform.map_or_else(|| Platform::all().to_vec(), |p| vec![p]);
            for platform in platforms {
                panel.refresh(platform).await?;
                println!("[{platform}]");
                views.pane(platform).list.print();
            }
            return Ok(true);
        }
        WhitelistCommands::Add {
            platform,
            chat_id,
            title,
        } => {
            views.pane(platform).form.write(&WhitelistDraft {
                chat_id,
                title: title.unwrap_or_default(),
            });
            panel.add(platform).await?;
            platform
        }
        WhitelistCommands::Toggle {
            platform,
            id,
            state,
        } => {
            panel.refresh(platform).await?;
            let outcome = panel.toggle(id, state.is_on(), platform).await;
            views.pane(platform).list.print();
            return Ok(outcome == ToggleOutcome::Committed);
        }
        WhitelistCommands::Delete { platform, id } => {
            if !panel.delete(id, platform).await? {
                return Ok(false);
            }
            platform
        }
    };
    views.pane(platform).list.print();
    Ok(true)
}

async fn settings(
    console: &Console,
    views: &TerminalViews,
    command: SettingsCommands,
) -> ConsoleResult<bool> {
    let modal = &console.settings;
    match command {
        SettingsCommands::Show => {
            modal.load().await?;
        }
        SettingsCommands::Set { values } => {
            modal.load().await?;
            for assignment in &values {
                views
                    .settings
                    .assign(assignment)
                    .map_err(|message| invalid(console, message))?;
            }
            modal.save().await?;
        }
    }
    for line in views.settings.lines() {
        println!("{line}");
    }
    Ok(true)
}

async fn history(
    console: &Console,
    views: &TerminalViews,
    command: HistoryCommands,
) -> ConsoleResult<bool> {
    let panel = &console.history;
    match command {
        HistoryCommands::Stats => {
            panel.refresh().await?;
            println!("{}", views.stats.text());
            views.chats.print();
            Ok(true)
        }
        HistoryCommands::ClearAll => panel.clear_all().await,
        HistoryCommands::Clear { platform, chat_id } => panel.clear_chat(chat_id, platform).await,
    }
}
