use super::render::{print_messages, render_config, render_view, Layout};
use super::session::Session;
use super::setup::{Cli, Commands};
use clap::Parser;
use directories::ProjectDirs;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use todoz::api::{CmdResult, ConfigAction, TodozApi, TodozPaths};
use todoz::config::TodozConfig;
use todoz::controller::{Controller, ControllerOptions};
use todoz::error::{Result, TodozError};
use todoz::logging;
use todoz::model::{Filter, Theme};
use todoz::store::fs::FsBackend;

/// Overrides the data directory (items, theme and config).
pub const HOME_ENV: &str = "TODOZ_HOME";

struct AppContext {
    api: TodozApi<FsBackend>,
    config: TodozConfig,
    layout: Layout,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Add { text }) => handle_add(&mut ctx, text),
        Some(Commands::List { filter }) => handle_list(&mut ctx, filter),
        Some(Commands::Toggle { indexes }) => handle_toggle(&mut ctx, indexes),
        Some(Commands::Edit { index, text }) => handle_edit(&mut ctx, index, text),
        Some(Commands::Delete { indexes }) => handle_delete(&mut ctx, indexes),
        Some(Commands::Clear) => handle_clear(&mut ctx),
        Some(Commands::Theme { value }) => handle_theme(&mut ctx, value),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        Some(Commands::Session) => handle_session(ctx),
        None => handle_list(&mut ctx, None),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = data_dir()?;
    tracing::debug!(path = %data_dir.display(), "using data directory");

    let config = TodozConfig::load(&data_dir)?;
    let layout = Layout::new(config.line_width, cli.no_color);
    let api = TodozApi::new(
        FsBackend::new(data_dir.clone()),
        TodozPaths { data: data_dir },
    );

    Ok(AppContext {
        api,
        config,
        layout,
    })
}

fn data_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "todoz", "todoz")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            TodozError::Store(format!(
                "Could not determine a data directory; set {}",
                HOME_ENV
            ))
        })
}

fn handle_add(ctx: &mut AppContext, text: Vec<String>) -> Result<()> {
    let result = ctx.api.add_item(&text.join(" "))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &mut AppContext, filter: Option<String>) -> Result<()> {
    let filter = match filter {
        Some(f) => Filter::from_str(&f)?,
        None => Filter::default(),
    };
    let result = ctx.api.list_items(filter)?;
    print_view(ctx, &result)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_toggle(ctx: &mut AppContext, indexes: Vec<String>) -> Result<()> {
    let result = ctx.api.toggle_items(&indexes)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, index: String, text: Vec<String>) -> Result<()> {
    let result = ctx.api.edit_item(&index, &text.join(" "))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, indexes: Vec<String>) -> Result<()> {
    let result = ctx.api.delete_items(&indexes)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_clear(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.clear_completed()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_theme(ctx: &mut AppContext, value: Option<String>) -> Result<()> {
    let theme = value.as_deref().map(Theme::from_str).transpose()?;
    let result = ctx.api.set_theme(theme)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print!("{}", render_config(config, ctx.api.theme(), ctx.layout)?);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_session(ctx: AppContext) -> Result<()> {
    let AppContext {
        api,
        config,
        layout,
    } = ctx;

    let theme = api.theme();
    let options = ControllerOptions {
        animate_removal: config.removal_delay_ms > 0,
    };
    let controller = Controller::new(api.into_store(), theme, options);
    let mut session = Session::new(
        controller,
        layout,
        Duration::from_millis(config.removal_delay_ms),
    );

    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();
    session.run(stdin.lock(), &mut std::io::stdout(), interactive)
}

fn print_view(ctx: &AppContext, result: &CmdResult) -> Result<()> {
    if let Some(view) = &result.view {
        print!("{}", render_view(view, &[], ctx.layout)?);
    }
    Ok(())
}
