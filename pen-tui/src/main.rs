//! pen-tui - Terminal UI for Penfeed
//!
//! Browse the feed and write posts against a remote post store.

use std::path::PathBuf;

use clap::Parser;
use libpenfeed::config::{resolve_data_path, Config};
use libpenfeed::logging::{config_from_env, LogTarget};
use libpenfeed::BlogService;
use pen_tui::{
    app::{event::EventHandler, event::TuiEvent, key_action, reduce, Action, AppState, UiConfig},
    error::Result,
    services::ServiceHandle,
    terminal::{install_panic_hook, restore_terminal, setup_terminal, Tui},
    ui::{self, composer::ComposerWidgets},
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "pen-tui")]
#[command(about = "Browse the feed and write posts", long_about = None)]
struct Cli {
    /// Configuration file (defaults to the XDG config location)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Post store base URL, overriding the config file
    #[arg(long, env = "PENFEED_STORE_URL")]
    store_url: Option<String>,

    /// Log file (defaults to pen-tui.log in the data directory)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Print the feed as HTML to stdout and exit
    #[arg(long)]
    dump_html: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match cli.config {
        Some(ref path) => Config::load_from_path(path)?,
        None => Config::load_or_default()?,
    };
    if let Some(ref url) = cli.store_url {
        config.store.url = url.clone();
        config.validate()?;
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    // The terminal belongs to the UI, so logs go to a file
    let log_path = match cli.log_file {
        Some(ref path) => path.clone(),
        None => resolve_data_path()?.join("pen-tui.log"),
    };
    config_from_env(cli.verbose)
        .with_target(LogTarget::File(log_path))
        .init()?;

    if cli.dump_html {
        return dump_html(&config);
    }

    let services = ServiceHandle::new(&config)?;
    info!(store = services.store_name(), url = %config.store.url, "Starting pen-tui");

    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let result = run_app(&mut terminal, &services, UiConfig::from_settings(&config.ui));

    restore_terminal(terminal)?;

    result
}

fn run_app(terminal: &mut Tui, services: &ServiceHandle, ui_config: UiConfig) -> Result<()> {
    let event_handler = EventHandler::new(ui_config.tick_rate_ms);
    let mut state = AppState::with_config(ui_config);
    let mut widgets = ComposerWidgets::new();

    // Initial page load
    state = dispatch(state, Action::FeedReloadRequested, services);

    loop {
        terminal.draw(|frame| ui::render(frame, &state, &mut widgets))?;

        let event = event_handler.next()?;
        if matches!(event, TuiEvent::Key(_)) && state.status.message.is_some() {
            state = dispatch(state, Action::ClearStatus, services);
        }

        let action = match event {
            TuiEvent::Key(key) => match key_action(&state, key) {
                Some(action) => action,
                // Unbound keys edit the focused field
                None if state.composer_editable() => Action::ComposerFieldChanged {
                    field: state.focus,
                    value: widgets.input(state.focus, key),
                },
                None => Action::Key(key),
            },
            other => other.into(),
        };
        state = dispatch(state, action, services);

        for event in services.try_events() {
            state = dispatch(state, event.into(), services);
        }
        // Forwarded changes can arrive out of order; the indicator itself is authoritative
        if state.loading != services.is_loading() {
            state = dispatch(state, Action::LoadingChanged(services.is_loading()), services);
        }

        widgets.sync(&state.composer);

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

fn dump_html(config: &Config) -> Result<()> {
    let service = BlogService::new(config);
    let runtime = tokio::runtime::Runtime::new()?;
    let html = runtime.block_on(service.feed_html())?;
    println!("{}", html);
    Ok(())
}

/// Reduce, then start whatever store work the reducer asked for
fn dispatch(state: AppState, action: Action, services: &ServiceHandle) -> AppState {
    let mut state = reduce(state, action);
    if let Some(effect) = state.effect.take() {
        services.run(effect);
    }
    state
}
