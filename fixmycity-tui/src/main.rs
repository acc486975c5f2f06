//! fixmycity-tui - Terminal client for FixMyCity
//!
//! Report civic issues, vote on them, discuss them and, as an admin, triage
//! them from a dashboard. Logs go to a file since stderr belongs to the UI.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossterm::event::KeyEvent;

use fixmycity_tui::{
    app::{effects, event::EventHandler, event::TuiEvent, keymap::key_to_action, reduce, Action, AppState},
    error::{Result, TuiError},
    services::ServiceHandle,
    terminal::{install_panic_hook, TerminalSession},
    ui::{self, editor::Editors},
};
use libfixmycity::{config::resolve_data_path, logging, Config, FixMyCityError};

#[derive(Parser, Debug)]
#[command(name = "fixmycity-tui")]
#[command(about = "Report and triage civic issues from the terminal", long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "FIXMYCITY_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_code(&e));
    }
}

fn exit_code(error: &anyhow::Error) -> i32 {
    if let Some(e) = error.downcast_ref::<TuiError>() {
        return e.exit_code();
    }
    error.downcast_ref::<FixMyCityError>().map_or(1, FixMyCityError::exit_code)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.verbose).context("Failed to set up logging")?;

    let config = match cli.config {
        Some(ref path) => Config::load_from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load().context("Failed to load config")?,
    };
    tracing::info!("Starting fixmycity-tui");

    let default_center = config.map.default_center();
    let services = ServiceHandle::new(config).context("Failed to start services")?;

    install_panic_hook();
    let mut session = TerminalSession::start().context("Failed to set up terminal")?;
    let result = run_app(&mut session, &services, default_center);
    session.finish().context("Failed to restore terminal")?;

    result.context("Application error")
}

fn init_logging(verbose: bool) -> Result<()> {
    let path = match std::env::var("FIXMYCITY_LOG_FILE") {
        Ok(path) => PathBuf::from(path),
        Err(_) => resolve_data_path()?.join("fixmycity-tui.log"),
    };
    logging::config_from_env(verbose).init_to_file(&path)?;
    Ok(())
}

fn run_app(
    session: &mut TerminalSession,
    services: &ServiceHandle,
    default_center: libfixmycity::Location,
) -> Result<()> {
    let events = services.subscribe();
    let mut state = effects::refresh(services, AppState::with_default_center(default_center));
    let mut editors = Editors::new();
    let event_handler = EventHandler::new(state.config.tick_rate_ms);

    loop {
        editors.style(&state);
        session.terminal().draw(|frame| ui::render(frame, &state, &editors))?;

        let action = match event_handler.next()? {
            TuiEvent::Key(key) => resolve_key(&state, &mut editors, key),
            other => Some(Action::from(other)),
        };
        if let Some(action) = action {
            state = dispatch(services, state, action);
        }

        // Captures finishing in the background
        for action in services.completions().try_iter() {
            state = dispatch(services, state, action);
        }

        // Any store mutation means a fresh snapshot
        if events.try_iter().count() > 0 {
            state = effects::refresh(services, state);
        }

        editors.sync(&state);

        if state.should_quit {
            tracing::info!("Quitting");
            break;
        }
    }

    Ok(())
}

/// Bound keys win; anything else is typed into the focused editor
fn resolve_key(state: &AppState, editors: &mut Editors, key: KeyEvent) -> Option<Action> {
    key_to_action(state, key).or_else(|| editors.input(state, key))
}

fn dispatch(services: &ServiceHandle, state: AppState, action: Action) -> AppState {
    let state = reduce(state, action.clone());
    effects::perform(services, state, &action)
}
