//! adpatterns-tui - draft ad campaigns from a product description
//!
//! Entry point: parses flags, sets up file logging, loads the config and
//! runs the Component/Action event loop.

mod action;
mod app;
mod component;
mod components;
mod config;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::services::{ApiEndpoints, FileStore, KeyValueStore};
use crate::tui::{TickSchedule, Tui};
use anyhow::Result;
use clap::Parser;
use crossterm::event::Event;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "adpatterns-tui", version, about = "Draft ad campaigns from a product description")]
struct Cli {
    /// Directory holding the stored product form and campaign draft
    #[arg(long, value_name = "DIR")]
    storage_dir: Option<PathBuf>,

    /// API base URL listed in the help dialog
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Skip the splash screen
    #[arg(long)]
    no_splash: bool,

    /// Save the effective settings to ~/.adpatterns/config.json and exit
    #[arg(long)]
    write_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging();

    let mut config = Config::load();
    if let Some(dir) = cli.storage_dir {
        config.storage_dir = Some(dir);
    }
    if let Some(url) = cli.api_url {
        config.api_base_url = Some(url);
    }
    if cli.no_splash {
        config.show_splash = false;
    }

    if cli.write_config {
        config.save()?;
        println!("Config written to ~/.adpatterns/config.json");
        return Ok(());
    }

    let storage_dir = config.resolved_storage_dir();
    let api = ApiEndpoints::resolve(config.api_base_url.as_deref());
    tracing::info!(
        storage = %storage_dir.display(),
        api = api.base(),
        "starting adpatterns-tui"
    );
    let store: Rc<dyn KeyValueStore> = Rc::new(FileStore::new(storage_dir));

    setup_panic_handler();
    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(config.tick_rate_ms));
    tui.enter()?;

    let mut app = App::new(store, &api, config.show_splash);
    app.init()?;

    let result = run_app(&mut tui, &mut app);

    tui.exit()?;

    if let Err(err) = result {
        tracing::error!(error = %err, "application error");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    tracing::info!("exited cleanly");
    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    let mut ticks = TickSchedule::new(tui.tick_rate, Instant::now());
    while !app.should_quit {
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                tracing::error!(error = %e, "draw failed");
            }
        })?;

        if let Some(event) = tui.next_event(ticks.timeout(Instant::now()))? {
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };
            dispatch(app, action)?;
        }

        // Tick on schedule even while keys keep arriving
        if ticks.due(Instant::now()) {
            dispatch(app, Some(Action::Tick))?;
        }
    }

    Ok(())
}

/// Feed an action and any follow-up actions it produces through the app
fn dispatch(app: &mut App, action: Option<Action>) -> Result<()> {
    let mut current = action;
    while let Some(a) = current {
        if a != Action::Tick {
            tracing::debug!(action = %a, "dispatch");
        }
        current = app.update(a)?;
    }
    Ok(())
}

/// Log to `~/.adpatterns/logs/`; the terminal belongs to the UI
fn setup_logging() {
    use std::fs::OpenOptions;
    use tracing_subscriber::prelude::*;

    let log_dir = Config::config_dir()
        .map(|dir| dir.join("logs"))
        .unwrap_or_else(|| PathBuf::from(".adpatterns/logs"));
    if std::fs::create_dir_all(&log_dir).is_err() {
        return;
    }

    let log_file = log_dir.join(format!(
        "adpatterns-{}.log",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_file) else {
        return;
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(file)
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "adpatterns_tui=info".into()),
        )
        .init();
}

/// Restore the terminal before a panic message is printed
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );
        tracing::error!("application panicked: {}", panic_info);
        default_hook(panic_info);
    }));
}
