// ABOUTME: Main entry point for the assessment draft wizard with TUI and CLI support
//
// Binary: aswiz
// Usage: aswiz [COMMAND]
// - No command: launches TUI
// - show / set / validate: inspect and edit the draft
// - save / reset / sync-totals: persist, discard, or recompute totals
// - steps: list wizard steps and completion
// - system-check: walk the pre-assessment device check

#![allow(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, prelude::*, Terminal};
use std::{
    io::{self, IsTerminal},
    time::{Duration, Instant},
};

use assessment_wizard::app::{App, EventHandler};
use assessment_wizard::cli::{self, Commands};
use assessment_wizard::components::LayoutComponent;
use assessment_wizard::config::AppConfig;

/// Terminal cleanup utility to ensure proper restoration
fn cleanup_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

fn cleanup_terminal_with_instance<B: Backend + std::io::Write>(
    terminal: &mut Terminal<B>,
) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let mut config = AppConfig::load()?;
    if let Some(dir) = &args.data_dir {
        config.storage.data_dir = Some(dir.clone());
    }

    if let Err(e) = setup_logging(&config) {
        eprintln!("warning: file logging disabled: {e:#}");
    }
    setup_panic_handler();

    let data_dir = args.data_dir.as_ref();
    let result = match args.command {
        Some(Commands::Show) => {
            let form = cli::open_form(data_dir, args.ephemeral, &config)?;
            cli::draft::show(&form, args.format)
        }
        Some(Commands::Set(set_args)) => {
            let mut form = cli::open_form(data_dir, args.ephemeral, &config)?;
            cli::draft::set(&mut form, set_args, args.format)
        }
        Some(Commands::Validate(validate_args)) => {
            let form = cli::open_form(data_dir, args.ephemeral, &config)?;
            cli::draft::validate(&form, &validate_args, args.format)
        }
        Some(Commands::Save) => {
            let mut form = cli::open_form(data_dir, args.ephemeral, &config)?;
            cli::draft::save(&mut form, args.format)
        }
        Some(Commands::Reset(reset_args)) => {
            let mut form = cli::open_form(data_dir, args.ephemeral, &config)?;
            cli::draft::reset(&mut form, &reset_args, args.format)
        }
        Some(Commands::Steps) => {
            let form = cli::open_form(data_dir, args.ephemeral, &config)?;
            cli::draft::steps(&form, args.format)
        }
        Some(Commands::SyncTotals) => {
            let mut form = cli::open_form(data_dir, args.ephemeral, &config)?;
            cli::draft::sync_totals(&mut form, args.format)
        }
        Some(Commands::SystemCheck(check_args)) => cli::system_check::execute(&check_args, args.format),

        // TUI mode (explicit or default)
        Some(Commands::Tui) | None => {
            let store = cli::open_store(data_dir, args.ephemeral, &config)?;
            let mut app = App::with_store(store, &config);
            let mut layout = LayoutComponent::new();
            let tick_rate = Duration::from_millis(config.ui.tick_rate_ms.max(10));

            // Drop keypresses buffered before the UI is up
            while event::poll(Duration::from_millis(10)).unwrap_or(false) {
                let _ = event::read();
            }

            run_tui(&mut app, &mut layout, tick_rate).await
        }
    };

    // Ensure terminal is cleaned up on any error
    if result.is_err() {
        cleanup_terminal();
    }

    result
}

async fn run_tui(app: &mut App, layout: &mut LayoutComponent, tick_rate: Duration) -> Result<()> {
    if !IsTerminal::is_terminal(&io::stdout()) {
        return Err(anyhow::anyhow!(
            "No TTY detected. The wizard UI requires a terminal.\n\
             Use the show/set/validate subcommands for scripted access."
        ));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_tui_loop(app, layout, &mut terminal, tick_rate).await;

    if let Err(e) = cleanup_terminal_with_instance(&mut terminal) {
        tracing::error!("Failed to cleanup terminal: {}", e);
        cleanup_terminal();
    }

    result
}

async fn run_tui_loop(
    app: &mut App,
    layout: &mut LayoutComponent,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    tick_rate: Duration,
) -> Result<()> {
    let mut last_tick = Instant::now();
    tracing::info!("Wizard UI started on step {}", app.state.wizard.current_step());

    loop {
        terminal.draw(|frame| {
            layout.render(frame, &app.state);
        })?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key_event) = event::read()? {
                if let Some(app_event) = EventHandler::handle_key_event(key_event, &mut app.state) {
                    EventHandler::process_event(app_event, &mut app.state);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }

        if app.state.should_quit {
            tracing::info!("Wizard UI exiting");
            break;
        }

        tokio::task::yield_now().await;
    }

    Ok(())
}

fn setup_logging(config: &AppConfig) -> Result<()> {
    use std::fs::OpenOptions;
    use tracing_subscriber::prelude::*;

    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    // JSONL log file with timestamp
    let log_file = log_dir.join(format!(
        "assessment-wizard-{}.jsonl",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&config.logging.filter))
        .unwrap_or_else(|_| "assessment_wizard=info".into());

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_writer(file)
                .with_ansi(false),
        )
        .with(filter)
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(())
}

fn setup_panic_handler() {
    use tracing::error;

    std::panic::set_hook(Box::new(|panic_info| {
        // Ensure terminal is restored before logging the panic
        cleanup_terminal();

        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
        eprintln!("Please check the logs for more details.");
    }));
}
