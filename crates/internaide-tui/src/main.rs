//! InternAIde TUI - a terminal client for the InternAIde internship tracker.
//!
//! Running `internaide` with no arguments opens the terminal interface.
//! The `login`, `logout` and `whoami` subcommands manage the saved session
//! without it.

mod app;
mod ui;

use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{Builder, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use internaide_core::auth::SessionStore;
use internaide_core::config::Config;

use app::{App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Log file written inside the data directory
const LOG_FILE: &str = "internaide.log";

const USAGE: &str = "\
Usage: internaide [COMMAND]

Commands:
  (none)             Open the terminal interface
  login              Log in with email and password
  logout             Forget the saved session
  whoami [--refresh] Show the logged-in user, optionally re-checking with the server

Environment:
  INTERNAIDE_API_BASE_URL  API base URL (default http://localhost:8000)
  RUST_LOG                 Log filter (default warn)";

/// Initialize the tracing subscriber for logging.
///
/// Logs go to a file so they never draw over the terminal interface.
/// Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
fn init_tracing(log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create {}", log_dir.display()))?;
    let appender = Builder::new()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE)
        .build(log_dir)
        .context("Failed to open log file")?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();
    Ok(guard)
}

enum Command {
    Tui,
    Login,
    Logout,
    WhoAmI { refresh: bool },
    Help,
}

fn parse_args(args: &[String]) -> Result<Command> {
    let command = match args.first().map(String::as_str) {
        None => Command::Tui,
        Some("login") => Command::Login,
        Some("logout") => Command::Logout,
        Some("whoami") => Command::WhoAmI {
            refresh: args.get(1).is_some_and(|a| a == "--refresh"),
        },
        Some("-h") | Some("--help") | Some("help") => Command::Help,
        Some(other) => bail!("Unknown command '{}'\n\n{}", other, USAGE),
    };
    Ok(command)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = parse_args(&args)?;
    if let Command::Help = command {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = Config::load()?;

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = match config.data_dir().and_then(|dir| init_tracing(&dir)) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {:#}", e);
            None
        }
    };
    info!(base_url = %config.api_base_url(), "InternAIde starting");

    let session = config.open_session()?;

    match command {
        Command::Tui => run_tui(config, session).await,
        Command::Login => login(config, session).await,
        Command::Logout => logout(session),
        Command::WhoAmI { refresh } => whoami(session, refresh).await,
        Command::Help => Ok(()),
    }
}

// ============================================================================
// Subcommands
// ============================================================================

async fn login(mut config: Config, mut session: SessionStore) -> Result<()> {
    let email = prompt_email(config.last_email.as_deref())?;
    let password = rpassword::prompt_password("Password: ").context("Failed to read password")?;

    if let Err(e) = session.login(&email, &password).await {
        bail!("{}", e);
    }

    config.last_email = Some(email);
    if let Err(e) = config.save() {
        tracing::warn!(error = %e, "Failed to save config");
    }

    if let Some(user) = session.user() {
        println!("Logged in as {} <{}>", user.name, user.email);
    }
    Ok(())
}

/// Ask for an email, offering the remembered one as the default.
fn prompt_email(default: Option<&str>) -> Result<String> {
    match default {
        Some(d) => print!("Email [{}]: ", d),
        None => print!("Email: "),
    }
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line).context("Failed to read email")?;
    let entered = line.trim();

    match (entered.is_empty(), default) {
        (false, _) => Ok(entered.to_string()),
        (true, Some(d)) => Ok(d.to_string()),
        (true, None) => bail!("Email is required"),
    }
}

fn logout(mut session: SessionStore) -> Result<()> {
    let was_logged_in = session.is_authenticated();
    session.logout();
    if was_logged_in {
        println!("Logged out");
    } else {
        println!("Not logged in");
    }
    Ok(())
}

async fn whoami(mut session: SessionStore, refresh: bool) -> Result<()> {
    if refresh && session.is_authenticated() {
        if let Err(e) = session.refresh_user().await {
            bail!("{}", e);
        }
    }

    match session.user() {
        Some(user) => {
            println!("{} <{}>", user.name, user.email);
            Ok(())
        }
        None => bail!("Not logged in"),
    }
}

// ============================================================================
// Terminal interface
// ============================================================================

async fn run_tui(config: Config, session: SessionStore) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app (opens the login overlay when there is no session)
    let mut app = App::new(config, session);
    app.load_listings().await;

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("InternAIde shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| render(f, app))?;

        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                // Handle input
                if handle_input(app, key).await? {
                    return Ok(());
                }
            }
        }

        // Check if we should quit
        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        assert!(matches!(parse_args(&args(&[])).unwrap(), Command::Tui));
        assert!(matches!(parse_args(&args(&["login"])).unwrap(), Command::Login));
        assert!(matches!(parse_args(&args(&["logout"])).unwrap(), Command::Logout));
        assert!(matches!(
            parse_args(&args(&["whoami"])).unwrap(),
            Command::WhoAmI { refresh: false }
        ));
        assert!(matches!(
            parse_args(&args(&["whoami", "--refresh"])).unwrap(),
            Command::WhoAmI { refresh: true }
        ));
        assert!(matches!(parse_args(&args(&["--help"])).unwrap(), Command::Help));
        assert!(parse_args(&args(&["frobnicate"])).is_err());
    }
}
